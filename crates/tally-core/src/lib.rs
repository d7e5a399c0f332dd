//! Tally Core — shared domain types.
//!
//! This crate defines the event envelope, the typed payloads and the
//! aggregate fold contract. It contains no storage code.

pub mod account;
pub mod aggregate;
pub mod error;
pub mod event;
