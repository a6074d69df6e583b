//! clinibot-core
//!
//! Pure domain types and the session state machine.
//! No network or filesystem access. This is the shared vocabulary of the
//! CLINIC-BOT service.

pub mod error;
pub mod models;
pub mod workflow;
