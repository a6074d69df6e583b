//! clinibot-server library root.
//!
//! Exposes the router, state and workflow so integration tests can drive
//! them in-process without binding a socket.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod secrets;
pub mod state;
pub mod timer;
pub mod workflow;
