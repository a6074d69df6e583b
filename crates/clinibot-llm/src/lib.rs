//! clinibot-llm
//!
//! Chat-completion calls for case generation and grading, with a uniform
//! retry policy and a typed response decoder.

pub mod case;
pub mod chat;
pub mod client;
pub mod error;
pub mod evaluate;
pub mod prompts;
pub mod retry;
