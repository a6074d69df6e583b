//! clinibot-sheets
//!
//! Registration records sent to the spreadsheet webhook.

pub mod error;
pub mod payload;
pub mod submit;
