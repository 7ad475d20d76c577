//! Library surface of the sheetstack CLI.
//!
//! The binary in `main.rs` only parses arguments and dispatches; everything
//! testable lives here.

pub mod cli_args;
pub mod commands;
pub mod input;
pub mod report;
