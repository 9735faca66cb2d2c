//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes splitting the raw arguments into a command, the name-to-handler registry,
//! the handlers themselves, and the application state they share.

mod commands;
mod handlers;

pub use commands::*;
