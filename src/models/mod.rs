//! Defines the data structures and models used throughout the application.
//!
//! Currently this is the user record stored by the persistence backend.

mod user;

pub use user::*;
