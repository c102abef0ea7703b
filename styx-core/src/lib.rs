//! Core utilities and types for the Styx wrapper compiler.
//!
//! This crate provides the case conversions and file writing helpers
//! shared by the compiler, its backends and the command line driver.

mod file;
mod utils;

// File operations
pub use file::{File, WriteResult};
// String utilities
pub use utils::{
    quote_string, sanitize_identifier, to_camel_case, to_pascal_case, to_screaming_snake_case,
    to_snake_case,
};
