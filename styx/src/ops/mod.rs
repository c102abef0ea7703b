//! Core operations.
//!
//! This module contains the business logic for styx commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod compile;
mod descriptors;

pub use check::{check, list_lints};
pub use compile::{CompileOptions, compile};
