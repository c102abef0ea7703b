//! Language-specific abstractions.
//!
//! This module provides traits and types for target-specific code generation:
//! - [`LanguageProvider`] - Capability set the compilation engine emits code through
//! - [`LanguageCodegen`] - A complete backend: provider plus module renderer
//! - [`NamingConvention`] - Language-specific naming rules
//! - [`MStr`] - A string or string-list valued expression

mod naming;
mod provider;
mod traits;

pub use naming::NamingConvention;
pub use provider::{CompareOp, LanguageProvider, LineBuffer, MStr};
pub use traits::LanguageCodegen;
