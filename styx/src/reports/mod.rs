//! Report data structures for commands.
//!
//! Operations build reports, then commands render them to an [`Output`]
//! target.

mod check;
mod compile;
mod output;

pub use check::{CheckReport, CheckedDescriptor, LintsReport};
pub use compile::{CompileReport, CompiledModule, ModuleStatus, SkippedDescriptor};
pub use output::{Output, Report, TerminalOutput};
