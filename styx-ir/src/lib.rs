//! Intermediate representation types for the Styx wrapper compiler.
//!
//! This crate provides the descriptor tree every backend compiles from.
//! A descriptor front end builds an [`Interface`] once; the compiler treats
//! it as a frozen value tree afterwards.
//!
//! # Architecture
//!
//! ```text
//! descriptor (JSON) → styx-ir (Interface) → styx-codegen (GenericModule) → backend (source text)
//! ```
//!
//! The IR types are designed to be:
//! - Language-agnostic (no Python/TypeScript-specific concerns)
//! - Serializable, so a front end can hand the tree over as JSON
//! - Closed: every parameter kind is a variant of [`ParamBody`]

mod index;
mod interface;
mod param;
mod structure;

pub use index::{DuplicateParamId, ParamIndex};
pub use interface::{Documentation, Interface, Package, StdStreamOutput};
pub use param::{
    BoolParam, DefaultValue, FileParam, FloatParam, IntParam, ListSpec, Param, ParamBody, ParamId,
    ParamsRecursive, StringParam, StructUnion,
};
pub use structure::{
    Cardinality, Carg, ConditionalGroup, GroupConstraint, Output, OutputId, OutputParamReference,
    OutputToken, StructBody, Token,
};
