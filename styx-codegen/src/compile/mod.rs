//! The compilation engine.
//!
//! [`compile_interface`] turns one descriptor into a [`GenericModule`]. It is
//! written once against [`LanguageProvider`] and never inspects which target
//! it is compiling for.
//!
//! The work happens in three steps:
//! 1. [`validate`] rejects descriptors that cannot be compiled, before any
//!    code is emitted.
//! 2. [`SymbolTable::build`] allocates every name up front.
//! 3. A depth-first walk over the struct tree emits data classes, output
//!    records and the root function, children before parents.

mod cargs;
mod constraints;
mod docs;
mod metadata;
mod outputs;
mod structure;
mod symbols;
pub mod validate;

pub use symbols::SymbolTable;

use styx_ir::Interface;

use crate::{Result, language::LanguageProvider, model::GenericModule};

/// Optional runner argument of the root function.
pub const RUNNER: &str = "runner";
/// Per-invocation execution handle.
pub const EXECUTION: &str = "execution";
/// Argument buffer being assembled.
pub const CARGS: &str = "cargs";
/// Output record being returned.
pub const RET: &str = "ret";
/// Output root field present on every output record.
pub const OUTPUT_ROOT: &str = "root";
/// Method building a sub-struct's command-line words.
pub const RUN_METHOD: &str = "run";
/// Method collecting a sub-struct's outputs.
pub const OUTPUTS_METHOD: &str = "outputs";

/// Compile one descriptor into a generic module.
#[tracing::instrument(level = "debug", skip_all, fields(tool = %interface.command.name))]
pub fn compile_interface(lang: &dyn LanguageProvider, interface: &Interface) -> Result<GenericModule> {
    validate::validate(interface)?;
    let symbols = SymbolTable::build(lang, interface)?;

    let mut module = GenericModule::new();
    module.imports.extend(lang.wrapper_module_imports());
    module
        .header
        .extend(metadata::compile_metadata(lang, interface, &symbols));
    module.export(&symbols.metadata);
    module.export(&symbols.function);

    structure::StructCompiler::new(lang, interface, &symbols).compile_root(&mut module)?;

    tracing::debug!(
        items = module.items.len(),
        exports = module.exports.len(),
        "compiled interface"
    );
    Ok(module)
}

/// A member read: `self.x` inside data class methods, the bare argument in
/// the root function.
pub(crate) fn access(lang: &dyn LanguageProvider, symbol: &str, via_self: bool) -> String {
    if via_self {
        lang.expr_access_attr_via_self(symbol)
    } else {
        symbol.to_string()
    }
}
