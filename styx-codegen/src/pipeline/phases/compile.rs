//! Compile phase - runs the engine for one target language.

use eyre::{Result, WrapErr};

use crate::{
    compile::compile_interface,
    language::LanguageProvider,
    pipeline::{CompilationContext, Phase},
};

/// Phase compiling the validated descriptor into a generic module.
pub struct CompilePhase<'a> {
    lang: &'a dyn LanguageProvider,
}

impl<'a> CompilePhase<'a> {
    pub fn new(lang: &'a dyn LanguageProvider) -> Self {
        Self { lang }
    }
}

impl Phase for CompilePhase<'_> {
    fn name(&self) -> &'static str {
        "compile"
    }

    fn description(&self) -> &'static str {
        "Compile the descriptor into functions, classes and output records"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let module = compile_interface(self.lang, &ctx.interface)
            .wrap_err_with(|| format!("Failed to compile '{}'", ctx.interface.command.name))?;
        ctx.module = Some(module);
        Ok(())
    }
}
