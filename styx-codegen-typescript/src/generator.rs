//! TypeScript backend entry point.

use styx_codegen::{
    language::{LanguageCodegen, LanguageProvider},
    model::GenericModule,
};

use crate::{provider::TypeScriptProvider, renderer::TypeScriptRenderer};

/// Compiles descriptors into TypeScript wrapper modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptCodegen {
    provider: TypeScriptProvider,
    renderer: TypeScriptRenderer,
}

impl TypeScriptCodegen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LanguageCodegen for TypeScriptCodegen {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn provider(&self) -> &dyn LanguageProvider {
        &self.provider
    }

    fn render(&self, module: &GenericModule) -> String {
        self.renderer.render(module)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    #[test]
    fn test_module_path_uses_snake_case_files() {
        let codegen = TypeScriptCodegen::new();
        assert_eq!(
            codegen.module_path(Path::new("FSL/BetSurf.json")),
            PathBuf::from("fsl/bet_surf.ts")
        );
    }
}
