//! Python backend entry point.

use styx_codegen::{
    language::{LanguageCodegen, LanguageProvider},
    model::GenericModule,
};

use crate::{provider::PythonProvider, renderer::PythonRenderer};

/// Compiles descriptors into Python wrapper modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonCodegen {
    provider: PythonProvider,
    renderer: PythonRenderer,
}

impl PythonCodegen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LanguageCodegen for PythonCodegen {
    fn language(&self) -> &'static str {
        "python"
    }

    fn file_extension(&self) -> &'static str {
        "py"
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
    fn test_module_path() {
        let codegen = PythonCodegen::new();
        assert_eq!(
            codegen.module_path(Path::new("FSL/bet.json")),
            PathBuf::from("fsl/bet.py")
        );
        assert_eq!(
            codegen.module_path(Path::new("afni/3dcalc.json")),
            PathBuf::from("afni/_3dcalc.py")
        );
    }
}
