//! Backend trait tying a provider to its renderer.

use std::path::{Component, Path, PathBuf};

use styx_ir::Interface;

use super::LanguageProvider;
use crate::{compile::compile_interface, model::GenericModule};

/// Trait for complete target backends.
///
/// Implement this trait to add support for generating wrappers in a new language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "python", "typescript")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "py", "ts")
    fn file_extension(&self) -> &'static str;

    /// The capability set the compilation engine emits through.
    fn provider(&self) -> &dyn LanguageProvider;

    /// Render a compiled module to source text.
    fn render(&self, module: &GenericModule) -> String;

    /// Compile and render one descriptor.
    fn compile(&self, interface: &Interface) -> crate::Result<String> {
        let module = compile_interface(self.provider(), interface)?;
        Ok(self.render(&module))
    }

    /// Output path for a descriptor, relative to the output folder.
    ///
    /// Every directory component and the file stem go through the
    /// language's file naming rule.
    fn module_path(&self, descriptor: &Path) -> PathBuf {
        let naming = self.provider().naming();
        let mut out = PathBuf::new();
        if let Some(parent) = descriptor.parent() {
            for component in parent.components() {
                if let Component::Normal(name) = component {
                    out.push(naming.file_name(&name.to_string_lossy()));
                }
            }
        }
        let stem = descriptor
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        out.push(format!("{}.{}", naming.file_name(&stem), self.file_extension()));
        out
    }
}
