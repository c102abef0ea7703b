use styx_ir::{DefaultValue, Interface};

use super::SymbolTable;
use crate::language::{LanguageProvider, LineBuffer};

/// Static metadata constant identifying the tool at runtime.
pub(crate) fn compile_metadata(
    lang: &dyn LanguageProvider,
    interface: &Interface,
    symbols: &SymbolTable<'_>,
) -> LineBuffer {
    let mut entries = vec![
        ("id", DefaultValue::String(interface.uid.clone())),
        ("name", DefaultValue::String(interface.command.name.clone())),
        ("package", DefaultValue::String(interface.package.name.clone())),
    ];
    let literature = &interface.command.docs.literature;
    if !literature.is_empty() {
        entries.push((
            "citations",
            DefaultValue::List(literature.iter().cloned().map(DefaultValue::String).collect()),
        ));
    }
    if let Some(image) = &interface.package.docker {
        entries.push(("container_image_tag", DefaultValue::String(image.clone())));
    }
    lang.metadata_declare(&symbols.metadata, &entries)
}
