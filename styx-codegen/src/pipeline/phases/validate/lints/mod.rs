//! Built-in lints for descriptor validation.

mod empty_description;
mod reference;
mod template_type;

pub use empty_description::EmptyDescriptionLint;
pub use reference::ReferenceLint;
pub use template_type::TemplateTypeLint;
