use styx_ir::Documentation;

/// Flatten documentation into one doc comment body.
pub(crate) fn docs_text(docs: &Documentation) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for text in [&docs.title, &docs.description].into_iter().flatten() {
        let text = text.trim();
        if !text.is_empty() {
            parts.push(text.to_string());
        }
    }
    if !docs.authors.is_empty() {
        parts.push(format!("Author: {}", docs.authors.join(", ")));
    }
    if !docs.urls.is_empty() {
        parts.push(format!("URL: {}", docs.urls.join(", ")));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}
