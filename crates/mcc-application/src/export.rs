//! Markdown export of recorded content.

use mcc_core::history::HistoryItem;

/// Renders a history item as a standalone markdown document.
///
/// The document leads with the title as an H1 and the meta description,
/// then the recorded body. Returns `None` when the item has no body to
/// export (graphics, for instance).
pub fn markdown_document(item: &HistoryItem) -> Option<String> {
    let content = item.content.as_deref().filter(|c| !c.trim().is_empty())?;
    let meta = item.meta_description.as_deref().unwrap_or_default();
    Some(format!(
        "# {}\n\nMeta Description: {}\n\n{}",
        item.title, meta, content
    ))
}

/// Derives a filesystem-safe `.md` filename from a title.
///
/// Keeps ASCII alphanumerics and spaces, collapses runs of spaces into a
/// single underscore. A title with nothing usable becomes `article.md`.
pub fn export_filename(title: &str) -> String {
    let safe: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    let stem = safe
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if stem.is_empty() {
        "article.md".to_string()
    } else {
        format!("{}.md", stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcc_core::history::HistoryKind;

    #[test]
    fn test_markdown_document_layout() {
        let item = HistoryItem::new(HistoryKind::Article, "X Guide")
            .with_content("Body text.")
            .with_meta_description("About X.");
        let doc = markdown_document(&item).unwrap();
        assert_eq!(doc, "# X Guide\n\nMeta Description: About X.\n\nBody text.");
    }

    #[test]
    fn test_markdown_document_requires_a_body() {
        let graphic = HistoryItem::new(HistoryKind::Graphic, "Dashboard")
            .with_image_url("https://cdn.example.test/g.png");
        assert!(markdown_document(&graphic).is_none());

        let blank = HistoryItem::new(HistoryKind::Article, "Empty").with_content("   ");
        assert!(markdown_document(&blank).is_none());
    }

    #[test]
    fn test_export_filename_sanitization() {
        assert_eq!(
            export_filename("The Ultimate Guide: 2025!"),
            "The_Ultimate_Guide_2025.md"
        );
        assert_eq!(export_filename("plain"), "plain.md");
        assert_eq!(export_filename("!!!"), "article.md");
        assert_eq!(export_filename("  spaced   out  "), "spaced_out.md");
    }
}
