use pulldown_cmark::{Parser, html};

/// Service for handling markdown rendering
pub struct MarkdownService;

impl MarkdownService {
    /// Create a new markdown service
    pub fn new() -> Self {
        Self
    }

    /// Convert markdown source to HTML with default CommonMark options
    pub fn render(&self, source: &str) -> String {
        let parser = Parser::new(source);
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }
}

impl Default for MarkdownService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_paragraphs() {
        let html = MarkdownService::new().render("# Title\n\nSome *emphasis*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let service = MarkdownService::new();
        assert_eq!(service.render("- a\n- b"), service.render("- a\n- b"));
    }
}
