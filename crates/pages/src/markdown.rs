//! Markdown rendering behind a trait seam.

use pulldown_cmark::{Options, Parser, html};

/// Renders raw markdown to HTML. Pure: no side effects, no state.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, raw: &str) -> String;
}

/// CommonMark renderer (pulldown-cmark) with the extensions page authors
/// actually use: tables, strikethrough, task lists and footnotes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMarkRenderer;

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, raw: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES;

        let parser = Parser::new_ext(raw, options);
        let mut out = String::with_capacity(raw.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings() {
        let html = CommonMarkRenderer.render("# Hi");
        assert_eq!(html.trim(), "<h1>Hi</h1>");
    }

    #[test]
    fn renders_tables_extension() {
        let html = CommonMarkRenderer.render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(CommonMarkRenderer.render(""), "");
    }
}
