//! Plain-text renderer for the terminal browser.

use kwani_core::{Level, ListItem, QueryFailure, Renderer, Screen};
use log::warn;
use std::fmt::Arguments;
use std::io::Write;

/// Prints numbered lists and remembers them for `Open(n)` commands.
pub struct TerminalRenderer<W: Write> {
    out: W,
    items: Vec<ListItem>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            items: Vec::new(),
        }
    }

    /// Id of the n-th (1-based) item of the last rendered list.
    pub fn item_id(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|idx| self.items.get(idx))
            .map(|item| item.id.as_str())
    }

    pub fn message(&mut self, text: &str) {
        self.emit(format_args!("{text}\n"));
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, args: Arguments<'_>) {
        if let Err(err) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            warn!("event=render module=cli status=error error={err}");
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn loading(&mut self, level: Level) {
        self.emit(format_args!("loading {level}...\n"));
    }

    fn render(&mut self, screen: &Screen) {
        let back = if screen.can_go_back { "< Back  " } else { "" };
        self.emit(format_args!("\n{back}{} [{}]\n", screen.title(), screen.level));

        match screen.content.as_deref() {
            Some(markup) => {
                self.emit(format_args!("{markup}\n"));
                if let Some(url) = screen.document_url.as_deref() {
                    self.emit(format_args!("document: {url}\n"));
                }
            }
            None if screen.items.is_empty() => self.emit(format_args!("(nothing here)\n")),
            None => {
                for (idx, item) in screen.items.iter().enumerate() {
                    self.emit(format_args!("{:>3}. {}\n", idx + 1, item.label));
                }
            }
        }
        self.items = screen.items.clone();
    }

    fn report_error(&mut self, failure: &QueryFailure) {
        self.emit(format_args!("error: {failure}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::TerminalRenderer;
    use kwani_core::{Level, ListItem, QueryFailure, Renderer, Screen};

    fn screen(level: Level, items: &[(&str, &str)]) -> Screen {
        Screen {
            level,
            parent_id: Some("c1".to_string()),
            items: items
                .iter()
                .map(|(id, label)| ListItem {
                    id: id.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            content: None,
            document_url: None,
            can_go_back: true,
        }
    }

    #[test]
    fn numbers_items_and_resolves_selection() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(&screen(Level::Year, &[("c1", "Year 1"), ("c1", "Year 2")]));
        assert_eq!(renderer.item_id(2), Some("c1"));
        assert_eq!(renderer.item_id(0), None);
        assert_eq!(renderer.item_id(3), None);

        let text = String::from_utf8(renderer.into_inner()).expect("utf-8 output");
        assert!(text.contains("< Back  Kwani [year]"));
        assert!(text.contains("  1. Year 1"));
        assert!(text.contains("  2. Year 2"));
    }

    #[test]
    fn content_screen_prints_markup_and_document() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let mut content = screen(Level::Content, &[]);
        content.content = Some("<iframe src=doc.pdf>".to_string());
        content.document_url = Some("doc.pdf".to_string());
        renderer.render(&content);

        let text = String::from_utf8(renderer.into_inner()).expect("utf-8 output");
        assert!(text.contains("<iframe src=doc.pdf>"));
        assert!(text.contains("document: doc.pdf"));
    }

    #[test]
    fn empty_list_and_errors_are_printed() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.render(&screen(Level::Course, &[]));
        renderer.report_error(&QueryFailure::status(503, "unavailable"));

        let text = String::from_utf8(renderer.into_inner()).expect("utf-8 output");
        assert!(text.contains("(nothing here)"));
        assert!(text.contains("error: query failed: unavailable - 503"));
    }
}
