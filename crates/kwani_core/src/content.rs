//! Handout markup inspection.

use once_cell::sync::Lazy;
use regex::Regex;

static IFRAME_SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<iframe\b[^>]*?\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+?)(?:/?>|\s|$))"#)
        .expect("valid iframe src regex")
});

/// Returns the `src` of the first embedded `<iframe>`, if any.
pub fn document_source(markup: &str) -> Option<String> {
    let captures = IFRAME_SRC_RE.captures(markup)?;
    let src = (1..=3)
        .find_map(|idx| captures.get(idx))
        .map(|m| m.as_str().trim())?;
    if src.is_empty() {
        None
    } else {
        Some(src.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::document_source;

    #[test]
    fn reads_unquoted_src() {
        assert_eq!(
            document_source("<iframe src=doc.pdf>").as_deref(),
            Some("doc.pdf")
        );
    }

    #[test]
    fn reads_quoted_src_after_other_attributes() {
        let markup = r#"<IFRAME width="100%" src="https://docs.example/view?id=1&a=b"></IFRAME>"#;
        assert_eq!(
            document_source(markup).as_deref(),
            Some("https://docs.example/view?id=1&a=b")
        );
        assert_eq!(
            document_source("<iframe src='x.pdf' />").as_deref(),
            Some("x.pdf")
        );
    }

    #[test]
    fn self_closing_tag_does_not_leak_into_src() {
        assert_eq!(
            document_source("<iframe src=doc.pdf/>").as_deref(),
            Some("doc.pdf")
        );
        assert_eq!(
            document_source("<iframe src=files/doc.pdf width=100>").as_deref(),
            Some("files/doc.pdf")
        );
    }

    #[test]
    fn prefixed_src_attributes_are_ignored() {
        let markup = r#"<iframe data-src="lazy.pdf" src="doc.pdf" height="600"></iframe>"#;
        assert_eq!(document_source(markup).as_deref(), Some("doc.pdf"));
    }

    #[test]
    fn plain_markup_has_no_document() {
        assert_eq!(document_source("<p>Read chapter 2</p>"), None);
        assert_eq!(document_source(r#"<iframe src="">"#), None);
    }
}
