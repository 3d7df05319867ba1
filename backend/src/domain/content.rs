//! Conversion of stored document bytes into a displayable body.

use pulldown_cmark::{Options, Parser, html};

use super::document::DocumentKind;

/// Content-type tag attached to a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Markdown rendered to HTML.
    Html,
    /// Bytes passed through unchanged.
    PlainText,
}

impl ContentType {
    /// Header value for this content type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "text/html;charset=utf-8",
            Self::PlainText => "text/plain",
        }
    }
}

/// A document body ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Display bytes.
    pub body: Vec<u8>,
    /// Tag describing `body`.
    pub content_type: ContentType,
}

/// Render stored bytes according to the document kind.
///
/// Markdown goes through CommonMark with no extensions enabled; invalid UTF-8
/// sequences are replaced before parsing. Plaintext is returned verbatim.
///
/// # Examples
/// ```
/// use cms::domain::{ContentType, DocumentKind, render};
///
/// let rendered = render(DocumentKind::Markdown, b"**bold**".to_vec());
/// assert_eq!(rendered.content_type, ContentType::Html);
/// assert!(String::from_utf8_lossy(&rendered.body).contains("<strong>bold</strong>"));
/// ```
pub fn render(kind: DocumentKind, bytes: Vec<u8>) -> RenderedDocument {
    match kind {
        DocumentKind::Markdown => {
            let source = String::from_utf8_lossy(&bytes);
            let parser = Parser::new_ext(&source, Options::empty());
            let mut out = String::with_capacity(source.len() + source.len() / 2);
            html::push_html(&mut out, parser);
            RenderedDocument {
                body: out.into_bytes(),
                content_type: ContentType::Html,
            }
        }
        DocumentKind::Plaintext => RenderedDocument {
            body: bytes,
            content_type: ContentType::PlainText,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn markdown(source: &str) -> String {
        let rendered = render(DocumentKind::Markdown, source.as_bytes().to_vec());
        assert_eq!(rendered.content_type, ContentType::Html);
        String::from_utf8(rendered.body).expect("html is utf-8")
    }

    #[rstest]
    #[case("# Title", "<h1>Title</h1>")]
    #[case("*em*", "<em>em</em>")]
    #[case("**b**", "<strong>b</strong>")]
    #[case("- one\n- two", "<li>one</li>")]
    #[case("[home](/)", "<a href=\"/\">home</a>")]
    #[case("`code`", "<code>code</code>")]
    fn markdown_features(#[case] source: &str, #[case] fragment: &str) {
        assert!(markdown(source).contains(fragment));
    }

    #[test]
    fn plaintext_is_passed_through() {
        let bytes = b"**not markdown** <b>".to_vec();
        let rendered = render(DocumentKind::Plaintext, bytes.clone());
        assert_eq!(rendered.content_type, ContentType::PlainText);
        assert_eq!(rendered.body, bytes);
    }

    #[test]
    fn content_type_header_values() {
        assert_eq!(ContentType::Html.as_str(), "text/html;charset=utf-8");
        assert_eq!(ContentType::PlainText.as_str(), "text/plain");
    }
}
