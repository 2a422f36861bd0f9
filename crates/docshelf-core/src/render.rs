//! Content rendering — raw document bytes to an HTTP body.
//!
//! A document's extension drives the rendering mode: `.txt` is served
//! verbatim as plain text, `.md` is converted to HTML. The markdown
//! engine is an injected pure function so the renderer is not coupled
//! to any specific conversion crate; the default is CommonMark via
//! `pulldown-cmark`.

use std::path::Path;

/// Content type for verbatim plaintext documents.
pub const TEXT_PLAIN: &str = "text/plain";

/// Content type for HTML, templated pages included.
pub const TEXT_HTML: &str = "text/html;charset=utf-8";

/// A rendered document body with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Value for the `Content-Type` header.
    pub content_type: &'static str,
    /// Response body bytes.
    pub body: Vec<u8>,
}

/// Renders raw document content according to the document's extension.
///
/// Holds the markdown conversion as a swappable `(source) -> html`
/// function. Everything else is extension dispatch.
pub struct ContentRenderer {
    markdown: Box<dyn Fn(&str) -> String + Send + Sync>,
}

impl ContentRenderer {
    /// Create a renderer using the default CommonMark conversion.
    #[must_use]
    pub fn new() -> Self {
        Self {
            markdown: Box::new(markdown_to_html),
        }
    }

    /// Create a renderer with a custom markdown conversion function.
    #[must_use]
    pub fn with_markdown(markdown: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self {
            markdown: Box::new(markdown),
        }
    }

    /// Render a document's raw bytes into a (content-type, body) pair.
    ///
    /// - `.txt` — `text/plain`, bytes verbatim
    /// - `.md` — `text/html;charset=utf-8`, markdown converted to HTML
    /// - anything else — treated as plaintext (safe default for
    ///   extensions with no specified behavior)
    #[must_use]
    pub fn render(&self, name: &str, raw: &[u8]) -> Rendered {
        match extension(name) {
            Some("md") => {
                let source = String::from_utf8_lossy(raw);
                Rendered {
                    content_type: TEXT_HTML,
                    body: (self.markdown)(&source).into_bytes(),
                }
            }
            _ => Rendered {
                content_type: TEXT_PLAIN,
                body: raw.to_vec(),
            },
        }
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ContentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRenderer").finish_non_exhaustive()
    }
}

/// Convert CommonMark source to an HTML fragment.
///
/// Raw inline HTML in the source passes through unchanged.
#[must_use]
pub fn markdown_to_html(source: &str) -> String {
    let parser = pulldown_cmark::Parser::new(source);
    let mut html = String::with_capacity(source.len() * 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

fn extension(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|ext| ext.to_str())
}
