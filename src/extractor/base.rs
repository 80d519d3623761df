//! Base-href tracking for relative link resolution

use encoding_rs::Encoding;

use super::resolve::{decode_entities, join_url, resolve_encoding};

/// The URL relative links on a page resolve against
///
/// Starts as the document URL. Only a `<base href>` seen while scanning the
/// head section moves it, and every move is computed from the document URL,
/// never from the previous base.
#[derive(Debug, Clone)]
pub struct BaseHref<'a> {
    document_url: &'a str,
    current: String,
    encoding: &'static Encoding,
}

impl<'a> BaseHref<'a> {
    pub fn new(document_url: &'a str, encoding: &str) -> Self {
        Self {
            document_url,
            current: decode_entities(document_url).into_owned(),
            encoding: resolve_encoding(encoding),
        }
    }

    /// Current base URL
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Turn a raw attribute value into an absolute URL
    ///
    /// The value is trimmed and entity-decoded before being joined against
    /// the current base.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> String {
        let decoded = decode_entities(raw.trim());
        join_url(&self.current, &decoded, self.encoding)
    }

    /// Apply a `<base href>` value
    pub(super) fn rebase(&mut self, href: &str) {
        let joined = join_url(self.document_url, href.trim(), self.encoding);
        self.current = decode_entities(&joined).into_owned();
        tracing::debug!(base_href = %self.current, "Base href updated");
    }
}
