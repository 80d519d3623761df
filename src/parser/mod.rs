//! Tag-stream data model
//!
//! Link extraction works on a flat, ordered stream of tag-boundary events
//! rather than on a DOM. This module defines those events ([`HtmlTag`]) and
//! [`HtmlPage`], which bundles a document body with its URL, declared
//! encoding, and tag stream.
//!
//! Any tokenizer can produce the stream. [`tokenizer::scan_tags`] is a small
//! regex scanner good enough for crawling; it is not an HTML5 parser.

pub mod tokenizer;

use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::error::ParseError;

pub use tokenizer::scan_tags;

/// Whether a tag opens or closes an element
///
/// Self-closing tags (`<a href='x'/>`) are reported as [`TagKind::Open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Open,
    Close,
}

/// Tag attributes keyed by lowercased name
///
/// A value of `None` means the attribute was written without a value
/// (`<td nowrap>`). When a name repeats, the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Option<String>>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute; the name is lowercased
    pub fn insert(&mut self, name: impl AsRef<str>, value: Option<String>) {
        self.0.insert(name.as_ref().to_ascii_lowercase(), value);
    }

    /// Whether the attribute is written on the tag, with or without a value
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Attribute value, possibly empty
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_deref())
    }

    /// Attribute value, treating an empty value like a missing one
    #[must_use]
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// `rel="nofollow"`, compared literally
    #[must_use]
    pub fn is_nofollow(&self) -> bool {
        self.get("rel") == Some("nofollow")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, Option<V>)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value.map(Into::into));
        }
        attrs
    }
}

/// A single tag-boundary event
///
/// `start` and `end` are byte offsets into the document body: `start` points
/// at the `<` and `end` just past the `>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlTag {
    /// Lowercased tag name
    pub name: String,
    pub kind: TagKind,
    pub attributes: Attributes,
    pub start: usize,
    pub end: usize,
}

impl HtmlTag {
    /// Build an open tag
    pub fn open(name: impl Into<String>, attributes: Attributes, start: usize, end: usize) -> Self {
        Self {
            name: name.into(),
            kind: TagKind::Open,
            attributes,
            start,
            end,
        }
    }

    /// Build a close tag
    pub fn close(name: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            name: name.into(),
            kind: TagKind::Close,
            attributes: Attributes::new(),
            start,
            end,
        }
    }

    #[must_use]
    pub fn is_close(&self) -> bool {
        self.kind == TagKind::Close
    }
}

/// Borrowed view of the document an extraction runs over
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    /// URL the document was fetched from; relative links resolve against it
    pub url: &'a str,
    /// Raw document body the tag offsets index into
    pub body: &'a str,
    /// Declared character encoding label (`"utf-8"`, `"iso-8859-1"`, ...)
    pub encoding: &'a str,
}

/// A fetched HTML page together with its tag stream
#[derive(Debug, Clone)]
pub struct HtmlPage {
    pub url: String,
    pub body: String,
    pub encoding: String,
    tags: Vec<HtmlTag>,
}

impl HtmlPage {
    /// Tokenize `body` with the built-in tag scanner
    pub fn new(url: impl Into<String>, body: impl Into<String>, encoding: impl Into<String>) -> Self {
        let body = body.into();
        let tags = scan_tags(&body);
        Self {
            url: url.into(),
            body,
            encoding: encoding.into(),
            tags,
        }
    }

    /// Wrap a tag stream produced by an external tokenizer
    pub fn from_tags(
        url: impl Into<String>,
        body: impl Into<String>,
        encoding: impl Into<String>,
        tags: Vec<HtmlTag>,
    ) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
            encoding: encoding.into(),
            tags,
        }
    }

    /// A page holding only `region` of this page's markup
    ///
    /// The region keeps the page URL and encoding, so relative links inside it
    /// resolve as they would in the full page (minus any `<base>` outside it).
    #[must_use]
    pub fn region(&self, region: &str) -> Self {
        Self::new(self.url.clone(), region, self.encoding.clone())
    }

    #[must_use]
    pub fn tags(&self) -> &[HtmlTag] {
        &self.tags
    }

    #[must_use]
    pub fn document(&self) -> Document<'_> {
        Document {
            url: &self.url,
            body: &self.body,
            encoding: &self.encoding,
        }
    }

    /// Read and tokenize an HTML file stored in `encoding`
    ///
    /// # Errors
    ///
    /// See [`read_document`].
    pub fn from_file(path: &Path, url: impl Into<String>, encoding: &str) -> Result<Self> {
        let body = read_document(path, encoding)?;
        Ok(Self::new(url, body, encoding))
    }
}

/// Read a file and decode it from `encoding`
///
/// Bytes invalid in that encoding become U+FFFD and are logged at `warn`.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read and `Error::Parse` if
/// `encoding` is not a known encoding label.
pub fn read_document(path: &Path, encoding: &str) -> Result<String> {
    let encoding = Encoding::for_label(encoding.trim().as_bytes())
        .ok_or_else(|| ParseError::UnknownEncoding(encoding.to_string()))?;
    let bytes = std::fs::read(path)?;

    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        tracing::warn!(
            file = %path.display(),
            encoding = used.name(),
            "Document contains bytes invalid in its declared encoding"
        );
    }
    Ok(text.into_owned())
}
