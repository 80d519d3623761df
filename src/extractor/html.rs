//! Single-pass link extraction over a tag stream
//!
//! [`Links`] walks the tag stream once and yields links in document order:
//!
//! - `<a href>` links are buffered until the next anchor boundary (another
//!   anchor with a usable `href`, or any `</a>`) so their text can be taken
//!   from the raw body between the tags. Nested or unclosed anchors flatten
//!   into a sequence: each new anchor flushes the one before it.
//! - Inside `<head>`, `<base href>` moves the base URL, and
//!   `<meta http-equiv="refresh">` and `<link href>` yield links.
//! - `<area href>`, `<frame src>`, `<iframe src>` and `onclick` handlers yield
//!   links as soon as they are seen.
//!
//! Tags missing the attribute a branch needs are skipped silently.

use std::borrow::Borrow;
use std::iter::{Fuse, FusedIterator};
use std::sync::OnceLock;

use regex::Regex;

use super::base::BaseHref;
use super::onclick::onclick_target;
use super::Link;
use crate::parser::{Document, HtmlPage, HtmlTag, TagKind};

fn meta_refresh_regex() -> &'static Regex {
    static META_REFRESH_CONTENT_RE: OnceLock<Regex> = OnceLock::new();
    META_REFRESH_CONTENT_RE.get_or_init(|| {
        Regex::new(r"(?:\d*\.)?\d+\s*;\s*url=(?P<url>.*)").expect("Invalid regex pattern")
    })
}

/// Target of a `<meta http-equiv="refresh" content="5;url=...">` tag
#[must_use]
pub fn meta_refresh_target(content: &str) -> Option<&str> {
    meta_refresh_regex()
        .captures(content)
        .and_then(|caps| caps.name("url"))
        .map(|m| m.as_str())
        .filter(|target| !target.is_empty())
}

/// An anchor whose text is still being accumulated
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingAnchor {
    #[default]
    Idle,
    Open {
        href: String,
        /// Byte offset just past the opening tag
        start: usize,
        nofollow: bool,
    },
}

impl PendingAnchor {
    /// Start buffering a new anchor, returning whatever was pending before
    pub fn open(&mut self, href: impl Into<String>, start: usize, nofollow: bool) -> Self {
        std::mem::replace(
            self,
            Self::Open {
                href: href.into(),
                start,
                nofollow,
            },
        )
    }

    /// Take the pending anchor, leaving the state idle
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Whether the tag ends the anchor being buffered
///
/// Every `</a>` does; an `<a>` does when its `href` is non-empty and is not a
/// same-page fragment.
fn is_anchor_boundary(tag: &HtmlTag) -> bool {
    match tag.kind {
        TagKind::Close => true,
        TagKind::Open => tag
            .attributes
            .non_empty("href")
            .is_some_and(|href| !href.starts_with('#')),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Body,
    Head,
    Finished,
}

/// Lazy link iterator over a tag stream
///
/// Created by [`extract_links`] or [`HtmlPage::links`]. The tag stream is
/// consumed exactly once; the iterator cannot be restarted.
#[derive(Debug)]
pub struct Links<'a, I> {
    tags: Fuse<I>,
    body: &'a str,
    base: BaseHref<'a>,
    pending: PendingAnchor,
    scan: Scan,
}

/// Extract links from `tags`, a tag stream over `document.body`
pub fn extract_links<'a, I>(tags: I, document: Document<'a>) -> Links<'a, I::IntoIter>
where
    I: IntoIterator,
    I::Item: Borrow<HtmlTag>,
{
    Links {
        tags: tags.into_iter().fuse(),
        body: document.body,
        base: BaseHref::new(document.url, document.encoding),
        pending: PendingAnchor::Idle,
        scan: Scan::Body,
    }
}

impl HtmlPage {
    /// Links on this page, in document order
    pub fn links(&self) -> Links<'_, std::slice::Iter<'_, HtmlTag>> {
        extract_links(self.tags(), self.document())
    }
}

impl<'a, I> Links<'a, I>
where
    I: Iterator,
    I::Item: Borrow<HtmlTag>,
{
    fn make_link(&self, raw: &str, text: Option<String>, nofollow: bool) -> Link {
        Link::new(self.base.resolve(raw), text, nofollow)
    }

    fn body_slice(&self, start: usize, end: Option<usize>) -> String {
        let slice = match end {
            Some(end) => self.body.get(start..end),
            None => self.body.get(start..),
        };
        slice.unwrap_or_default().to_string()
    }

    /// Emit the pending anchor with text running up to `end`
    fn flush(&mut self, end: Option<usize>) -> Option<Link> {
        match self.pending.take() {
            PendingAnchor::Idle => None,
            PendingAnchor::Open {
                href,
                start,
                nofollow,
            } => {
                let text = self.body_slice(start, end);
                tracing::trace!(href = %href, start, "Flushing anchor");
                Some(self.make_link(&href, Some(text), nofollow))
            }
        }
    }

    fn body_tag(&mut self, tag: &HtmlTag) -> Option<Link> {
        let attrs = &tag.attributes;
        match tag.name.as_str() {
            "a" if is_anchor_boundary(tag) => {
                let flushed = self.flush(Some(tag.start));
                if !tag.is_close() {
                    if let Some(href) = attrs.non_empty("href") {
                        self.pending.open(href, tag.end, attrs.is_nofollow());
                    }
                }
                flushed
            }
            "head" if tag.kind == TagKind::Open => {
                self.scan = Scan::Head;
                None
            }
            "area" => attrs.non_empty("href").map(|href| {
                let alt = attrs.get("alt").unwrap_or_default().to_string();
                self.make_link(href, Some(alt), attrs.is_nofollow())
            }),
            "frame" | "iframe" => attrs
                .non_empty("src")
                .map(|src| self.make_link(src, None, false)),
            _ if attrs.contains("onclick") => {
                let script = attrs.get("onclick").unwrap_or_default();
                onclick_target(script).map(|target| {
                    tracing::trace!(tag = %tag.name, target, "Link from onclick handler");
                    self.make_link(target, None, attrs.is_nofollow())
                })
            }
            _ => None,
        }
    }

    fn head_tag(&mut self, tag: &HtmlTag) -> Option<Link> {
        let attrs = &tag.attributes;
        match tag.name.as_str() {
            "head" if tag.is_close() => {
                self.scan = Scan::Body;
                None
            }
            "body" => {
                self.scan = Scan::Body;
                None
            }
            "base" => {
                if let Some(href) = attrs.non_empty("href") {
                    self.base.rebase(href);
                }
                None
            }
            "meta" if attrs.get("http-equiv") == Some("refresh") => {
                meta_refresh_target(attrs.get("content").unwrap_or_default())
                    .map(|target| self.make_link(target, None, false))
            }
            "link" => attrs
                .non_empty("href")
                .map(|href| self.make_link(href, None, false)),
            _ => None,
        }
    }
}

impl<'a, I> Iterator for Links<'a, I>
where
    I: Iterator,
    I::Item: Borrow<HtmlTag>,
{
    type Item = Link;

    fn next(&mut self) -> Option<Link> {
        loop {
            match self.scan {
                Scan::Finished => return None,
                Scan::Head => match self.tags.next() {
                    // an unterminated head ends with the document
                    None => self.scan = Scan::Body,
                    Some(tag) => {
                        if let Some(link) = self.head_tag(tag.borrow()) {
                            return Some(link);
                        }
                    }
                },
                Scan::Body => match self.tags.next() {
                    None => {
                        self.scan = Scan::Finished;
                        return self.flush(None);
                    }
                    Some(tag) => {
                        if let Some(link) = self.body_tag(tag.borrow()) {
                            return Some(link);
                        }
                    }
                },
            }
        }
    }
}

impl<'a, I> FusedIterator for Links<'a, I>
where
    I: Iterator,
    I::Item: Borrow<HtmlTag>,
{
}
