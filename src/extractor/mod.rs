//! Link extraction from tokenized HTML
//!
//! This module turns a page's tag stream into [`Link`]s:
//!
//! - [`html`] - the single-pass extractor ([`extract_links`], [`Links`])
//! - [`base`] - base-href tracking ([`BaseHref`])
//! - [`resolve`] - entity decoding and relative URL joins
//! - [`onclick`] - navigation targets in `onclick` handlers
//! - [`normalize`] - scheme/extension/length filtering before crawling

pub mod base;
pub mod html;
pub mod normalize;
pub mod onclick;
pub mod resolve;

use serde::{Deserialize, Serialize};

pub use base::BaseHref;
pub use html::{extract_links, Links, PendingAnchor};
pub use normalize::LinkNormalizer;

use crate::config::ExtractionConfig;
use crate::parser::HtmlPage;

/// A link found on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL (relative only when the page URL itself was relative)
    pub url: String,

    /// Anchor text as raw markup, `alt` text for image-map areas,
    /// `None` for head links, frames and `onclick` targets
    pub text: Option<String>,

    /// Always empty; any fragment stays inside `url`
    pub fragment: String,

    /// The source tag carried `rel="nofollow"`
    pub nofollow: bool,
}

impl Link {
    pub fn new(url: impl Into<String>, text: Option<String>, nofollow: bool) -> Self {
        Self {
            url: url.into(),
            text,
            fragment: String::new(),
            nofollow,
        }
    }
}

/// Extracts crawlable links from HTML pages
///
/// Pairs the raw extractor with a [`LinkNormalizer`].
#[derive(Debug, Clone, Default)]
pub struct LinkExtractor {
    normalizer: LinkNormalizer,
}

impl LinkExtractor {
    #[must_use]
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            normalizer: LinkNormalizer::new(config),
        }
    }

    /// Normalized links on `page` that are worth requesting
    pub fn links_to_follow<'p>(&'p self, page: &'p HtmlPage) -> impl Iterator<Item = Link> + 'p {
        page.links()
            .filter_map(move |link| self.normalizer.normalize(link))
    }
}
