//! linkscout - link extraction for crawlers
//!
//! Finds navigational links in tokenized HTML and decides which of them a
//! crawler should follow.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`parser`] - Tag-stream data model and a lightweight tag scanner
//! - [`extractor`] - Single-pass link extraction and normalization
//! - [`filter`] - Follow/exclude/nofollow policy and follow-list helpers
//! - [`config`] - Configuration management and settings
//! - [`error`] - Unified error type
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```
//! use linkscout::prelude::*;
//!
//! let page = HtmlPage::new(
//!     "http://example.com/",
//!     "<a href='about.html'>About</a><a href='ads' rel='nofollow'>Ads</a>",
//!     "utf-8",
//! );
//! let filter = FilterConfig::default().compile().unwrap();
//!
//! let links: Vec<Link> = page.links().filter(|l| filter.is_followable(l)).collect();
//! assert_eq!(links.len(), 1);
//! assert_eq!(links[0].url, "http://example.com/about.html");
//! assert_eq!(links[0].text.as_deref(), Some("About"));
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod parser;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, LinkscoutErrorTrait, Result};
    pub use crate::extractor::{extract_links, Link, LinkExtractor};
    pub use crate::filter::{FilterConfig, LinkFilter, LinksToFollow};
    pub use crate::parser::{Document, HtmlPage, HtmlTag, TagKind};
}

// Direct re-exports for convenience
pub use extractor::{extract_links, Link};
pub use parser::HtmlPage;
