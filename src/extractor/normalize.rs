//! Post-extraction link normalization
//!
//! Links straight out of the extractor can point anywhere: `mailto:` and
//! `javascript:` targets, images, archives, absurdly long URLs. The
//! normalizer drops those and canonicalizes the rest through the URL parser
//! (dot segments collapsed, host lowercased, empty path becomes `/`).

use std::collections::HashSet;

use url::Url;

use super::Link;
use crate::config::ExtractionConfig;

/// Filters and canonicalizes extracted links before crawling
#[derive(Debug, Clone)]
pub struct LinkNormalizer {
    allowed_schemes: HashSet<String>,
    ignored_extensions: HashSet<String>,
    max_url_length: usize,
}

impl LinkNormalizer {
    #[must_use]
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            allowed_schemes: config
                .allowed_schemes
                .iter()
                .map(|s| s.to_ascii_lowercase())
                .collect(),
            ignored_extensions: config
                .ignored_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_url_length: config.max_url_length,
        }
    }

    /// Canonical form of `link`, or `None` if it should not be crawled
    #[must_use]
    pub fn normalize(&self, link: Link) -> Option<Link> {
        let parsed = match Url::parse(&link.url) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::trace!(url = %link.url, error = %err, "Dropping unparseable link");
                return None;
            }
        };

        if !self.allowed_schemes.contains(parsed.scheme()) {
            tracing::trace!(url = %link.url, "Dropping link with disallowed scheme");
            return None;
        }

        if let Some(ext) = path_extension(&parsed) {
            if self.ignored_extensions.contains(&ext) {
                tracing::trace!(url = %link.url, ext, "Dropping link to ignored file type");
                return None;
            }
        }

        let url: String = parsed.into();
        if url.len() > self.max_url_length {
            tracing::trace!(len = url.len(), "Dropping overlong link");
            return None;
        }

        Some(Link { url, ..link })
    }
}

impl Default for LinkNormalizer {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

fn path_extension(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    let (stem, ext) = last.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
