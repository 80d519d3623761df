//! Crawl-eligibility policy for extracted links
//!
//! A [`FilterConfig`] is compiled once into a [`LinkFilter`], an immutable
//! predicate that can be shared across threads. Patterns use search
//! semantics: a pattern matches if it matches anywhere in the URL.

pub mod follow;

use std::str::FromStr;

use regex::RegexSet;
use serde::{Deserialize, Serialize};

pub use follow::{follow_links_in_regions, requests_to_follow};

use crate::extractor::Link;
use crate::utils::error::{FilterError, PatternKind};

/// Which links a crawl follows at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinksToFollow {
    /// Follow nothing
    None,
    /// Follow links matching `follow_patterns`
    Patterns,
    /// Follow everything not excluded
    #[default]
    All,
}

impl FromStr for LinksToFollow {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "patterns" => Ok(Self::Patterns),
            "all" => Ok(Self::All),
            other => Err(FilterError::UnknownMode(other.to_string())),
        }
    }
}

/// Link filter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Regexes a URL must match (any of them) to be followed
    pub follow_patterns: Vec<String>,

    /// Regexes that veto a URL when any of them matches
    pub exclude_patterns: Vec<String>,

    /// Reject links marked `rel="nofollow"`
    pub respect_nofollow: bool,

    pub links_to_follow: LinksToFollow,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            follow_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            respect_nofollow: true,
            links_to_follow: LinksToFollow::All,
        }
    }
}

impl FilterConfig {
    /// Compile into a [`LinkFilter`]
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidPattern` naming the first pattern that
    /// does not compile.
    pub fn compile(&self) -> Result<LinkFilter, FilterError> {
        LinkFilter::new(self)
    }
}

/// Compiled, immutable link filter
#[derive(Debug, Clone)]
pub struct LinkFilter {
    links_to_follow: LinksToFollow,
    follow: Option<RegexSet>,
    exclude: Option<RegexSet>,
    respect_nofollow: bool,
}

fn compile_patterns(
    patterns: &[String],
    kind: PatternKind,
) -> Result<Option<RegexSet>, FilterError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    // compile one by one first so the error names the offending pattern
    for pattern in patterns {
        regex::Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
            kind,
            pattern: pattern.clone(),
            source,
        })?;
    }

    RegexSet::new(patterns)
        .map(Some)
        .map_err(|source| FilterError::InvalidPattern {
            kind,
            pattern: patterns.join("|"),
            source,
        })
}

impl LinkFilter {
    /// Compile `config`
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidPattern` if a follow or exclude pattern is
    /// not a valid regular expression.
    pub fn new(config: &FilterConfig) -> Result<Self, FilterError> {
        let follow = compile_patterns(&config.follow_patterns, PatternKind::Follow)?;
        let exclude = compile_patterns(&config.exclude_patterns, PatternKind::Exclude)?;

        tracing::debug!(
            links_to_follow = ?config.links_to_follow,
            follow_patterns = config.follow_patterns.len(),
            exclude_patterns = config.exclude_patterns.len(),
            respect_nofollow = config.respect_nofollow,
            "Compiled link filter"
        );

        Ok(Self {
            links_to_follow: config.links_to_follow,
            follow,
            exclude,
            respect_nofollow: config.respect_nofollow,
        })
    }

    /// Whether `link` may be crawled
    #[must_use]
    pub fn is_followable(&self, link: &Link) -> bool {
        if self.links_to_follow == LinksToFollow::None {
            return false;
        }

        let nofollow_ok = !(self.respect_nofollow && link.nofollow);
        let base = match &self.follow {
            Some(follow) => nofollow_ok && follow.is_match(&link.url),
            None => nofollow_ok,
        };

        match &self.exclude {
            Some(exclude) => base && !exclude.is_match(&link.url),
            None => base,
        }
    }
}
