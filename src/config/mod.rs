//! Configuration management for linkscout
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::filter::{FilterConfig, LinkFilter, LinksToFollow};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extraction and normalization settings
    pub extraction: ExtractionConfig,

    /// Link filter settings
    pub filter: FilterConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Extraction-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Encoding assumed when a page does not declare one
    pub default_encoding: String,

    /// Longest URL kept by normalization
    pub max_url_length: usize,

    /// URL schemes kept by normalization
    pub allowed_schemes: Vec<String>,

    /// File extensions dropped by normalization
    pub ignored_extensions: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

/// Extensions of files that are never worth crawling as pages
pub const IGNORED_EXTENSIONS: &[&str] = &[
    // images
    "mng", "pct", "bmp", "gif", "jpg", "jpeg", "png", "pst", "psp", "tif", "tiff", "ai", "drw",
    "dxf", "eps", "ps", "svg", "ico", "webp",
    // audio
    "mp3", "wma", "ogg", "wav", "ra", "aac", "mid", "au", "aiff",
    // video
    "3gp", "asf", "asx", "avi", "mov", "mp4", "mpg", "qt", "rm", "swf", "wmv", "m4a", "webm",
    // office suites
    "xls", "xlsx", "ppt", "pptx", "pps", "doc", "docx", "odt", "ods", "odg", "odp",
    // other
    "css", "pdf", "exe", "bin", "rss", "zip", "rar", "gz", "tgz", "bz2", "7z", "dmg", "iso",
];

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_encoding: String::from("utf-8"),
            max_url_length: 2083,
            allowed_schemes: vec![String::from("http"), String::from("https")],
            ignored_extensions: IGNORED_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_list(name: &str) -> Option<Vec<String>> {
    std::env::var(name).ok().map(|v| {
        v.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    })
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(encoding) = std::env::var("LINKSCOUT_ENCODING") {
            config.extraction.default_encoding = encoding;
        }

        if let Some(len) = std::env::var("LINKSCOUT_MAX_URL_LENGTH")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
        {
            config.extraction.max_url_length = len;
        }

        if let Some(patterns) = env_list("LINKSCOUT_FOLLOW_PATTERNS") {
            config.filter.follow_patterns = patterns;
        }

        if let Some(patterns) = env_list("LINKSCOUT_EXCLUDE_PATTERNS") {
            config.filter.exclude_patterns = patterns;
        }

        if let Some(respect) = std::env::var("LINKSCOUT_RESPECT_NOFOLLOW")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
        {
            config.filter.respect_nofollow = respect;
        }

        if let Ok(mode) = std::env::var("LINKSCOUT_LINKS_TO_FOLLOW") {
            config.filter.links_to_follow = mode
                .parse::<LinksToFollow>()
                .context("Invalid LINKSCOUT_LINKS_TO_FOLLOW")?;
        }

        if let Ok(level) = std::env::var("LINKSCOUT_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(format) = std::env::var("LINKSCOUT_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// Compiles the filter patterns, so a bad regex is reported here rather
    /// than on the first page.
    pub fn validate(&self) -> Result<()> {
        if encoding_rs::Encoding::for_label(self.extraction.default_encoding.trim().as_bytes())
            .is_none()
        {
            return Err(crate::utils::error::ParseError::UnknownEncoding(
                self.extraction.default_encoding.clone(),
            ))
            .context("default_encoding is not a known encoding label");
        }

        if self.extraction.max_url_length == 0 {
            anyhow::bail!("max_url_length must be greater than 0");
        }

        if self.extraction.allowed_schemes.is_empty() {
            anyhow::bail!("allowed_schemes must not be empty");
        }

        self.link_filter()
            .context("Invalid link filter configuration")?;

        Ok(())
    }

    /// Compile the configured link filter
    ///
    /// # Errors
    ///
    /// Returns `Error::Filter` naming the first pattern that does not compile.
    pub fn link_filter(&self) -> crate::error::Result<LinkFilter> {
        Ok(self.filter.compile()?)
    }
}
