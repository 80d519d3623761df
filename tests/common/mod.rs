//! Common test utilities

use linkscout::{HtmlPage, Link};
use std::fs;

/// Test fixture directory
pub const FIXTURES_DIR: &str = "tests/fixtures/html";

/// Load an HTML fixture by file name
#[allow(dead_code)]
pub fn load_fixture(filename: &str) -> String {
    let path = format!("{FIXTURES_DIR}/{filename}");
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

/// Tokenize a fixture as if fetched from `url`
#[allow(dead_code)]
pub fn fixture_page(filename: &str, url: &str) -> HtmlPage {
    HtmlPage::new(url, load_fixture(filename), "utf-8")
}

/// Extract all links from an inline body
#[allow(dead_code)]
pub fn links_in(url: &str, body: &str) -> Vec<Link> {
    HtmlPage::new(url, body, "utf-8").links().collect()
}

/// Shorthand for an expected link
#[allow(dead_code)]
pub fn link(url: &str, text: Option<&str>, nofollow: bool) -> Link {
    Link::new(url, text.map(String::from), nofollow)
}
