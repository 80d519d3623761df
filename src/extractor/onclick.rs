//! Navigation targets in inline `onclick` handlers
//!
//! This is a pattern match, not a JavaScript parser. The first quoted string
//! literal in the handler is taken as the target, which covers the common
//! `window.open('page.html', 'win')` and `location.href='page.html'` forms.
//! Handlers whose first literal is not a URL (`confirm('Sure?') && go('x')`)
//! yield that literal anyway.

use std::sync::OnceLock;

use regex::Regex;

fn onclick_link_regex() -> &'static Regex {
    static ONCLICK_LINK_RE: OnceLock<Regex> = OnceLock::new();
    ONCLICK_LINK_RE
        .get_or_init(|| Regex::new(r#"'(.+?)'|"(.+?)""#).expect("Invalid regex pattern"))
}

/// First quoted literal in an `onclick` handler
#[must_use]
pub fn onclick_target(script: &str) -> Option<&str> {
    let caps = onclick_link_regex().captures(script)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}
