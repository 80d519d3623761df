//! Regex tag scanner
//!
//! Produces the flat tag stream the link extractor consumes. Comments,
//! doctypes and CDATA sections are skipped, and the raw text inside
//! `<script>`/`<style>` is never scanned for tags (the elements' own open and
//! close tags are still reported). Attribute values are returned verbatim;
//! entity decoding is left to consumers.

use std::sync::OnceLock;

use regex::Regex;

use super::{Attributes, HtmlTag, TagKind};

/// Elements whose content is raw text
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn tag_regex() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<![^>]*>|<(/)?\s*([a-zA-Z][\w:.\-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#,
        )
        .expect("Invalid regex pattern")
    })
}

fn attr_regex() -> &'static Regex {
    static ATTR_RE: OnceLock<Regex> = OnceLock::new();
    ATTR_RE.get_or_init(|| {
        Regex::new(r#"([^\s=/>"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+)))?"#)
            .expect("Invalid regex pattern")
    })
}

fn raw_text_end_regex(element: &str) -> Option<&'static Regex> {
    static SCRIPT_END: OnceLock<Regex> = OnceLock::new();
    static STYLE_END: OnceLock<Regex> = OnceLock::new();
    match element {
        "script" => Some(SCRIPT_END.get_or_init(|| {
            Regex::new(r"(?i)</\s*script[^>]*>").expect("Invalid regex pattern")
        })),
        "style" => Some(STYLE_END.get_or_init(|| {
            Regex::new(r"(?i)</\s*style[^>]*>").expect("Invalid regex pattern")
        })),
        _ => None,
    }
}

/// Scan `body` into an ordered list of tags with byte offsets
#[must_use]
pub fn scan_tags(body: &str) -> Vec<HtmlTag> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(caps) = tag_regex().captures_at(body, pos) {
        let whole = caps.get(0).map_or(pos..pos, |m| m.range());
        pos = whole.end.max(pos + 1);

        let Some(name) = caps.get(2) else {
            // comment, doctype or CDATA
            continue;
        };
        let name = name.as_str().to_ascii_lowercase();

        if caps.get(1).is_some() {
            tags.push(HtmlTag::close(name, whole.start, whole.end));
            continue;
        }

        let raw_attrs = caps.get(3).map_or("", |m| m.as_str()).trim_end();
        let (raw_attrs, self_closing) = match raw_attrs.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (raw_attrs, false),
        };

        let tag = HtmlTag {
            name,
            kind: TagKind::Open,
            attributes: parse_attributes(raw_attrs),
            start: whole.start,
            end: whole.end,
        };

        if !self_closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) {
            if let Some(end_re) = raw_text_end_regex(&tag.name) {
                pos = end_re
                    .find_at(body, whole.end)
                    .map_or(body.len(), |m| m.start());
            }
        }

        tags.push(tag);
    }

    tracing::trace!(tags = tags.len(), bytes = body.len(), "Scanned tag stream");
    tags
}

fn parse_attributes(raw: &str) -> Attributes {
    let mut attrs = Attributes::new();
    for caps in attr_regex().captures_iter(raw) {
        let Some(name) = caps.get(1) else { continue };
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().to_string());
        attrs.insert(name.as_str(), value);
    }
    attrs
}
