//! URL construction helpers: entity decoding and relative joins

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use url::Url;

/// Look up an encoding label, falling back to UTF-8 for unknown labels
#[must_use]
pub fn resolve_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
        tracing::debug!(label, "Unknown encoding label, using utf-8");
        UTF_8
    })
}

/// Decode HTML character references (`&amp;`, `&#47;`, `&eacute;`, ...)
#[must_use]
pub fn decode_entities(raw: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(raw)
}

fn query_encoder<F>(f: F) -> F
where
    F: Fn(&str) -> Cow<'_, [u8]>,
{
    f
}

/// Join `reference` against `base`
///
/// With an absolute `base` this follows WHATWG URL parsing, so empty,
/// query-only, fragment-only and scheme-relative references all resolve the
/// way a browser would. Query strings are percent-encoded in `encoding`.
/// References that fail to parse are returned unchanged.
///
/// When `base` is itself relative (or empty), a plain path merge is done
/// instead and the result stays relative.
#[must_use]
pub fn join_url(base: &str, reference: &str, encoding: &'static Encoding) -> String {
    let Ok(base_url) = Url::parse(base) else {
        return join_relative(base, reference);
    };

    let encode = query_encoder(move |s| encoding.encode(s).0);
    let encoding_override: Option<&dyn Fn(&str) -> Cow<'_, [u8]>> =
        if encoding == UTF_8 { None } else { Some(&encode) };

    match Url::options()
        .base_url(Some(&base_url))
        .encoding_override(encoding_override)
        .parse(reference)
    {
        Ok(joined) => joined.into(),
        Err(err) => {
            tracing::trace!(base, reference, error = %err, "Could not join reference");
            reference.to_string()
        }
    }
}

fn join_relative(base: &str, reference: &str) -> String {
    if reference.is_empty() {
        return base.to_string();
    }
    if base.is_empty() || Url::parse(reference).is_ok() {
        return reference.to_string();
    }
    if reference.starts_with('/') {
        return remove_dot_segments(reference);
    }

    let without_fragment = base.split('#').next().unwrap_or(base);
    if reference.starts_with('#') {
        return format!("{without_fragment}{reference}");
    }

    let path = without_fragment.split('?').next().unwrap_or(without_fragment);
    if reference.starts_with('?') {
        return format!("{path}{reference}");
    }

    match path.rfind('/') {
        Some(idx) => remove_dot_segments(&format!("{}{reference}", &path[..=idx])),
        None => remove_dot_segments(reference),
    }
}

/// Drop `.` and `..` path segments, leaving any query or fragment as is
fn remove_dot_segments(url: &str) -> String {
    let split = url.find(['?', '#']).unwrap_or(url.len());
    let (path, rest) = url.split_at(split);
    let (root, path) = match path.strip_prefix('/') {
        Some(stripped) => ("/", stripped),
        None => ("", path),
    };

    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len() - 1;
    let mut out: Vec<&str> = Vec::with_capacity(segments.len());
    for (i, segment) in segments.into_iter().enumerate() {
        match segment {
            "." => {}
            ".." => {
                out.pop();
            }
            other => {
                out.push(other);
                continue;
            }
        }
        // a trailing dot segment still names a directory
        if i == last {
            out.push("");
        }
    }

    format!("{root}{}{rest}", out.join("/"))
}
