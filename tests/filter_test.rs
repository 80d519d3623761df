//! Link filter policy tests

mod common;

use common::{fixture_page, link};
use linkscout::error::{Error, ErrorCategory, LinkscoutErrorTrait};
use linkscout::extractor::LinkExtractor;
use linkscout::filter::{requests_to_follow, FilterConfig, LinkFilter, LinksToFollow};

fn compile(config: FilterConfig) -> LinkFilter {
    LinkFilter::new(&config).expect("filter should compile")
}

#[test]
fn test_nofollow_with_respect_and_no_patterns() {
    let filter = compile(FilterConfig::default());
    let followed = link("http://example.com/a", Some("a"), false);
    let nofollow = link("http://example.com/a", Some("a"), true);
    assert!(filter.is_followable(&followed));
    assert!(!filter.is_followable(&nofollow));
}

#[test]
fn test_none_rejects_everything() {
    let filter = compile(FilterConfig {
        follow_patterns: vec![String::from("example")],
        respect_nofollow: false,
        links_to_follow: LinksToFollow::None,
        ..Default::default()
    });
    for nofollow in [false, true] {
        assert!(!filter.is_followable(&link("http://example.com/", None, nofollow)));
    }
}

#[test]
fn test_patterns_mode_matches_all_mode() {
    let patterns = vec![String::from(r"/item/\d+")];
    let all = compile(FilterConfig {
        follow_patterns: patterns.clone(),
        ..Default::default()
    });
    let by_pattern = compile(FilterConfig {
        follow_patterns: patterns,
        links_to_follow: LinksToFollow::Patterns,
        ..Default::default()
    });

    for url in ["http://a.com/item/7", "http://a.com/item/x", "http://a.com/"] {
        let l = link(url, None, false);
        assert_eq!(all.is_followable(&l), by_pattern.is_followable(&l), "{url}");
    }
}

#[test]
fn test_anchored_patterns_still_search() {
    let filter = compile(FilterConfig {
        follow_patterns: vec![String::from(r"\.html$")],
        exclude_patterns: vec![String::from("^https://")],
        ..Default::default()
    });
    assert!(filter.is_followable(&link("http://a.com/x.html", None, false)));
    assert!(!filter.is_followable(&link("http://a.com/x.html?y", None, false)));
    assert!(!filter.is_followable(&link("https://a.com/x.html", None, false)));
}

#[test]
fn test_invalid_regex_surfaces_config_error() {
    let err: Error = FilterConfig {
        follow_patterns: vec![String::from("*bad")],
        ..Default::default()
    }
    .compile()
    .unwrap_err()
    .into();

    assert_eq!(err.category(), ErrorCategory::Config);
    assert!(!err.is_recoverable());
    assert!(err.to_string().contains("*bad"));
}

#[test]
fn test_catalog_follow_list() {
    let page = fixture_page("catalog_page.html", "http://garden.example.com/index.php");
    let filter = compile(FilterConfig {
        exclude_patterns: vec![String::from("videos\\.example\\.net")],
        ..Default::default()
    });
    let extractor = LinkExtractor::default();

    let urls: Vec<_> = requests_to_follow(extractor.links_to_follow(&page), &filter)
        .map(|l| l.url)
        .collect();

    let shop = "http://garden.example.com/shop";
    assert_eq!(
        urls,
        vec![
            format!("{shop}/catalog.html"),
            format!("{shop}/catalog.html?refresh=1"),
            format!("{shop}/index.html"),
            format!("{shop}/products/?cat=tools&page=2"),
            format!("{shop}/products/rake.html"),
            format!("{shop}/products/hoe.html"),
            format!("{shop}/products/shears.html"),
            format!("{shop}/stores/north.html"),
            format!("{shop}/products/gloves.html"),
        ]
    );
}

#[test]
fn test_filter_shared_across_threads() {
    let filter = std::sync::Arc::new(compile(FilterConfig {
        follow_patterns: vec![String::from("keep")],
        ..Default::default()
    }));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let filter = std::sync::Arc::clone(&filter);
            std::thread::spawn(move || {
                let url = if i % 2 == 0 { "http://a.com/keep" } else { "http://a.com/drop" };
                filter.is_followable(&link(url, None, false))
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, false, true, false]);
}
