//! Link extraction tests over inline markup and HTML fixtures

mod common;

use common::{fixture_page, link, links_in};
use linkscout::extractor::{extract_links, LinkExtractor};
use linkscout::parser::{Attributes, Document, HtmlTag};
use linkscout::HtmlPage;
use proptest::prelude::*;

const SITE: &str = "http://scrapinghub.com/";

// ============================================================================
// Anchors
// ============================================================================

#[test]
fn test_single_anchor_absolute() {
    let links = links_in(SITE, "Please visit <a href='http://scrapinghub.com/'>Scrapinghub</a>");
    assert_eq!(links, vec![link("http://scrapinghub.com/", Some("Scrapinghub"), false)]);
}

#[test]
fn test_single_anchor_relative() {
    let links = links_in(SITE, "Go <a href='home.html'>Home</a>");
    assert_eq!(links, vec![link("http://scrapinghub.com/home.html", Some("Home"), false)]);
}

#[test]
fn test_relative_page_url_keeps_links_relative() {
    let links = links_in("", "Go <a href='home.html'>Home</a>");
    assert_eq!(links, vec![link("home.html", Some("Home"), false)]);
}

#[test]
fn test_fragment_only_href() {
    assert!(links_in(SITE, "<a href='#'>top</a>").is_empty());
    assert!(links_in("http://www.example.com", "<html><a href='#section1' >").is_empty());
}

#[test]
fn test_malformed_anchors_flatten() {
    let links = links_in("", "<a href='foo'>foo <a href=bar>bar</a><a href='baz'/>baz");
    assert_eq!(
        links,
        vec![
            link("foo", Some("foo "), false),
            link("bar", Some("bar"), false),
            link("baz", Some("baz"), false),
        ]
    );
}

#[test]
fn test_nofollow_anchor() {
    let links = links_in("", "<a href='somewhere.html' rel='nofollow'>somewhere</a>");
    assert_eq!(links, vec![link("somewhere.html", Some("somewhere"), true)]);
}

#[test]
fn test_whitespace_trimmed_in_href_and_base() {
    let links = links_in("", "<head><base href=' foo/ '/></head><a href='bar '/>baz");
    assert_eq!(links, vec![link("foo/bar", Some("baz"), false)]);
}

#[test]
fn test_entities_decoded_in_href() {
    let links = links_in(SITE, "<a href='list?a=1&amp;b=&#50;'>l</a>");
    assert_eq!(links[0].url, "http://scrapinghub.com/list?a=1&b=2");
}

// ============================================================================
// Head section
// ============================================================================

#[test]
fn test_base_href_relative() {
    let links = links_in(
        SITE,
        "<html><head><base href='myproject/'/></head><body>see my <a href='index.html'>project</a></body>",
    );
    assert_eq!(
        links,
        vec![link("http://scrapinghub.com/myproject/index.html", Some("project"), false)]
    );
}

#[test]
fn test_base_href_absolute() {
    let links = links_in(
        SITE,
        "<html><head><base href='http://scrape.io/myproject/'/></head><body>see my <a href='index.html'>project</a></body>",
    );
    assert_eq!(links[0].url, "http://scrape.io/myproject/index.html");
}

#[test]
fn test_later_base_rejoins_document_url() {
    let links = links_in(
        "http://example.com/site/",
        "<head><base href='one/'><base href='two/'></head><a href='x.html'>x</a>",
    );
    assert_eq!(links[0].url, "http://example.com/site/two/x.html");
}

#[test]
fn test_meta_refresh() {
    let links = links_in(
        "",
        "<html><head><meta http-equiv='refresh' content='5;url=http://example.com/' />",
    );
    assert_eq!(links, vec![link("http://example.com/", None, false)]);
}

#[test]
fn test_head_link_tags() {
    let links = links_in(
        "http://example.blogspot.com/",
        "<html><head><link rel='me' href='http://www.blogger.com/profile/987372' /></head><body>This is my body!</body></html>",
    );
    assert_eq!(
        links,
        vec![link("http://www.blogger.com/profile/987372", None, false)]
    );
}

// ============================================================================
// Frames, areas, onclick
// ============================================================================

#[test]
fn test_frames_and_iframes() {
    let page = fixture_page("frameset.html", "http://example.com/frames/");
    let urls: Vec<_> = page.links().map(|l| l.url).collect();
    assert_eq!(
        urls,
        vec![
            "http://example.com/frames/menu.html",
            "http://example.com/frames/content.html",
            "http://example.com/frames/ad.html",
        ]
    );
}

#[test]
fn test_onclick_window_open() {
    let links = links_in(
        "http://www.example.com",
        "<html><td onclick=window.open('page.html?productid=23','win2') >",
    );
    assert_eq!(
        links,
        vec![link("http://www.example.com/page.html?productid=23", None, false)]
    );
}

#[test]
fn test_onclick_on_anchor_without_href() {
    let links = links_in(
        "http://www.example.com",
        "<html><a onclick=window.open('page.html?productid=24','win2') >",
    );
    assert_eq!(
        links,
        vec![link("http://www.example.com/page.html?productid=24", None, false)]
    );
}

#[test]
fn test_onclick_location_assignment() {
    let links = links_in(
        "",
        "<html><div onclick=window.location.href='http://www.jungleberry.co.uk/Fair-Trade-Earrings/Aguas-Earrings.htm'>",
    );
    assert_eq!(
        links[0].url,
        "http://www.jungleberry.co.uk/Fair-Trade-Earrings/Aguas-Earrings.htm"
    );
}

#[test]
fn test_onclick_nofollow() {
    let links = links_in(SITE, "<span rel='nofollow' onclick=\"go('x.html')\">x</span>");
    assert!(links[0].nofollow);
}

// ============================================================================
// Full page
// ============================================================================

#[test]
fn test_catalog_fixture_document_order() {
    let page = fixture_page("catalog_page.html", "http://garden.example.com/index.php");
    let links: Vec<_> = page.links().collect();
    let shop = "http://garden.example.com/shop";

    let expected = vec![
        link(&format!("{shop}/catalog.html"), None, false),
        link("http://garden.example.com/static/site.css", None, false),
        link(&format!("{shop}/catalog.html?refresh=1"), None, false),
        link(&format!("{shop}/index.html"), Some("Home"), false),
        link(&format!("{shop}/products/?cat=tools&page=2"), Some("Tools, page 2"), false),
        link("http://garden.example.com/account/logout", Some("Log out"), true),
        link(
            &format!("{shop}/products/rake.html"),
            Some("<img src=\"img/rake.png\" alt=\"\">Steel rake"),
            false,
        ),
        link(&format!("{shop}/products/hoe.html"), Some("Garden hoe\n    "), false),
        link(&format!("{shop}/products/shears.html"), Some("Shears"), false),
        link(&format!("{shop}/stores/north.html"), Some("North store"), false),
        link(&format!("{shop}/stores/south.html"), Some(""), true),
        link(&format!("{shop}/products/gloves.html"), None, false),
        link("https://videos.example.net/embed/42", None, false),
        link(&format!("{shop}/downloads/catalog.pdf"), Some("PDF catalog"), false),
        link("mailto:sales@example.com", Some("Contact sales"), false),
        link(&format!("{shop}/index.html"), Some("Home again"), false),
    ];
    assert_eq!(links, expected);
}

#[test]
fn test_catalog_fixture_links_to_follow() {
    let page = fixture_page("catalog_page.html", "http://garden.example.com/index.php");
    let urls: Vec<_> = LinkExtractor::default()
        .links_to_follow(&page)
        .map(|l| l.url)
        .collect();

    assert!(!urls.iter().any(|u| u.ends_with(".css") || u.ends_with(".pdf")));
    assert!(!urls.iter().any(|u| u.starts_with("mailto:")));
    assert!(!urls.iter().any(|u| u.contains("never.html") || u.contains("commented.html")));
    assert_eq!(urls.len(), 13);
}

#[test]
fn test_external_tag_stream() {
    let body = "<a href='x.html'>X</a>";
    let href: Attributes = [("href", Some("x.html"))].into_iter().collect();
    let tags = vec![HtmlTag::open("a", href, 0, 17), HtmlTag::close("a", 18, 22)];
    let document = Document {
        url: "http://example.com/",
        body,
        encoding: "utf-8",
    };

    let links: Vec<_> = extract_links(&tags, document).collect();
    assert_eq!(links, vec![link("http://example.com/x.html", Some("X"), false)]);
}

#[test]
fn test_page_from_external_tags() {
    let body = "<head><base href='sub/'></head><a href='x.html' rel='nofollow'>X</a>";
    let base: Attributes = [("href", Some("sub/"))].into_iter().collect();
    let anchor: Attributes = [("href", Some("x.html")), ("rel", Some("nofollow"))]
        .into_iter()
        .collect();
    let tags = vec![
        HtmlTag::open("head", Attributes::new(), 0, 6),
        HtmlTag::open("base", base, 6, 24),
        HtmlTag::close("head", 24, 31),
        HtmlTag::open("a", anchor, 31, 63),
        HtmlTag::close("a", 64, 68),
    ];

    let page = HtmlPage::from_tags("http://example.com/dir/", body, "utf-8", tags);
    assert_eq!(page.tags().len(), 5);

    let links: Vec<_> = page.links().collect();
    assert_eq!(links, vec![link("http://example.com/dir/sub/x.html", Some("X"), true)]);
}

#[test]
fn test_latin1_query_encoding() {
    let page = HtmlPage::new(
        "http://example.com/",
        "<a href='search?q=caf&eacute;'>cafe</a>",
        "iso-8859-1",
    );
    let links: Vec<_> = page.links().collect();
    assert_eq!(links[0].url, "http://example.com/search?q=caf%E9");
}

#[test]
fn test_concurrent_extraction() {
    let page = fixture_page("catalog_page.html", "http://garden.example.com/index.php");
    let expected: Vec<_> = page.links().collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| page.links().collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

proptest! {
    #[test]
    fn prop_extraction_is_deterministic(body in "[<>a-z/='\" #.;:]{0,200}") {
        let page = HtmlPage::new("http://example.com/a/", body, "utf-8");
        let first: Vec<_> = page.links().collect();
        let second: Vec<_> = page.links().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_fragment_always_empty(href in "[a-z#?=/.]{1,30}", text in "[a-z ]{0,20}") {
        let body = format!("<a href='{href}'>{text}</a><area href='{href}'>");
        let links = links_in("http://example.com/", &body);
        prop_assert!(links.iter().all(|l| l.fragment.is_empty()));
    }
}
