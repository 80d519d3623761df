//! Turning a page's links into a deduplicated follow list

use std::collections::HashSet;

use super::LinkFilter;
use crate::extractor::{Link, LinkExtractor};
use crate::parser::HtmlPage;

/// Links accepted by `filter`, first occurrence of each URL only
pub fn requests_to_follow<'f, I>(links: I, filter: &'f LinkFilter) -> impl Iterator<Item = Link> + 'f
where
    I: IntoIterator<Item = Link>,
    I::IntoIter: 'f,
{
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(move |link| filter.is_followable(link))
        .filter(move |link| seen.insert(link.url.clone()))
}

/// Follow list for a page, restricted to link regions when there are any
///
/// Each region is a fragment of the page's markup picked out by an earlier
/// extraction step; it is tokenized and scanned as a page of its own, with
/// the page URL and encoding. URLs are deduplicated across all regions.
pub fn follow_links_in_regions(
    page: &HtmlPage,
    regions: &[String],
    extractor: &LinkExtractor,
    filter: &LinkFilter,
) -> Vec<Link> {
    if regions.is_empty() {
        return requests_to_follow(extractor.links_to_follow(page), filter).collect();
    }

    let region_pages: Vec<HtmlPage> = regions.iter().map(|region| page.region(region)).collect();
    let links = region_pages
        .iter()
        .flat_map(|region| extractor.links_to_follow(region));
    let followed: Vec<Link> = requests_to_follow(links, filter).collect();

    tracing::debug!(
        url = %page.url,
        regions = regions.len(),
        links = followed.len(),
        "Collected links from regions"
    );
    followed
}
