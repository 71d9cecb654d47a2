use crate::parsers::{ContentRegion, ExtractedLinks};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static MAIN_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(ContentRegion::Main.selector()).expect("valid selector"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(ContentRegion::Body.selector()).expect("valid selector"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Extracts href values from the page's content region.
///
/// The first `<main>` element is scanned if there is one, otherwise the
/// document body. Hrefs are returned in document order, without
/// deduplication or resolution against a base URL.
pub fn extract_links(html: &str) -> ExtractedLinks {
    let doc = Html::parse_document(html);

    let Some((region, scope)) = find_content_region(&doc) else {
        ::log::debug!("HTML parser found no content region");
        return ExtractedLinks::empty();
    };

    let links = links_within(scope);

    ::log::debug!(
        "HTML parser found {} links in <{}>",
        links.len(),
        region.selector()
    );
    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    ExtractedLinks::new(region, links)
}

/// Locate the subtree to scan: the first `<main>`, else `<body>`
fn find_content_region(doc: &Html) -> Option<(ContentRegion, ElementRef<'_>)> {
    if let Some(main) = doc.select(&MAIN_SELECTOR).next() {
        return Some((ContentRegion::Main, main));
    }
    doc.select(&BODY_SELECTOR)
        .next()
        .map(|body| (ContentRegion::Body, body))
}

fn links_within(scope: ElementRef<'_>) -> Vec<String> {
    scope
        .select(&LINK_SELECTOR)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect()
}
