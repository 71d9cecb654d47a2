use crate::parsers::html;

#[cfg(test)]
mod basic_tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let result = html::extract_links("");
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_anchors_in_content_region() {
        let input = "<html><body><main><p>Nothing to see here.</p></main></body></html>";
        let result = html::extract_links(input);
        assert!(result.links.is_empty());
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let input = r#"<main><a href="/x">X</a><a>no-href</a></main>"#;
        let result = html::extract_links(input);
        assert_eq!(result.links, vec!["/x"]);
    }

    #[test]
    fn test_empty_href_is_kept() {
        let input = r#"<main><a href="">empty</a></main>"#;
        let result = html::extract_links(input);
        assert_eq!(result.links, vec![""]);
    }
}

#[cfg(test)]
mod ordering_tests {
    use super::*;

    #[test]
    fn test_document_order_preserved() {
        let input = r#"<main>
            <a href="/c">C</a>
            <div><a href="/a">A</a></div>
            <p><span><a href="/b">B</a></span></p>
        </main>"#;
        let result = html::extract_links(input);
        assert_eq!(result.links, vec!["/c", "/a", "/b"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let input = r#"<main><a href="/rebates">1</a><a href="/rebates">2</a></main>"#;
        let result = html::extract_links(input);
        assert_eq!(result.links, vec!["/rebates", "/rebates"]);
    }

    #[test]
    fn test_hrefs_not_normalized() {
        let input = r##"<main>
            <a href="relative/page">rel</a>
            <a href="https://example.com/abs">abs</a>
            <a href="#section">frag</a>
            <a href="mailto:info@example.com">mail</a>
        </main>"##;
        let result = html::extract_links(input);
        assert_eq!(
            result.links,
            vec![
                "relative/page",
                "https://example.com/abs",
                "#section",
                "mailto:info@example.com",
            ]
        );
    }
}
