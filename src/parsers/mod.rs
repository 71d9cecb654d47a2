pub mod html;

#[cfg(test)]
mod tests;

/// Part of the document that links were collected from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRegion {
    /// The first `<main>` element
    Main,
    /// The document body (no `<main>` present)
    Body,
}

impl ContentRegion {
    /// CSS selector for the region
    pub fn selector(&self) -> &'static str {
        match self {
            ContentRegion::Main => "main",
            ContentRegion::Body => "body",
        }
    }
}

/// Result of extracting links from a page
#[derive(Debug, Clone, Default)]
pub struct ExtractedLinks {
    /// Region that was scanned, if any was found
    pub region: Option<ContentRegion>,
    /// href values in document order
    pub links: Vec<String>,
}

impl ExtractedLinks {
    /// Creates a new result for links found in the given region
    pub fn new(region: ContentRegion, links: Vec<String>) -> Self {
        Self {
            region: Some(region),
            links,
        }
    }

    /// Creates a result for a document with no content region
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
