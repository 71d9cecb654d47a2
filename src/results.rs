use crate::utils::to_json_pretty;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// What a single run of the pipeline produced
#[derive(Debug, Clone, PartialEq)]
pub enum SiftOutcome {
    /// The page request returned a non-success status; nothing else ran
    FetchFailed { status: u16 },

    /// The page had no links in its content region; the LLM was not asked
    NoLinks,

    /// The LLM provider answered with a non-success status
    FilterRejected {
        extracted: usize,
        status: u16,
        body: String,
    },

    /// The LLM kept nothing, or its reply was unusable (`reason` says why)
    NoRelevantLinks {
        extracted: usize,
        reason: Option<String>,
    },

    /// The filtered links were written to `path`
    Saved {
        extracted: usize,
        links: Vec<Value>,
        path: PathBuf,
    },
}

impl SiftOutcome {
    /// Links written by this run, empty for every other outcome
    pub fn links(&self) -> &[Value] {
        match self {
            SiftOutcome::Saved { links, .. } => links,
            _ => &[],
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SiftOutcome::Saved { .. })
    }
}

/// Write `links` to `path` as a JSON array indented with four spaces.
///
/// Items are written as given. Any existing file is replaced.
pub fn save_links<T: Serialize>(
    links: &[T],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    let json = to_json_pretty(links)?;
    fs::write(path, json)?;

    ::log::debug!("Wrote {} links to {}", links.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_links_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_links.json");
        let links = vec!["/rebates/1".to_string(), "/grants/2".to_string()];

        save_links(&links, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, json!(["/rebates/1", "/grants/2"]));
        assert!(written.contains("\n    \"/rebates/1\""));
    }

    #[test]
    fn test_save_links_writes_non_string_items_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_links.json");
        let links = vec![json!({ "url": "/rebates", "title": "Rebates" }), json!(7)];

        save_links(&links, &path).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, json!([{ "url": "/rebates", "title": "Rebates" }, 7]));
    }

    #[test]
    fn test_save_links_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_links.json");
        fs::write(&path, "stale contents that are much longer than the new ones").unwrap();

        save_links(&["/loans"], &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n    \"/loans\"\n]");
    }

    #[test]
    fn test_save_links_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.json");
        assert!(save_links(&["/a"], &path).is_err());
    }

    #[test]
    fn test_outcome_links() {
        let saved = SiftOutcome::Saved {
            extracted: 3,
            links: vec![json!("/a")],
            path: PathBuf::from("out.json"),
        };
        assert!(saved.is_saved());
        assert_eq!(saved.links(), [json!("/a")]);

        let failed = SiftOutcome::FetchFailed { status: 500 };
        assert!(!failed.is_saved());
        assert!(failed.links().is_empty());
    }
}
