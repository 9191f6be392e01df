//! Substring search over indexed release names.

use crate::error::Result;
use crate::index::IndexStore;
use serde::Serialize;

/// Result of one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub query: String,
    pub limit: usize,
    /// Size of the full match set, independent of `limit`.
    pub total_matches: usize,
    /// Selected paths in ascending order.
    pub paths: Vec<String>,
}

/// Runs case-insensitive substring queries against the index.
pub struct SearchEngine<'a, S: IndexStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: IndexStore + ?Sized> SearchEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Search for `query`, returning at most `limit` paths.
    pub fn search(&self, query: &str, limit: usize) -> Result<SearchOutcome> {
        let matches = self.store.find_substring(query)?;

        Ok(SearchOutcome {
            query: query.to_string(),
            limit,
            total_matches: matches.len(),
            paths: select_smallest(&matches, limit),
        })
    }
}

/// Take `limit` paths from the tail of a path-descending list, smallest first.
///
/// This surfaces the lexicographically smallest matches rather than the
/// greatest ones, which is how the index has always answered searches.
pub fn select_smallest(descending: &[String], limit: usize) -> Vec<String> {
    descending.iter().rev().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::SqliteReleaseIndex;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_smallest() {
        let descending = paths(&["/d", "/c", "/b", "/a"]);
        assert_eq!(select_smallest(&descending, 2), paths(&["/a", "/b"]));
        assert_eq!(select_smallest(&descending, 10), paths(&["/a", "/b", "/c", "/d"]));
        assert!(select_smallest(&descending, 0).is_empty());
        assert!(select_smallest(&[], 5).is_empty());
    }

    #[test]
    fn test_total_matches_ignores_limit() {
        let index = SqliteReleaseIndex::open_in_memory().unwrap();
        for year in 2010..2015 {
            let name = format!("Album_{}", year);
            index.upsert(&format!("/mp3/{}", name), &name).unwrap();
        }

        let outcome = SearchEngine::new(&index).search("album", 2).unwrap();

        assert_eq!(outcome.total_matches, 5);
        assert_eq!(outcome.paths, paths(&["/mp3/Album_2010", "/mp3/Album_2011"]));
    }

    #[test]
    fn test_no_match_is_empty_outcome() {
        let index = SqliteReleaseIndex::open_in_memory().unwrap();
        index.upsert("/mp3/Album_2010", "Album_2010").unwrap();

        let outcome = SearchEngine::new(&index).search("nothing", 50).unwrap();

        assert_eq!(outcome.total_matches, 0);
        assert!(outcome.paths.is_empty());
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = SearchOutcome {
            query: "album".into(),
            limit: 50,
            total_matches: 1,
            paths: paths(&["/mp3/Album_2010"]),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["totalMatches"], 1);
        assert_eq!(json["paths"][0], "/mp3/Album_2010");
    }
}
