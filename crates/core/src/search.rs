use rayon::prelude::*;

use crate::header::{FileEntry, HeaderTable};
use crate::spec::{MatchMode, ValueSpec};

/// Per-file, per-keyword outcome of one predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub keyword: String,
    pub matched: bool,
    /// Normalized textual value used for logging and grouping. Empty
    /// when the keyword is absent, and always empty for a
    /// negative-presence predicate.
    pub display: String,
}

/// All predicate outcomes for one file, in predicate order.
#[derive(Debug, Clone, PartialEq)]
pub struct FileQueryResult {
    pub ident: String,
    /// AND over every predicate; vacuously true when there are none.
    pub matched: bool,
    pub results: Vec<MatchResult>,
}

impl FileQueryResult {
    /// Display value for a keyword, as produced by its predicate.
    pub fn display_of(&self, keyword: &str) -> Option<&str> {
        let keyword = crate::header::canonical_key(keyword);
        self.results
            .iter()
            .find(|r| r.keyword == keyword)
            .map(|r| r.display.as_str())
    }
}

/// Evaluate a single predicate against a single header.
///
/// A record whose value has an incompatible type is a non-match, not
/// an error: header data is heterogeneous and sparse by nature.
pub fn evaluate(spec: &ValueSpec, entry: &FileEntry) -> MatchResult {
    let value = entry.header.get(&spec.keyword);
    let (matched, display) = match (&spec.mode, value) {
        (MatchMode::Literal(wanted), Some(found)) => (found.loose_eq(wanted), found.to_string()),
        (MatchMode::Literal(_), None) => {
            tracing::debug!(
                keyword = spec.keyword.as_str(),
                file = entry.ident.as_str(),
                "keyword not present"
            );
            (false, String::new())
        }
        (MatchMode::Regex(pattern), Some(found)) => {
            // Match anchored at the start of the value, like re.match:
            // a hit elsewhere in the string does not count.
            let text = found.to_string();
            match pattern.find(&text) {
                Some(hit) if hit.start() == 0 => (true, hit.as_str().to_string()),
                _ => (false, String::new()),
            }
        }
        (MatchMode::Regex(_), None) => (false, String::new()),
        (MatchMode::PresencePositive, Some(found)) => (true, found.to_string()),
        (MatchMode::PresencePositive, None) => (false, String::new()),
        // Negative presence always normalizes to the empty string so
        // logs and group keys never show a value for a keyword the
        // caller asked to exclude.
        (MatchMode::PresenceNegative, found) => (found.is_none(), String::new()),
    };
    MatchResult {
        keyword: spec.keyword.clone(),
        matched,
        display,
    }
}

/// Evaluate every predicate against every file, preserving input
/// order. Nothing is filtered here: callers that want only matches
/// keep the `matched` entries, callers that want an annotated listing
/// (a log view) take everything.
///
/// Every predicate is evaluated even after one has failed, so each
/// result carries a display value for reporting.
pub fn search(files: &[FileEntry], specs: &[ValueSpec]) -> Vec<FileQueryResult> {
    files
        .par_iter()
        .map(|entry| {
            let results: Vec<MatchResult> =
                specs.iter().map(|spec| evaluate(spec, entry)).collect();
            FileQueryResult {
                ident: entry.ident.clone(),
                matched: results.iter().all(|r| r.matched),
                results,
            }
        })
        .collect()
}

impl HeaderTable {
    /// Filter the table down to the entries matching every predicate.
    pub fn search(&self, specs: &[ValueSpec]) -> HeaderTable {
        let outcomes = search(self.entries(), specs);
        self.iter()
            .zip(outcomes)
            .filter(|(_, outcome)| outcome.matched)
            .map(|(entry, _)| entry.clone())
            .collect()
    }

    /// Annotated results for every entry, matched or not.
    pub fn query(&self, specs: &[ValueSpec]) -> Vec<FileQueryResult> {
        search(self.entries(), specs)
    }
}
