use indexmap::IndexMap;
use itertools::Itertools;

use crate::header::{canonical_key, FileEntry, HeaderTable};
use crate::search::search;
use crate::spec::ValueSpec;

/// Files sharing identical normalized values for every key keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Keyword/value pairs in key order, shared by every member.
    pub key: Vec<(String, String)>,
    /// Member idents in input order.
    pub members: Vec<String>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Value for a key keyword, if the keyword is part of the group key.
    pub fn value_of(&self, keyword: &str) -> Option<&str> {
        let keyword = canonical_key(keyword);
        self.key
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, v)| v.as_str())
    }

    /// Pretty name for the group, usable as a file name: key values
    /// joined with dashes, spaces dashed out.
    pub fn name(&self) -> String {
        if self.key.is_empty() {
            return "all".to_string();
        }
        self.key
            .iter()
            .map(|(_, v)| v.as_str())
            .join("-")
            .replace(' ', "-")
    }
}

/// Partition a file collection into groups over which every key
/// keyword holds an identical value.
///
/// Values are normalized through the search engine (one presence
/// predicate per keyword), so grouping compares exact display text: a
/// file missing a keyword groups under the empty string, and int 30
/// never collides with the text "30.0". No filtering happens here.
/// Groups come out in first-occurrence order of their key tuple; an
/// empty keyword list yields a single group holding every file.
pub fn group(files: &[FileEntry], key_keywords: &[String]) -> Vec<Group> {
    let specs: Vec<ValueSpec> = key_keywords
        .iter()
        .map(|keyword| ValueSpec::present(keyword))
        .collect();
    let mut groups: IndexMap<Vec<String>, Group> = IndexMap::new();
    for outcome in search(files, &specs) {
        let values: Vec<String> = outcome.results.iter().map(|r| r.display.clone()).collect();
        groups
            .entry(values.clone())
            .or_insert_with(|| Group {
                key: specs
                    .iter()
                    .map(|spec| spec.keyword.clone())
                    .zip(values)
                    .collect(),
                members: Vec::new(),
            })
            .members
            .push(outcome.ident);
    }
    groups.into_values().collect()
}

impl HeaderTable {
    /// Group the table's entries by the given keywords.
    pub fn group(&self, key_keywords: &[String]) -> Vec<Group> {
        group(self.entries(), key_keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderRecord;

    fn entry(ident: &str, pairs: &[(&str, &str)]) -> FileEntry {
        let mut header = HeaderRecord::new();
        for (key, value) in pairs {
            header.insert(key, *value);
        }
        FileEntry::new(ident, header)
    }

    fn sample() -> Vec<FileEntry> {
        vec![
            entry("f1.fits", &[("OBJECT", "galaxy"), ("FILTER", "B")]),
            entry("f2.fits", &[("OBJECT", "galaxy"), ("FILTER", "V")]),
            entry("f3.fits", &[("OBJECT", "star"), ("FILTER", "B")]),
        ]
    }

    #[test]
    fn groups_partition_in_first_occurrence_order() {
        let files = sample();
        let groups = group(&files, &["OBJECT".to_string()]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].value_of("OBJECT"), Some("galaxy"));
        assert_eq!(groups[0].members, vec!["f1.fits", "f2.fits"]);
        assert_eq!(groups[1].value_of("OBJECT"), Some("star"));
        assert_eq!(groups[1].members, vec!["f3.fits"]);
    }

    #[test]
    fn multi_key_grouping() {
        let files = sample();
        let groups = group(&files, &["OBJECT".to_string(), "FILTER".to_string()]);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].key.len(), 2);
        assert_eq!(groups[0].name(), "galaxy-B");
    }

    #[test]
    fn missing_keyword_groups_under_empty_string() {
        let files = vec![
            entry("f1.fits", &[("FILTER", "B")]),
            entry("f2.fits", &[]),
            entry("f3.fits", &[]),
        ];
        let groups = group(&files, &["FILTER".to_string()]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].value_of("FILTER"), Some(""));
        assert_eq!(groups[1].members, vec!["f2.fits", "f3.fits"]);
    }

    #[test]
    fn empty_key_list_yields_one_group() {
        let files = sample();
        let groups = group(&files, &[]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].key.is_empty());
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[0].name(), "all");
    }

    #[test]
    fn no_files_yields_no_groups() {
        let groups = group(&[], &[]);
        assert!(groups.is_empty());
    }

    #[test]
    fn grouping_is_idempotent() {
        let files = sample();
        let keys = vec!["FILTER".to_string()];
        assert_eq!(group(&files, &keys), group(&files, &keys));
    }
}
