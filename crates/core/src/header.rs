use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{HdrError, Result};

/// One scalar header value. FITS headers are heterogeneous: the same
/// keyword may hold a string in one file and a number in the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl HeaderValue {
    /// Numeric view of the value, if it has one. Ints and floats are
    /// comparable across subtypes; strings and bools are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            HeaderValue::Int(v) => Some(*v as f64),
            HeaderValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Equality used by literal predicates: same-kind equality, except
    /// numeric values which compare numerically across int/float.
    pub fn loose_eq(&self, other: &HeaderValue) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => match (self, other) {
                (HeaderValue::Bool(a), HeaderValue::Bool(b)) => a == b,
                (HeaderValue::Str(a), HeaderValue::Str(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Bool(v) => write!(f, "{v}"),
            HeaderValue::Int(v) => write!(f, "{v}"),
            HeaderValue::Float(v) => write!(f, "{v}"),
            HeaderValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Str(value.to_string())
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        HeaderValue::Int(value)
    }
}

impl From<f64> for HeaderValue {
    fn from(value: f64) -> Self {
        HeaderValue::Float(value)
    }
}

impl From<bool> for HeaderValue {
    fn from(value: bool) -> Self {
        HeaderValue::Bool(value)
    }
}

/// Canonical form of a header keyword. FITS keywords are
/// case-insensitive; canonicalize once at insert, not per lookup.
pub fn canonical_key(keyword: &str) -> String {
    keyword.trim().to_ascii_uppercase()
}

/// Ordered keyword -> value mapping for a single file. Read-only once
/// loaded; queries never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HeaderRecord {
    values: IndexMap<String, HeaderValue>,
}

impl HeaderRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, keyword: &str, value: impl Into<HeaderValue>) {
        self.values.insert(canonical_key(keyword), value.into());
    }

    pub fn get(&self, keyword: &str) -> Option<&HeaderValue> {
        self.values.get(&canonical_key(keyword))
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.values.contains_key(&canonical_key(keyword))
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Textual form of a keyword's value, or the empty string when the
    /// keyword is absent.
    pub fn display_of(&self, keyword: &str) -> String {
        self.get(keyword).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Build a record from a JSON object. Only scalar members are
    /// accepted; arrays and nested objects have no header equivalent.
    pub fn from_json(object: &serde_json::Value) -> Result<Self> {
        let map = object
            .as_object()
            .ok_or_else(|| HdrError::BadHeaderValue(object.to_string()))?;
        let mut record = Self::new();
        for (key, value) in map {
            let value = match value {
                serde_json::Value::Bool(b) => HeaderValue::Bool(*b),
                serde_json::Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        HeaderValue::Int(i)
                    } else if let Some(f) = n.as_f64() {
                        HeaderValue::Float(f)
                    } else {
                        return Err(HdrError::BadHeaderValue(key.clone()));
                    }
                }
                serde_json::Value::String(s) => HeaderValue::Str(s.clone()),
                _ => return Err(HdrError::BadHeaderValue(key.clone())),
            };
            record.insert(key, value);
        }
        Ok(record)
    }
}

impl FromIterator<(String, HeaderValue)> for HeaderRecord {
    fn from_iter<T: IntoIterator<Item = (String, HeaderValue)>>(iter: T) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(&key, value);
        }
        record
    }
}

/// One file in a collection: its identity (usually the opened path)
/// plus its header.
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub ident: String,
    pub header: HeaderRecord,
}

impl FileEntry {
    pub fn new(ident: impl Into<String>, header: HeaderRecord) -> Self {
        Self {
            ident: ident.into(),
            header,
        }
    }
}

/// An ordered collection of file headers. Search and grouping operate
/// over this; both return fresh values and leave the table untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderTable {
    entries: Vec<FileEntry>,
}

impl HeaderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter()
    }

    pub fn idents(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.ident.clone()).collect()
    }

    /// Return a copy where every entry carries at least a blank value
    /// for each requested keyword, so downstream renderers always have
    /// a full column set. Warns once per missing keyword/file pair.
    pub fn normalize(&self, keywords: &[String], blank: &str) -> HeaderTable {
        let mut out = self.clone();
        for entry in &mut out.entries {
            for keyword in keywords {
                if !entry.header.contains(keyword) {
                    tracing::warn!(
                        keyword = keyword.as_str(),
                        file = entry.ident.as_str(),
                        "keyword missing, filling with blank"
                    );
                    entry.header.insert(keyword, blank);
                }
            }
        }
        out
    }
}

impl FromIterator<FileEntry> for HeaderTable {
    fn from_iter<T: IntoIterator<Item = FileEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for HeaderTable {
    type Item = FileEntry;
    type IntoIter = std::vec::IntoIter<FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_case_insensitive() {
        let mut record = HeaderRecord::new();
        record.insert("Object", "galaxy");
        assert_eq!(record.get("OBJECT"), Some(&HeaderValue::from("galaxy")));
        assert!(record.contains("object"));
        assert!(!record.contains("FILTER"));
    }

    #[test]
    fn display_of_absent_keyword_is_empty() {
        let record = HeaderRecord::new();
        assert_eq!(record.display_of("EXPTIME"), "");
    }

    #[test]
    fn numeric_values_compare_across_subtypes() {
        assert!(HeaderValue::Int(30).loose_eq(&HeaderValue::Float(30.0)));
        assert!(!HeaderValue::Int(30).loose_eq(&HeaderValue::Str("30".into())));
        assert!(!HeaderValue::Bool(true).loose_eq(&HeaderValue::Int(1)));
    }

    #[test]
    fn from_json_rejects_nested_values() {
        let value = serde_json::json!({"OBJECT": "galaxy", "WCS": {"crval": 1.0}});
        assert!(HeaderRecord::from_json(&value).is_err());
    }

    #[test]
    fn normalize_fills_blanks() {
        let mut table = HeaderTable::new();
        table.push(FileEntry::new("a.fits", HeaderRecord::new()));
        let keywords = vec!["FILTER".to_string()];
        let filled = table.normalize(&keywords, "");
        assert_eq!(filled.entries()[0].header.display_of("FILTER"), "");
        assert!(filled.entries()[0].header.contains("FILTER"));
        // original table untouched
        assert!(!table.entries()[0].header.contains("FILTER"));
    }
}
