//! Header query-and-grouping engine for collections of FITS-style
//! files: typed keyword predicates, conjunctive search, stable
//! grouping by header value, and a masked image-stack combine.

mod combine;
mod error;
mod group;
mod header;
mod search;
mod spec;

pub use combine::{combine, masked_combine, masked_combine_with, CombineMethod, Cube, Image};
pub use error::{HdrError, Result};
pub use group::{group, Group};
pub use header::{canonical_key, FileEntry, HeaderRecord, HeaderTable, HeaderValue};
pub use search::{evaluate, search, FileQueryResult, MatchResult};
pub use spec::{coerce_literal, parse_spec, parse_specs, MatchMode, ValueSpec};
