//! Per-version query body builders

pub mod docs_in_index_type;

pub use docs_in_index_type::{DocsInIndexTypeQuery, INDEX_AGGREGATION, TYPE_AGGREGATION};

use crate::version::VersionBand;
use serde_json::Value;
use std::fmt;

/// Logical query operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    DocsInIndexType,
}

impl QueryKind {
    pub const ALL: &'static [QueryKind] = &[Self::DocsInIndexType];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DocsInIndexType => "DocsInIndexTypeQuery",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Produces the request body for a query on one version band
pub trait Query: Send + Sync + fmt::Debug {
    fn kind(&self) -> QueryKind;

    fn band(&self) -> VersionBand;

    fn implementation(&self) -> String {
        format!("{}/{}", self.band(), self.kind())
    }

    fn body(&self) -> Value;
}

pub type QueryFactory = fn() -> Box<dyn Query>;
