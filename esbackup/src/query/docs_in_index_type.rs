use super::{Query, QueryKind};
use crate::version::VersionBand;
use serde_json::{json, Value};

/// Outer terms aggregation, one bucket per index
pub const INDEX_AGGREGATION: &str = "count_docs_in_index";
/// Inner terms aggregation, one bucket per type
pub const TYPE_AGGREGATION: &str = "count_docs_in_types";

/// Bucket limit for bands that reject `size: 0` on terms aggregations
const MAX_BUCKETS: u32 = 10_000;

/// Two-level terms aggregation over `_index` and `_type`, no hits returned
#[derive(Debug, Clone)]
pub struct DocsInIndexTypeQuery {
    band: VersionBand,
    /// `0` means unbounded on 1.x and 2.x
    bucket_size: u32,
}

impl DocsInIndexTypeQuery {
    fn new(band: VersionBand, bucket_size: u32) -> Self {
        Self { band, bucket_size }
    }
}

impl Query for DocsInIndexTypeQuery {
    fn kind(&self) -> QueryKind {
        QueryKind::DocsInIndexType
    }

    fn band(&self) -> VersionBand {
        self.band
    }

    fn body(&self) -> Value {
        json!({
            "size": 0,
            "aggs": {
                INDEX_AGGREGATION: {
                    "terms": { "field": "_index", "size": self.bucket_size },
                    "aggs": {
                        TYPE_AGGREGATION: {
                            "terms": { "field": "_type", "size": self.bucket_size }
                        }
                    }
                }
            }
        })
    }
}

pub(crate) fn v1x() -> Box<dyn Query> {
    Box::new(DocsInIndexTypeQuery::new(VersionBand(1), 0))
}

pub(crate) fn v2x() -> Box<dyn Query> {
    Box::new(DocsInIndexTypeQuery::new(VersionBand(2), 0))
}

pub(crate) fn v5x() -> Box<dyn Query> {
    Box::new(DocsInIndexTypeQuery::new(VersionBand(5), MAX_BUCKETS))
}

pub(crate) fn v6x() -> Box<dyn Query> {
    Box::new(DocsInIndexTypeQuery::new(VersionBand(6), MAX_BUCKETS))
}

pub(crate) fn v7x() -> Box<dyn Query> {
    Box::new(DocsInIndexTypeQuery::new(VersionBand(7), MAX_BUCKETS))
}
