//! Raw response payloads to normalized entities
//!
//! Every lookup carries a path so that a response with an unexpected shape
//! is reported as `MalformedResponse` at the exact place it diverged.

use crate::entity::{index_type_stats, mappings, IndexTypeStats, Mappings};
use crate::error::{Error, Result};
use crate::query::{INDEX_AGGREGATION, TYPE_AGGREGATION};
use serde_json::{Map, Value};
use tracing::warn;

/// Response mapper
pub struct ResponseMapper;

impl ResponseMapper {
    /// Map a full search response carrying the doc-count aggregation.
    ///
    /// Fails when either aggregation level reports documents outside the
    /// returned buckets, so a result is never silently incomplete.
    pub fn doc_counts_from_response(response: &Value) -> Result<IndexTypeStats> {
        let path = format!("aggregations.{}", INDEX_AGGREGATION);
        let aggregation = object(response, "$")
            .and_then(|root| field(root, "aggregations", "$"))
            .and_then(|aggs| object(aggs, "aggregations"))
            .and_then(|aggs| field(aggs, INDEX_AGGREGATION, "aggregations"))
            .and_then(|agg| object(agg, &path))?;

        ensure_complete(aggregation, &path)?;
        let buckets = field(aggregation, "buckets", &path)?;
        Self::map_doc_counts(buckets, &format!("{}.buckets", path))
    }

    /// Map the outer index bucket list. Order of buckets is preserved at both
    /// levels; an index with no type buckets yields an index with no types.
    /// A type aggregation with `sum_other_doc_count > 0` is an error.
    pub fn map_doc_counts(buckets: &Value, path: &str) -> Result<IndexTypeStats> {
        let mut stats = IndexTypeStats::new();

        for (i, bucket) in array(buckets, path)?.iter().enumerate() {
            let bucket_path = format!("{}[{}]", path, i);
            let bucket = object(bucket, &bucket_path)?;

            let name = key(bucket, &bucket_path)?;
            let docs = doc_count(bucket, &bucket_path)?;
            let mut index = index_type_stats::Index::new(name, docs);

            let types_path = format!("{}.{}", bucket_path, TYPE_AGGREGATION);
            let type_agg = field(bucket, TYPE_AGGREGATION, &bucket_path)
                .and_then(|agg| object(agg, &types_path))?;
            ensure_complete(type_agg, &types_path)?;
            let type_buckets = field(type_agg, "buckets", &types_path)?;
            let types_path = format!("{}.buckets", types_path);

            for (j, type_bucket) in array(type_buckets, &types_path)?.iter().enumerate() {
                let type_path = format!("{}[{}]", types_path, j);
                let type_bucket = object(type_bucket, &type_path)?;
                index.add_type(index_type_stats::Type::new(
                    key(type_bucket, &type_path)?,
                    doc_count(type_bucket, &type_path)?,
                ));
            }

            stats.add_index(index);
        }

        Ok(stats)
    }

    /// Map a get-mapping response: `{index: {"mappings": {type: schema}}}`.
    ///
    /// Index and type order follow the order of the parsed JSON object.
    /// Schemas are copied verbatim.
    pub fn map_mappings(response: &Value) -> Result<Mappings> {
        let mut result = Mappings::new();

        for (index_name, index_body) in object(response, "$")? {
            let index_path = index_name.as_str();
            let index_body = object(index_body, index_path)?;

            let mappings_path = format!("{}.mappings", index_path);
            let type_mappings = field(index_body, "mappings", index_path)
                .and_then(|m| object(m, &mappings_path))?;

            let mut index = mappings::Index::new(index_name.clone());
            for (type_name, schema) in type_mappings {
                index.add_type(mappings::Type::new(type_name.clone(), schema.clone()));
            }

            result.add_index(index);
        }

        Ok(result)
    }
}

fn malformed(path: &str, reason: impl Into<String>) -> Error {
    let err = Error::malformed(path, reason);
    warn!("{}", err);
    err
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| malformed(path, format!("expected object, found {}", kind_of(value))))
}

fn array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| malformed(path, format!("expected array, found {}", kind_of(value))))
}

fn field<'a>(map: &'a Map<String, Value>, name: &str, path: &str) -> Result<&'a Value> {
    map.get(name)
        .ok_or_else(|| malformed(path, format!("missing key '{}'", name)))
}

/// Terms aggregations report documents that did not fit in the bucket limit
/// as `sum_other_doc_count`. A missing field means nothing was left out.
fn ensure_complete(aggregation: &Map<String, Value>, path: &str) -> Result<()> {
    let Some(value) = aggregation.get("sum_other_doc_count") else {
        return Ok(());
    };
    match value.as_u64() {
        Some(0) => Ok(()),
        Some(other) => Err(malformed(
            path,
            format!("aggregation truncated, {} docs in other buckets", other),
        )),
        None => Err(malformed(
            &format!("{}.sum_other_doc_count", path),
            format!("expected non-negative integer, found {}", value),
        )),
    }
}

/// Bucket keys are strings for `_index`/`_type`, but numeric keys are tolerated
fn key(bucket: &Map<String, Value>, path: &str) -> Result<String> {
    match field(bucket, "key", path)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(malformed(
            &format!("{}.key", path),
            format!("expected string, found {}", kind_of(other)),
        )),
    }
}

fn doc_count(bucket: &Map<String, Value>, path: &str) -> Result<u64> {
    let value = field(bucket, "doc_count", path)?;
    value.as_u64().ok_or_else(|| {
        malformed(
            &format!("{}.doc_count", path),
            format!("expected non-negative integer, found {}", value),
        )
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
