//! Version-aware dispatch from logical operations to implementations
//!
//! The registry is filled once at construction from an explicit table, so an
//! unsupported `(operation, band)` pair is a lookup miss rather than a name
//! that fails to load at runtime.

use crate::query::{self, Query, QueryFactory, QueryKind};
use crate::request::{self, RequestBuilder, RequestFactory, RequestKind};
use crate::version::{VersionBand, SUPPORTED_BANDS};
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Anything the resolver can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Query(QueryKind),
    Request(RequestKind),
}

impl Operation {
    /// Every operation with built-in implementations
    pub fn all() -> impl Iterator<Item = Operation> {
        QueryKind::ALL
            .iter()
            .copied()
            .map(Operation::Query)
            .chain(RequestKind::ALL.iter().copied().map(Operation::Request))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(kind) => write!(f, "{}", kind),
            Self::Request(kind) => write!(f, "{}", kind),
        }
    }
}

impl From<QueryKind> for Operation {
    fn from(kind: QueryKind) -> Self {
        Operation::Query(kind)
    }
}

impl From<RequestKind> for Operation {
    fn from(kind: RequestKind) -> Self {
        Operation::Request(kind)
    }
}

/// A freshly constructed handler
#[derive(Debug)]
pub enum Implementation {
    Query(Box<dyn Query>),
    Request(Box<dyn RequestBuilder>),
}

impl Implementation {
    pub fn name(&self) -> String {
        match self {
            Self::Query(q) => q.implementation(),
            Self::Request(r) => r.implementation(),
        }
    }
}

/// Registry of `(operation, band) -> factory`
#[derive(Clone)]
pub struct Resolver {
    queries: HashMap<(QueryKind, VersionBand), QueryFactory>,
    requests: HashMap<(RequestKind, VersionBand), RequestFactory>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut queries: Vec<_> = self.queries.keys().collect();
        queries.sort_by_key(|(k, b)| (k.name(), *b));
        let mut requests: Vec<_> = self.requests.keys().collect();
        requests.sort_by_key(|(k, b)| (k.name(), *b));
        f.debug_struct("Resolver")
            .field("queries", &queries)
            .field("requests", &requests)
            .finish()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Registry with every built-in implementation
    pub fn new() -> Self {
        let mut resolver = Self::empty();

        let v1 = VersionBand(1);
        let v2 = VersionBand(2);
        let v5 = VersionBand(5);
        let v6 = VersionBand(6);
        let v7 = VersionBand(7);

        resolver.register_query(QueryKind::DocsInIndexType, v1, query::docs_in_index_type::v1x);
        resolver.register_query(QueryKind::DocsInIndexType, v2, query::docs_in_index_type::v2x);
        resolver.register_query(QueryKind::DocsInIndexType, v5, query::docs_in_index_type::v5x);
        resolver.register_query(QueryKind::DocsInIndexType, v6, query::docs_in_index_type::v6x);
        resolver.register_query(QueryKind::DocsInIndexType, v7, query::docs_in_index_type::v7x);

        resolver.register_request(RequestKind::NodeInfo, v1, request::node_info::v1x);
        resolver.register_request(RequestKind::NodeInfo, v2, request::node_info::v2x);
        resolver.register_request(RequestKind::NodeInfo, v5, request::node_info::v5x);
        resolver.register_request(RequestKind::NodeInfo, v6, request::node_info::v6x);
        resolver.register_request(RequestKind::NodeInfo, v7, request::node_info::v7x);

        resolver.register_request(RequestKind::Search, v1, request::search::v1x);
        resolver.register_request(RequestKind::Search, v2, request::search::v2x);
        resolver.register_request(RequestKind::Search, v5, request::search::v5x);
        resolver.register_request(RequestKind::Search, v6, request::search::v6x);
        resolver.register_request(RequestKind::Search, v7, request::search::v7x);

        resolver.register_request(RequestKind::GetMapping, v1, request::get_mapping::v1x);
        resolver.register_request(RequestKind::GetMapping, v2, request::get_mapping::v2x);
        resolver.register_request(RequestKind::GetMapping, v5, request::get_mapping::v5x);
        resolver.register_request(RequestKind::GetMapping, v6, request::get_mapping::v6x);
        resolver.register_request(RequestKind::GetMapping, v7, request::get_mapping::v7x);

        resolver
    }

    /// Registry with nothing registered
    pub fn empty() -> Self {
        Self {
            queries: HashMap::new(),
            requests: HashMap::new(),
        }
    }

    /// Register (or replace) a query implementation
    pub fn register_query(&mut self, kind: QueryKind, band: VersionBand, factory: QueryFactory) {
        self.queries.insert((kind, band), factory);
    }

    /// Register (or replace) a request implementation
    pub fn register_request(
        &mut self,
        kind: RequestKind,
        band: VersionBand,
        factory: RequestFactory,
    ) {
        self.requests.insert((kind, band), factory);
    }

    pub fn resolve(
        &self,
        operation: impl Into<Operation>,
        band: VersionBand,
    ) -> Result<Implementation> {
        match operation.into() {
            Operation::Query(kind) => self.resolve_query(kind, band).map(Implementation::Query),
            Operation::Request(kind) => {
                self.resolve_request(kind, band).map(Implementation::Request)
            }
        }
    }

    pub fn resolve_query(&self, kind: QueryKind, band: VersionBand) -> Result<Box<dyn Query>> {
        self.queries
            .get(&(kind, band))
            .map(|factory| factory())
            .ok_or_else(|| miss(kind, band))
    }

    pub fn resolve_request(
        &self,
        kind: RequestKind,
        band: VersionBand,
    ) -> Result<Box<dyn RequestBuilder>> {
        self.requests
            .get(&(kind, band))
            .map(|factory| factory())
            .ok_or_else(|| miss(kind, band))
    }

    pub fn supports(&self, operation: impl Into<Operation>, band: VersionBand) -> bool {
        match operation.into() {
            Operation::Query(kind) => self.queries.contains_key(&(kind, band)),
            Operation::Request(kind) => self.requests.contains_key(&(kind, band)),
        }
    }

    /// `(operation, band)` pairs from the supported-version list that have no
    /// implementation. Empty for a complete registry.
    pub fn missing_for_supported_bands(&self) -> Vec<(Operation, VersionBand)> {
        SUPPORTED_BANDS
            .iter()
            .flat_map(|band| Operation::all().map(move |op| (op, *band)))
            .filter(|(op, band)| !self.supports(*op, *band))
            .collect()
    }
}

fn miss(operation: impl fmt::Display, band: VersionBand) -> Error {
    Error::UnsupportedOperationForVersion {
        operation: operation.to_string(),
        band: band.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_supported_bands() {
        let resolver = Resolver::new();
        assert!(
            resolver.missing_for_supported_bands().is_empty(),
            "missing: {:?}",
            resolver.missing_for_supported_bands()
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let resolver = Resolver::new();
        for band in SUPPORTED_BANDS {
            for op in Operation::all() {
                let first = resolver.resolve(op, *band).unwrap().name();
                let second = resolver.resolve(op, *band).unwrap().name();
                assert_eq!(first, second);
                assert!(first.starts_with(&band.to_string()));
            }
        }
    }

    #[test]
    fn test_unknown_band_is_a_miss() {
        let resolver = Resolver::new();
        let err = resolver
            .resolve_request(RequestKind::Search, VersionBand(3))
            .unwrap_err();
        match err {
            Error::UnsupportedOperationForVersion { operation, band } => {
                assert_eq!(operation, "SearchRequest");
                assert_eq!(band, "V3x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_registry_reports_everything_missing() {
        let resolver = Resolver::empty();
        let missing = resolver.missing_for_supported_bands();
        assert_eq!(
            missing.len(),
            SUPPORTED_BANDS.len() * Operation::all().count()
        );
    }

    #[test]
    fn test_register_extends_registry() {
        let mut resolver = Resolver::empty();
        resolver.register_query(
            QueryKind::DocsInIndexType,
            VersionBand(8),
            query::docs_in_index_type::v7x,
        );
        assert!(resolver.supports(QueryKind::DocsInIndexType, VersionBand(8)));
        assert!(!resolver.supports(RequestKind::Search, VersionBand(8)));
    }

    #[test]
    fn test_fresh_instance_per_resolve() {
        let resolver = Resolver::new();
        let mut first = resolver
            .resolve_request(RequestKind::Search, VersionBand(6))
            .unwrap();
        first.set_body(serde_json::json!({"size": 0})).unwrap();

        let second = resolver
            .resolve_request(RequestKind::Search, VersionBand(6))
            .unwrap();
        assert!(second.build().body.is_none());
    }
}
