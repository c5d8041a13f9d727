//! Caller-facing facade
//!
//! Every data operation follows the same steps: make sure the session knows
//! a supported version, resolve the implementations for its band, send the
//! composed request and map the response.

use crate::config::ClusterConfig;
use crate::entity::{IndexTypeStats, Mappings, ServerInfo};
use crate::error::{Error, Result};
use crate::mapper::ResponseMapper;
use crate::probe::ClusterInfoProbe;
use crate::query::QueryKind;
use crate::request::{node_info, RequestBuilder, RequestKind};
use crate::resolver::Resolver;
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};
use crate::version::{self, VersionBand};
use tracing::{debug, warn};

pub struct ElasticsearchRepository<T> {
    transport: T,
    resolver: Resolver,
}

impl ElasticsearchRepository<HttpTransport> {
    /// Repository talking HTTP, configured from the cluster section
    pub fn http(config: &ClusterConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ElasticsearchRepository<T> {
    pub fn new(transport: T) -> Self {
        Self::with_resolver(transport, Resolver::new())
    }

    pub fn with_resolver(transport: T, resolver: Resolver) -> Self {
        Self {
            transport,
            resolver,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Query the node and overwrite the session's cached info.
    ///
    /// Always performs a round trip; use it to re-detect the version. Once a
    /// supported band is cached, the node-info request registered for that
    /// band is used; otherwise the bootstrap request.
    pub async fn get_server_info(&self, session: &Session) -> Result<ServerInfo> {
        let cached_band = session
            .cached()
            .await
            .and_then(|info| info.band().ok())
            .filter(VersionBand::is_supported);

        let request: Box<dyn RequestBuilder> = match cached_band {
            Some(band) => self.resolver.resolve_request(RequestKind::NodeInfo, band)?,
            None => Box::new(node_info::bootstrap()),
        };
        ClusterInfoProbe::refresh_with(&self.transport, session, request.as_ref()).await
    }

    /// Document counts per index and type, via a two-level terms aggregation
    pub async fn get_doc_count_by_index_type(&self, session: &Session) -> Result<IndexTypeStats> {
        let band = self.supported_band(session).await?;

        let query = self.resolver.resolve_query(QueryKind::DocsInIndexType, band)?;
        let mut search = self.resolver.resolve_request(RequestKind::Search, band)?;
        search.set_body(query.body())?;
        debug!(
            "Using {} with {} for {}",
            query.implementation(),
            search.implementation(),
            session.endpoint()
        );

        let response = self
            .transport
            .send(session.endpoint(), &search.build())
            .await?;
        ResponseMapper::doc_counts_from_response(&response)
    }

    /// Mappings of every type in every index
    pub async fn get_all_mappings(&self, session: &Session) -> Result<Mappings> {
        let band = self.supported_band(session).await?;

        let request = self.resolver.resolve_request(RequestKind::GetMapping, band)?;
        debug!("Using {} for {}", request.implementation(), session.endpoint());

        let response = self
            .transport
            .send(session.endpoint(), &request.build())
            .await?;
        ResponseMapper::map_mappings(&response)
    }

    /// Cached-or-fetched server info, gated by the version policy
    async fn supported_band(&self, session: &Session) -> Result<VersionBand> {
        let info = ClusterInfoProbe::fetch_cached(&self.transport, session).await?;

        if !version::is_supported(&info.version) {
            warn!(
                "Elasticsearch {} on {} is not supported",
                info.version,
                session.endpoint()
            );
            return Err(Error::UnsupportedClusterVersion(info.version));
        }

        info.band()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Endpoint, EsRequest};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Answers node-info paths only; every other path fails
    struct RootOnly {
        version: &'static str,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for RootOnly {
        async fn send(&self, _endpoint: &Endpoint, request: &EsRequest) -> Result<Value> {
            self.calls.lock().unwrap().push(request.path.clone());
            match request.path.as_str() {
                "/" | "/_nodes/_local" => Ok(json!({
                    "name": "node-1",
                    "cluster_name": "test",
                    "version": {"number": self.version}
                })),
                other => Err(Error::Transport(format!("unexpected path {}", other))),
            }
        }
    }

    #[tokio::test]
    async fn test_unparsable_version_is_unsupported() {
        let repo = ElasticsearchRepository::new(RootOnly {
            version: "not-a-version",
            calls: Mutex::new(Vec::new()),
        });
        let session = Session::with_default_port("localhost");

        let err = repo.get_all_mappings(&session).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedClusterVersion(v) if v == "not-a-version"));
        assert_eq!(*repo.transport().calls.lock().unwrap(), vec!["/".to_string()]);
    }

    /// Node-info implementation with a distinguishable path
    #[derive(Debug)]
    struct LocalNodeInfo;

    impl RequestBuilder for LocalNodeInfo {
        fn kind(&self) -> RequestKind {
            RequestKind::NodeInfo
        }

        fn band(&self) -> VersionBand {
            VersionBand(6)
        }

        fn build(&self) -> EsRequest {
            EsRequest::get("/_nodes/_local")
        }
    }

    fn local_node_info() -> Box<dyn RequestBuilder> {
        Box::new(LocalNodeInfo)
    }

    #[tokio::test]
    async fn test_refetch_uses_registered_node_info() {
        let mut resolver = Resolver::new();
        resolver.register_request(RequestKind::NodeInfo, VersionBand(6), local_node_info);
        let repo = ElasticsearchRepository::with_resolver(
            RootOnly {
                version: "6.8.0",
                calls: Mutex::new(Vec::new()),
            },
            resolver,
        );
        let session = Session::with_default_port("localhost");

        repo.get_server_info(&session).await.unwrap();
        repo.get_server_info(&session).await.unwrap();

        assert_eq!(
            *repo.transport().calls.lock().unwrap(),
            vec!["/".to_string(), "/_nodes/_local".to_string()]
        );
    }

    #[tokio::test]
    async fn test_refetch_of_unsupported_version_uses_bootstrap() {
        let repo = ElasticsearchRepository::new(RootOnly {
            version: "99.0.0",
            calls: Mutex::new(Vec::new()),
        });
        let session = Session::with_default_port("localhost");

        repo.get_server_info(&session).await.unwrap();
        repo.get_server_info(&session).await.unwrap();

        assert_eq!(
            *repo.transport().calls.lock().unwrap(),
            vec!["/".to_string(), "/".to_string()]
        );
    }

    #[tokio::test]
    async fn test_registry_miss_surfaces() {
        let repo = ElasticsearchRepository::with_resolver(
            RootOnly {
                version: "6.8.0",
                calls: Mutex::new(Vec::new()),
            },
            Resolver::empty(),
        );
        let session = Session::with_default_port("localhost");

        let err = repo.get_doc_count_by_index_type(&session).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperationForVersion { .. }));
    }
}
