//! Node info lookup
//!
//! One round trip to the root endpoint, parsed into [`ServerInfo`].

use crate::entity::ServerInfo;
use crate::error::{Error, Result};
use crate::request::{node_info, RequestBuilder};
use crate::session::Session;
use crate::transport::{Endpoint, Transport};
use serde_json::Value;
use tracing::{debug, info};

pub struct ClusterInfoProbe;

impl ClusterInfoProbe {
    /// Query the node without touching any cache, using the bootstrap request
    pub async fn fetch<T: Transport + ?Sized>(
        transport: &T,
        endpoint: &Endpoint,
    ) -> Result<ServerInfo> {
        Self::fetch_with(transport, endpoint, &node_info::bootstrap()).await
    }

    /// Query the node with a specific node-info implementation
    pub async fn fetch_with<T: Transport + ?Sized>(
        transport: &T,
        endpoint: &Endpoint,
        request: &dyn RequestBuilder,
    ) -> Result<ServerInfo> {
        debug!("Requesting node info at {} with {}", endpoint, request.implementation());

        let response = transport
            .send(endpoint, &request.build())
            .await
            .map_err(|e| Error::ProbeFailed {
                reason: format!("node info request to {} failed: {}", endpoint, e),
            })?;

        let server_info = Self::parse(&response)?;
        info!(
            "Detected Elasticsearch {} on {} (node '{}', cluster '{}')",
            server_info.version, endpoint, server_info.name, server_info.cluster_name
        );
        Ok(server_info)
    }

    /// Return the session's cached info, fetching once if it is absent
    pub async fn fetch_cached<T: Transport + ?Sized>(
        transport: &T,
        session: &Session,
    ) -> Result<ServerInfo> {
        let mut cached = session.lock().await;
        if let Some(info) = cached.as_ref() {
            return Ok(info.clone());
        }

        let info = Self::fetch(transport, session.endpoint()).await?;
        *cached = Some(info.clone());
        Ok(info)
    }

    /// Query again with `request` and overwrite the session's cached info
    pub async fn refresh_with<T: Transport + ?Sized>(
        transport: &T,
        session: &Session,
        request: &dyn RequestBuilder,
    ) -> Result<ServerInfo> {
        let info = Self::fetch_with(transport, session.endpoint(), request).await?;
        *session.lock().await = Some(info.clone());
        Ok(info)
    }

    /// Extract `name`, `cluster_name` and `version.number`
    pub fn parse(response: &Value) -> Result<ServerInfo> {
        let name = string_at(response, &["name"])?;
        let cluster_name = string_at(response, &["cluster_name"])?;
        let version = string_at(response, &["version", "number"])?;
        Ok(ServerInfo::new(name, cluster_name, version))
    }
}

fn string_at(value: &Value, path: &[&str]) -> Result<String> {
    let mut current = value;
    for key in path {
        current = current.get(key).ok_or_else(|| Error::ProbeFailed {
            reason: format!("node info response is missing '{}'", path.join(".")),
        })?;
    }
    current
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::ProbeFailed {
            reason: format!("node info field '{}' is not a string", path.join(".")),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_root_response() {
        let response = json!({
            "status": 200,
            "name": "Thunderbird",
            "cluster_name": "elasticsearch",
            "version": {
                "number": "1.7.5",
                "build_hash": "00f95f4ffca6de89d68b7ccaf80d148f1f70e4d4",
                "lucene_version": "4.10.4"
            },
            "tagline": "You Know, for Search"
        });

        let info = ClusterInfoProbe::parse(&response).unwrap();
        assert_eq!(info, ServerInfo::new("Thunderbird", "elasticsearch", "1.7.5"));
    }

    #[test]
    fn test_parse_missing_version_number() {
        let response = json!({"name": "n", "cluster_name": "c", "version": {}});
        match ClusterInfoProbe::parse(&response).unwrap_err() {
            Error::ProbeFailed { reason } => assert!(reason.contains("version.number")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_cluster_name() {
        let response = json!({"name": "n", "version": {"number": "6.0.0"}});
        assert!(matches!(
            ClusterInfoProbe::parse(&response),
            Err(Error::ProbeFailed { .. })
        ));
    }

    #[test]
    fn test_parse_non_string_name() {
        let response = json!({"name": 7, "cluster_name": "c", "version": {"number": "6.0.0"}});
        match ClusterInfoProbe::parse(&response).unwrap_err() {
            Error::ProbeFailed { reason } => assert!(reason.contains("not a string")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
