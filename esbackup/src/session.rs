//! Per host/port session state
//!
//! A session owns the cached [`ServerInfo`] for one node. The cache sits
//! behind an async mutex so that check-then-fetch is atomic for callers
//! sharing a session.

use crate::config::ClusterConfig;
use crate::entity::ServerInfo;
use crate::transport::Endpoint;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug)]
pub struct Session {
    endpoint: Endpoint,
    server_info: Mutex<Option<ServerInfo>>,
}

impl Session {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::for_endpoint(Endpoint::new(host, port))
    }

    pub fn with_default_port(host: impl Into<String>) -> Self {
        Self::for_endpoint(Endpoint::with_default_port(host))
    }

    pub fn for_endpoint(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            server_info: Mutex::new(None),
        }
    }

    pub fn from_config(config: &ClusterConfig) -> Self {
        Self::for_endpoint(config.endpoint())
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The cached server info, if the node has been queried
    pub async fn cached(&self) -> Option<ServerInfo> {
        self.server_info.lock().await.clone()
    }

    /// Forget the cached server info; the next data call queries the node again
    pub async fn invalidate(&self) {
        self.server_info.lock().await.take();
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, Option<ServerInfo>> {
        self.server_info.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_session_has_no_server_info() {
        let session = Session::with_default_port("localhost");
        assert_eq!(session.endpoint().port, 9200);
        assert!(session.cached().await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_clears_cache() {
        let session = Session::new("es", 9201);
        *session.lock().await = Some(ServerInfo::new("n", "c", "6.8.0"));
        assert!(session.cached().await.is_some());

        session.invalidate().await;
        assert!(session.cached().await.is_none());
    }
}
