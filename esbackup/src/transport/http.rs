//! reqwest-backed transport

use super::{Endpoint, EsRequest, Transport};
use crate::config::ClusterConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// HTTP transport with per-client timeouts and optional basic auth
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    scheme: String,
    credentials: Option<(String, String)>,
}

impl HttpTransport {
    /// Create a transport from cluster configuration
    pub fn new(config: &ClusterConfig) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        let credentials = match (&config.username, &config.password) {
            (Some(user), password) => Some((user.clone(), password.clone().unwrap_or_default())),
            (None, _) => None,
        };

        Ok(Self {
            http,
            scheme: config.scheme.clone(),
            credentials,
        })
    }

    fn url(&self, endpoint: &Endpoint, request: &EsRequest) -> Result<url::Url> {
        let mut url = url::Url::parse(&format!(
            "{}://{}:{}",
            self.scheme, endpoint.host, endpoint.port
        ))?;
        url.set_path(&request.path);
        if !request.params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: &Endpoint, request: &EsRequest) -> Result<Value> {
        let url = self.url(endpoint, request)?;
        debug!("{} {}", request.method, url);

        let mut builder = self.http.request(request.method.clone(), url.clone());
        if let Some((user, password)) = &self.credentials {
            builder = builder.basic_auth(user, Some(password));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Failed to reach {}: {}", endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport(format!(
                "{} {} returned {}: {}",
                request.method, url, status, body
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Transport(format!("Invalid JSON from {}: {}", url, e)))
    }
}
