use super::{RequestBuilder, RequestKind};
use crate::transport::EsRequest;
use crate::version::VersionBand;

/// `GET /`: node name, cluster name and version number.
///
/// The root endpoint has the same shape on every supported band.
#[derive(Debug, Clone)]
pub struct NodeInfoRequest {
    band: VersionBand,
}

impl NodeInfoRequest {
    pub fn new(band: VersionBand) -> Self {
        Self { band }
    }
}

impl RequestBuilder for NodeInfoRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::NodeInfo
    }

    fn band(&self) -> VersionBand {
        self.band
    }

    fn build(&self) -> EsRequest {
        EsRequest::get("/")
    }
}

/// Request used to discover the version; the 1.x root request is understood by every band
pub fn bootstrap() -> NodeInfoRequest {
    NodeInfoRequest::new(VersionBand(1))
}

pub(crate) fn v1x() -> Box<dyn RequestBuilder> {
    Box::new(NodeInfoRequest::new(VersionBand(1)))
}

pub(crate) fn v2x() -> Box<dyn RequestBuilder> {
    Box::new(NodeInfoRequest::new(VersionBand(2)))
}

pub(crate) fn v5x() -> Box<dyn RequestBuilder> {
    Box::new(NodeInfoRequest::new(VersionBand(5)))
}

pub(crate) fn v6x() -> Box<dyn RequestBuilder> {
    Box::new(NodeInfoRequest::new(VersionBand(6)))
}

pub(crate) fn v7x() -> Box<dyn RequestBuilder> {
    Box::new(NodeInfoRequest::new(VersionBand(7)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn test_root_request() {
        let req = bootstrap().build();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/");
        assert!(req.body.is_none());
    }

    #[test]
    fn test_rejects_body() {
        let mut req = v6x();
        assert!(req.set_body(serde_json::json!({})).is_err());
    }
}
