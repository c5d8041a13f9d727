use super::{RequestBuilder, RequestKind};
use crate::transport::EsRequest;
use crate::version::VersionBand;
use crate::Result;
use serde_json::Value;

/// `POST /_search` across all indices
#[derive(Debug, Clone)]
pub struct SearchRequest {
    band: VersionBand,
    /// 1.x returns aggregations without hits only with `search_type=count`
    count_only: bool,
    body: Option<Value>,
}

impl SearchRequest {
    fn new(band: VersionBand, count_only: bool) -> Self {
        Self {
            band,
            count_only,
            body: None,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl RequestBuilder for SearchRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::Search
    }

    fn band(&self) -> VersionBand {
        self.band
    }

    fn set_body(&mut self, body: Value) -> Result<()> {
        self.body = Some(body);
        Ok(())
    }

    fn build(&self) -> EsRequest {
        let mut request = EsRequest::post("/_search");
        if self.count_only {
            request = request.with_param("search_type", "count");
        }
        if let Some(body) = &self.body {
            request = request.with_body(body.clone());
        }
        request
    }
}

pub(crate) fn v1x() -> Box<dyn RequestBuilder> {
    Box::new(SearchRequest::new(VersionBand(1), true))
}

pub(crate) fn v2x() -> Box<dyn RequestBuilder> {
    Box::new(SearchRequest::new(VersionBand(2), false))
}

pub(crate) fn v5x() -> Box<dyn RequestBuilder> {
    Box::new(SearchRequest::new(VersionBand(5), false))
}

pub(crate) fn v6x() -> Box<dyn RequestBuilder> {
    Box::new(SearchRequest::new(VersionBand(6), false))
}

pub(crate) fn v7x() -> Box<dyn RequestBuilder> {
    Box::new(SearchRequest::new(VersionBand(7), false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_v1x_uses_count_search_type() {
        let req = v1x().build();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/_search");
        assert_eq!(req.param("search_type"), Some("count"));
    }

    #[test]
    fn test_later_bands_plain_search() {
        for factory in [v2x, v5x, v6x, v7x] {
            let req = factory().build();
            assert_eq!(req.param("search_type"), None);
        }
    }

    #[test]
    fn test_body_is_sent() {
        let mut search = v6x();
        search.set_body(json!({"size": 0})).unwrap();
        assert_eq!(search.build().body, Some(json!({"size": 0})));
        assert_eq!(search.implementation(), "V6x/SearchRequest");
    }
}
