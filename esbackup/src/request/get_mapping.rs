use super::{RequestBuilder, RequestKind};
use crate::transport::EsRequest;
use crate::version::VersionBand;

/// `GET /_mapping` for every index
#[derive(Debug, Clone)]
pub struct GetMappingRequest {
    band: VersionBand,
    /// 7.x drops the type level from mappings unless asked to keep it
    include_type_name: bool,
}

impl GetMappingRequest {
    fn new(band: VersionBand, include_type_name: bool) -> Self {
        Self {
            band,
            include_type_name,
        }
    }
}

impl RequestBuilder for GetMappingRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::GetMapping
    }

    fn band(&self) -> VersionBand {
        self.band
    }

    fn build(&self) -> EsRequest {
        let request = EsRequest::get("/_mapping");
        if self.include_type_name {
            request.with_param("include_type_name", "true")
        } else {
            request
        }
    }
}

pub(crate) fn v1x() -> Box<dyn RequestBuilder> {
    Box::new(GetMappingRequest::new(VersionBand(1), false))
}

pub(crate) fn v2x() -> Box<dyn RequestBuilder> {
    Box::new(GetMappingRequest::new(VersionBand(2), false))
}

pub(crate) fn v5x() -> Box<dyn RequestBuilder> {
    Box::new(GetMappingRequest::new(VersionBand(5), false))
}

pub(crate) fn v6x() -> Box<dyn RequestBuilder> {
    Box::new(GetMappingRequest::new(VersionBand(6), false))
}

pub(crate) fn v7x() -> Box<dyn RequestBuilder> {
    Box::new(GetMappingRequest::new(VersionBand(7), true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v7x_keeps_type_level() {
        let req = v7x().build();
        assert_eq!(req.path, "/_mapping");
        assert_eq!(req.param("include_type_name"), Some("true"));
    }

    #[test]
    fn test_older_bands_plain() {
        for factory in [v1x, v2x, v5x, v6x] {
            assert!(factory().build().params.is_empty());
        }
    }
}
