//! Per-version request builders
//!
//! Each band gets its own factory (`search::v5x`, `get_mapping::v7x`, ...)
//! registered in [`crate::resolver::Resolver`]. Builders are stateless apart
//! from an optional body and are created fresh for every call.

pub mod get_mapping;
pub mod node_info;
pub mod search;

pub use get_mapping::GetMappingRequest;
pub use node_info::NodeInfoRequest;
pub use search::SearchRequest;

use crate::transport::EsRequest;
use crate::version::VersionBand;
use crate::{Error, Result};
use serde_json::Value;
use std::fmt;

/// Logical request operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    NodeInfo,
    Search,
    GetMapping,
}

impl RequestKind {
    pub const ALL: &'static [RequestKind] = &[Self::NodeInfo, Self::Search, Self::GetMapping];

    pub fn name(&self) -> &'static str {
        match self {
            Self::NodeInfo => "NodeInfoRequest",
            Self::Search => "SearchRequest",
            Self::GetMapping => "Index/GetMappingRequest",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request implementation for one version band
pub trait RequestBuilder: Send + Sync + fmt::Debug {
    fn kind(&self) -> RequestKind;

    fn band(&self) -> VersionBand;

    /// Stable identifier of the concrete implementation, e.g. `V5x/SearchRequest`
    fn implementation(&self) -> String {
        format!("{}/{}", self.band(), self.kind())
    }

    /// Attach a query body. Only search-style requests take one.
    fn set_body(&mut self, _body: Value) -> Result<()> {
        Err(Error::UnsupportedOperationForVersion {
            operation: format!("{} with body", self.kind()),
            band: self.band().to_string(),
        })
    }

    fn build(&self) -> EsRequest;
}

/// Factory stored in the resolver registry
pub type RequestFactory = fn() -> Box<dyn RequestBuilder>;
