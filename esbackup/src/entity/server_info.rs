use crate::version::{Version, VersionBand};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Identity of the node that answered the node-info request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub cluster_name: String,
    /// Raw dot-separated version string as reported by the cluster
    pub version: String,
}

impl ServerInfo {
    pub fn new(
        name: impl Into<String>,
        cluster_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cluster_name: cluster_name.into(),
            version: version.into(),
        }
    }

    pub fn parsed_version(&self) -> Result<Version> {
        Version::parse(&self.version)
    }

    pub fn band(&self) -> Result<VersionBand> {
        self.parsed_version().map(|v| v.band())
    }

    pub fn is_supported(&self) -> bool {
        crate::version::is_supported(&self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_from_version() {
        let info = ServerInfo::new("node-1", "backup", "2.4.6");
        assert_eq!(info.band().unwrap(), VersionBand(2));
        assert!(info.is_supported());
    }

    #[test]
    fn test_unparsable_version_is_unsupported() {
        let info = ServerInfo::new("node-1", "backup", "unknown");
        assert!(info.band().is_err());
        assert!(!info.is_supported());
    }
}
