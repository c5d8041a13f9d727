//! esbackup: version-aware Elasticsearch access for backup and restore
//!
//! Detects the cluster version, picks the request and query implementations
//! for that version band, and maps responses into version-independent
//! entities.
//!
//! Supported cluster versions:
//! - Elasticsearch 1.x, 2.x, 5.x, 6.x, 7.x
//!
//! # Example
//!
//! ```no_run
//! use esbackup::{ElasticsearchRepository, Session};
//! use esbackup::config::ClusterConfig;
//!
//! # async fn example() -> esbackup::Result<()> {
//! let config = ClusterConfig::default();
//! let repo = ElasticsearchRepository::http(&config)?;
//! let session = Session::from_config(&config);
//!
//! let stats = repo.get_doc_count_by_index_type(&session).await?;
//! for index in stats.indices() {
//!     println!("{}: {} docs", index.name, index.docs_in_index);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod probe;
pub mod query;
pub mod repository;
pub mod request;
pub mod resolver;
pub mod session;
pub mod transport;
pub mod version;

pub use config::Config;
pub use entity::{IndexTypeStats, Mappings, ServerInfo};
pub use error::{Error, Result};
pub use mapper::ResponseMapper;
pub use probe::ClusterInfoProbe;
pub use repository::ElasticsearchRepository;
pub use resolver::{Implementation, Operation, Resolver};
pub use session::Session;
pub use transport::{Endpoint, EsRequest, HttpTransport, Transport, DEFAULT_PORT};
pub use version::{Version, VersionBand};
