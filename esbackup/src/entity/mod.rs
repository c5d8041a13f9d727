//! Version-independent domain objects returned to callers

pub mod index_type_stats;
pub mod mappings;
pub mod server_info;

pub use index_type_stats::IndexTypeStats;
pub use mappings::Mappings;
pub use server_info::ServerInfo;
