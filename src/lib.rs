pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod http_client;
pub mod ingest;
pub mod leaderboard;
pub mod matching;
pub mod router;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

pub use error::{LoadError, QueryError};
pub use router::{QueryEngine, QueryIntent, classify};
pub use store::{PlayerRecord, StatsStore};
