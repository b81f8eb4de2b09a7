//! In-memory word frequency service.
//!
//! Clients record words and ask for the most frequent stored word that
//! starts with a given prefix. State lives in a single
//! [`FrequencyTable`](frequency::FrequencyTable) shared across request tasks.

pub mod config;
pub mod frequency;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use frequency::{FrequencyTable, InvalidWordError, Word};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
