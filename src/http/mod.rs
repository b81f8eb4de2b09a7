//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID)
//!     → handlers.rs (parse body/query, call the frequency table)
//!     → response.rs (JSON body or status mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ApiError, HealthStatus, WordResponse};
pub use server::{AppState, HttpServer, HEALTH_PATH, PREFIX_PATH, WORD_PATH};
