//! Word frequency subsystem.
//!
//! # Data Flow
//! ```text
//! raw word (from HTTP body)
//!     → word.rs (trim, validate ASCII letters, lowercase)
//!     → table.rs (write lock, increment one entry)
//!
//! prefix (from query string)
//!     → table.rs (lowercase, read lock, scan matching range)
//!     → most frequent word, or None
//! ```
//!
//! # Design Decisions
//! - Validation happens before any lock is taken
//! - One table-wide RwLock; writers exclusive, scans shared
//! - Ties on count resolve to the lexicographically smallest word

pub mod table;
pub mod word;

pub use table::FrequencyTable;
pub use word::{InvalidWordError, Word};
