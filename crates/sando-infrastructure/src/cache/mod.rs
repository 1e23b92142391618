//! Response caching

pub mod response;

pub use response::{CacheStats, ResponseCache};
