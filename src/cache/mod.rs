//! Time-bounded caching of fetched post lists.

pub mod ttl_cache;

use std::sync::Arc;

pub use ttl_cache::{TtlCache, DEFAULT_TTL};

/// Post lists keyed by username.
pub type PostCache = TtlCache<Arc<Vec<String>>>;
