//! Storage-side primitives shared by the coffer request handlers and backends.

pub mod errors;
pub mod key;
pub mod payload;
pub mod store;

pub use errors::{KeyError, PayloadError, StoreError};
pub use key::{Key, KEY_PREFIX};
pub use payload::validate_simple_secret;
pub use store::memory::MemoryStore;
pub use store::sqlite::SqliteStore;
pub use store::KvStore;
