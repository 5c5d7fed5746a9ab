//! Persistence layer — the selection snapshot behind a `StateStore` port.

pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::{state_keys, StateStore};
