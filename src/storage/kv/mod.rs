//! Key/value backend implementations.

mod filesystem;
mod memory;
mod sqlite;

pub use filesystem::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
