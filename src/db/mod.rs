pub mod memory;
pub mod provider;
pub mod sqlite;
pub mod utils;

pub use memory::MemoryProvider;
pub use provider::{Filter, Record, StorageProvider, Table};
pub use sqlite::SqliteProvider;
