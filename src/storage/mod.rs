pub mod config;
pub mod defaults;
pub mod file;
pub mod shared_store;
pub mod sqlite;

pub use defaults::{MemoryDefaults, SharedDefaults, StorageError};
pub use file::FileDefaults;
pub use shared_store::{SharedStore, APP_GROUP, EVENTS_KEY};
pub use sqlite::SqliteDefaults;
