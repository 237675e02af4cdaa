pub mod debounce;
pub mod gateway;
pub mod migration;
pub mod serialization;
pub mod store;
pub mod traits;

pub use debounce::{DebouncedSaver, SaveTrigger};
pub use gateway::{PersistenceGateway, STORAGE_FULL_MESSAGE, STORAGE_KEY};
pub use migration::{MigrationStep, Migrator, SchemaVersion, V1ToV2Migration};
pub use serialization::JsonSerializer;
pub use store::{AtomicWriter, FileStore, MemoryStore};
pub use traits::*;
