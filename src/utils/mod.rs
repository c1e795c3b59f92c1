// Utils compartidos

pub mod constants;
pub mod storage;
pub mod tasks;
pub mod validators;

pub use constants::*;
pub use storage::{LocalStorage, MemoryStorage, StorageBackend, StorageError, StorageService};
