//! Persistence of in-progress forms.
//!
//! [`FormStorage`] saves one [`SavedForm`] snapshot per form type on top of
//! any [`KeyValueStore`]. File contents of uploads are never persisted, only
//! their name, size and type.

pub mod backend;
pub mod errors;
pub mod snapshot;
pub mod storage;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use errors::StorageError;
pub use snapshot::SavedForm;
pub use storage::{FormStorage, DEFAULT_KEY_PREFIX};
