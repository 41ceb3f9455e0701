//! Integration tests for the Coffe Havana storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p havana-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - cart slot round-trips across store instances
//! - `checkout_flow` - end-to-end hand-off scenarios
//! - `catalog` - built-in and custom menus driving the cart
//!
//! Everything runs in-process against scratch directories; no services are
//! needed.

use std::path::Path;

use havana_storefront::cart::{CartPersistence, CartStore};
use havana_storefront::display::RecordingPresenter;
use havana_storefront::storage::{FileStorage, MemoryStorage};

/// A store over an in-memory slot with a recording presenter.
pub type MemoryStore = CartStore<MemoryStorage, RecordingPresenter>;

/// A store over a file-backed slot with a recording presenter.
pub type FileStore = CartStore<FileStorage, RecordingPresenter>;

/// Open a fresh in-memory store.
#[must_use]
pub fn memory_store() -> MemoryStore {
    memory_store_with(MemoryStorage::new())
}

/// Open a store over the given in-memory storage.
#[must_use]
pub fn memory_store_with(storage: MemoryStorage) -> MemoryStore {
    CartStore::open(CartPersistence::new(storage), RecordingPresenter::new())
}

/// Open a store backed by `dir`, as a new process would after a restart.
#[must_use]
pub fn file_store(dir: &Path) -> FileStore {
    CartStore::open(
        CartPersistence::new(FileStorage::new(dir)),
        RecordingPresenter::new(),
    )
}
