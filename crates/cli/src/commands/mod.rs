//! Command implementations and the wiring they share.

pub mod cart;
pub mod checkout;
pub mod menu;
mod output;

use havana_storefront::cart::{CartPersistence, CartStore};
use havana_storefront::catalog::Catalog;
use havana_storefront::config::StorefrontConfig;
use havana_storefront::display::{HtmlPresenter, Presenter, TerminalPresenter};
use havana_storefront::error::Result;
use havana_storefront::storage::FileStorage;

pub use output::Coalescing;

/// The cart store as the CLI runs it: file-backed, rendering to stdout once
/// the command is done.
pub type Store = CartStore<FileStorage, Coalescing<Box<dyn Presenter>>>;

/// Open the persisted cart. Nothing is printed until the presenter is
/// flushed.
pub fn open_store(config: &StorefrontConfig, html: bool) -> Store {
    let storage = FileStorage::new(&config.data_dir).with_quota(Some(config.storage_quota));
    let persistence = CartPersistence::with_key(storage, config.cart_key.clone());
    let presenter: Box<dyn Presenter> = if html {
        Box::new(HtmlPresenter::new(std::io::stdout()))
    } else {
        Box::new(TerminalPresenter::new(std::io::stdout()))
    };
    CartStore::open(persistence, Coalescing::new(presenter))
}

/// The configured menu file, or the built-in menu.
///
/// # Errors
///
/// Returns `AppError::Catalog` if the menu cannot be read or is invalid.
pub fn load_catalog(config: &StorefrontConfig) -> Result<Catalog> {
    let catalog = match &config.menu_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}
