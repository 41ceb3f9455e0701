//! `havana cart`.

use havana_storefront::cart::CartStore;
use havana_storefront::catalog::Catalog;
use havana_storefront::display::Presenter;
use havana_storefront::error::{AppError, Result};
use havana_storefront::storage::KeyValueStore;

/// Add one unit of a menu item at its menu price.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the name is not on the menu; the cart is
/// left untouched.
pub fn add_from_menu<S, P>(store: &mut CartStore<S, P>, catalog: &Catalog, name: &str) -> Result<()>
where
    S: KeyValueStore,
    P: Presenter,
{
    if catalog.find(name).is_none() {
        return Err(AppError::NotFound(format!(
            "{name} is not on the menu (use --price to add it anyway)"
        )));
    }
    store.add_from_catalog(catalog, name);
    Ok(())
}
