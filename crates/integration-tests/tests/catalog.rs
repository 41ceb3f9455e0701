//! Integration tests for the menu catalog driving the cart.

use havana_core::Price;
use havana_integration_tests::memory_store;
use havana_storefront::catalog::{Catalog, CatalogError};

#[test]
fn test_builtin_menu_is_valid() {
    let catalog = Catalog::builtin().expect("Built-in menu is valid");

    let ids: Vec<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["cafe", "bebidas-frias", "postres", "desayunos"]);
    assert!(catalog.items().all(|item| Price::positive(item.price).is_some()));
}

#[test]
fn test_add_from_catalog_uses_menu_spelling_and_price() {
    let catalog = Catalog::builtin().expect("Built-in menu is valid");
    let mut store = memory_store();

    store.add_from_catalog(&catalog, "  latte ");
    store.add_from_catalog(&catalog, "LATTE");
    store.add_from_catalog(&catalog, "Concha");

    let latte = store.cart().get("Latte").expect("Latte in cart");
    assert_eq!(latte.quantity, 2);
    assert_eq!(latte.price, Price::from(45));
    assert_eq!(store.total().exact(), "$112.5");
}

#[test]
fn test_unknown_menu_item_is_ignored() {
    let catalog = Catalog::builtin().expect("Built-in menu is valid");
    let mut store = memory_store();
    store.presenter_mut().clear();

    store.add_from_catalog(&catalog, "Mojito");

    assert!(store.cart().is_empty());
    assert!(store.presenter().events.is_empty());
}

#[test]
fn test_custom_menu_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("menu.yaml");
    std::fs::write(
        &path,
        "categories:\n  - id: especiales\n    title: Especiales\n    items:\n      - name: Pan de la casa\n        price: 28.5\n",
    )
    .expect("Failed to write menu");

    let catalog = Catalog::from_path(&path).expect("Menu is valid");
    let item = catalog.find("pan de la casa").expect("Item on the menu");

    assert_eq!(item.name, "Pan de la casa");
    assert!(catalog.category("especiales").is_some());
}

#[test]
fn test_menu_with_duplicate_names_is_rejected() {
    let yaml = "categories:\n  - id: a\n    title: A\n    items:\n      - name: Latte\n        price: 45\n  - id: b\n    title: B\n    items:\n      - name: latte\n        price: 40\n";

    assert!(matches!(
        Catalog::from_yaml_str(yaml),
        Err(CatalogError::DuplicateItem(_))
    ));
}

#[test]
fn test_missing_menu_file_is_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    assert!(matches!(
        Catalog::from_path(&dir.path().join("missing.yaml")),
        Err(CatalogError::Io(_))
    ));
}
