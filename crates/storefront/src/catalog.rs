//! Restaurant menu catalog.
//!
//! The menu is a list of categories (the storefront's menu tabs), each with
//! priced items. It is loaded from YAML; the default menu ships inside the
//! binary (`crates/storefront/menu.yaml`) and `HAVANA_MENU_PATH` can point at
//! a replacement.
//!
//! # Format
//!
//! ```yaml
//! categories:
//!   - id: cafe
//!     title: Café
//!     items:
//!       - name: Latte
//!         price: 45
//!         description: Espresso con leche vaporizada
//! ```

use std::path::Path;

use havana_core::Price;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

const BUILTIN_MENU: &str = include_str!("../menu.yaml");

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Menu file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Menu file is not valid YAML for a catalog.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two categories share an id.
    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    /// Two items share a name (names are cart keys).
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(String),

    /// An item or category has a blank name.
    #[error("Blank name in category {0}")]
    BlankName(String),

    /// An item price is not a valid cart price: zero, negative, finer than a
    /// cent or above [`Price::max`].
    #[error("Invalid price for {name}: {price}")]
    InvalidPrice { name: String, price: Decimal },
}

/// A priced menu item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// A menu tab.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// The whole menu.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    /// The menu bundled with the storefront.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the bundled menu fails validation.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_MENU)
    }

    /// Parse and validate a menu from YAML.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on malformed YAML or any validation failure.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a menu file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or is invalid.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let yaml = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&yaml)?;
        info!(
            path = %path.display(),
            categories = catalog.categories.len(),
            "Loaded menu"
        );
        Ok(catalog)
    }

    /// Check ids, names and prices.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (index, category) in self.categories.iter().enumerate() {
            if category.id.trim().is_empty() {
                return Err(CatalogError::BlankName(category.title.clone()));
            }
            if self
                .categories
                .iter()
                .take(index)
                .any(|earlier| earlier.id == category.id)
            {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
            for item in &category.items {
                if item.name.trim().is_empty() {
                    return Err(CatalogError::BlankName(category.id.clone()));
                }
                if Price::positive(item.price).is_none() {
                    return Err(CatalogError::InvalidPrice {
                        name: item.name.clone(),
                        price: item.price,
                    });
                }
            }
        }

        let mut names: Vec<String> = self.items().map(|item| item.name.to_lowercase()).collect();
        names.sort_unstable();
        let duplicate = names.windows(2).find_map(|pair| match pair {
            [a, b] if a == b => Some(a.clone()),
            _ => None,
        });
        if let Some(name) = duplicate {
            return Err(CatalogError::DuplicateItem(name));
        }
        Ok(())
    }

    /// Every item, in menu order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|category| category.items.iter())
    }

    /// Find an item by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&MenuItem> {
        let wanted = name.trim().to_lowercase();
        self.items().find(|item| item.name.to_lowercase() == wanted)
    }

    /// Find a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }
}
