//! `havana menu`.

use std::io::Write;

use havana_core::Price;
use havana_storefront::catalog::{Catalog, Category};
use havana_storefront::display::RenderError;
use havana_storefront::error::{AppError, Result};

/// Write the menu, or a single category of it, to `out`.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown category id, or
/// `AppError::Render` if writing fails.
pub fn list(catalog: &Catalog, category: Option<&str>, out: &mut impl Write) -> Result<()> {
    match category {
        Some(id) => {
            let category = catalog
                .category(id)
                .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;
            write_category(category, out)?;
        }
        None => {
            for (index, category) in catalog.categories.iter().enumerate() {
                if index > 0 {
                    writeln!(out).map_err(RenderError::from)?;
                }
                write_category(category, out)?;
            }
        }
    }
    Ok(())
}

fn write_category(category: &Category, out: &mut impl Write) -> std::result::Result<(), RenderError> {
    writeln!(out, "{} ({})", category.title, category.id)?;
    for item in &category.items {
        let price = Price::new(item.price).map_or_else(|| item.price.to_string(), |p| p.exact());
        match &item.description {
            Some(description) => writeln!(out, "  {:<24} {price:>7}  {description}", item.name)?,
            None => writeln!(out, "  {:<24} {price:>7}", item.name)?,
        }
    }
    Ok(())
}
