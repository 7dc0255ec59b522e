//! Catalog types and browse helpers.
//!
//! Products are owned and mutated exclusively by the external persistence
//! service; the core treats them as read-only input.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A jersey product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Stable catalog identifier.
    pub id: ProductId,
    /// Display name (team name).
    pub name: String,
    /// Base unit price, before any customization surcharge.
    pub price: Money,
    /// Image reference.
    pub image_url: String,
    /// Category name.
    pub category: String,
    /// Units in stock.
    pub stock: i64,
    /// Stock level at or below which the product counts as low-stock.
    pub low_stock_threshold: i64,
    /// Featured on the storefront.
    pub featured: bool,
}

impl Product {
    /// Create a new product.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image_url: String::new(),
            category: String::new(),
            stock: 0,
            low_stock_threshold: 5,
            featured: false,
        }
    }

    /// Check if any stock remains.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if stock is at or below the low-stock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.in_stock() && self.stock <= self.low_stock_threshold
    }
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortBy {
    /// Featured products first.
    #[default]
    Featured,
    /// Cheapest first.
    PriceLowHigh,
    /// Most expensive first.
    PriceHighLow,
    /// Alphabetical by name.
    Name,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Featured => "featured",
            SortBy::PriceLowHigh => "price-low",
            SortBy::PriceHighLow => "price-high",
            SortBy::Name => "name",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "featured" => Some(SortBy::Featured),
            "price-low" => Some(SortBy::PriceLowHigh),
            "price-high" => Some(SortBy::PriceHighLow),
            "name" => Some(SortBy::Name),
            _ => None,
        }
    }
}

/// Filter products by search term and category.
///
/// The search term matches case-insensitively against the product name; an
/// empty term matches everything. `None` or `"All"` as the category keeps
/// every category.
pub fn filter_products<'a>(
    products: &'a [Product],
    search_term: &str,
    category: Option<&str>,
) -> Vec<&'a Product> {
    let term = search_term.trim().to_lowercase();
    products
        .iter()
        .filter(|p| term.is_empty() || p.name.to_lowercase().contains(&term))
        .filter(|p| match category {
            None | Some("All") => true,
            Some(c) => p.category == c,
        })
        .collect()
}

/// Sort a product listing in place.
///
/// The sort is stable: products that compare equal keep their catalog order.
pub fn sort_products(products: &mut [&Product], sort_by: SortBy) {
    products.sort_by(|a, b| match sort_by {
        SortBy::Featured => b.featured.cmp(&a.featured),
        SortBy::PriceLowHigh => a.price.amount_minor.cmp(&b.price.amount_minor),
        SortBy::PriceHighLow => b.price.amount_minor.cmp(&a.price.amount_minor),
        SortBy::Name => a.name.cmp(&b.name),
    });
}

/// Collect the distinct category names, in catalog order.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for p in products {
        if !out.iter().any(|c| c == &p.category) {
            out.push(p.category.clone());
        }
    }
    out
}
