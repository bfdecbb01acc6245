//! Product catalog model and order-preserving filters.
//!
//! A [`Catalog`] is the ordered sequence of products produced by sheet
//! normalization. Every filter below preserves sheet order, so "featured" and
//! "favorites" strips render in the order the shop owner arranged the rows.

use farmstand_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// Fallback image path for rows without a usable image column.
pub const DEFAULT_IMAGE: &str = "img/default.jpg";

/// A normalized catalog entry.
///
/// Every field is populated. The sheet may omit, rename-case, or mistype any
/// column; normalization resolves each field to its documented default
/// instead of erroring, so a `Product` can always be rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: Price,
    /// Sales unit, e.g. "kg" or "box".
    pub unit: String,
    pub image: String,
    pub featured: bool,
    pub favorite: bool,
}

/// The ordered product sequence produced by normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap an already-normalized product sequence.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The empty catalog, the degraded result when the sheet is unreachable.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// All products in sheet order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by its canonical id.
    ///
    /// Strict equality only; the invalid sentinel never resolves, so rows
    /// that arrived without an id cannot be addressed.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        if !id.is_valid() {
            return None;
        }
        self.products.iter().find(|p| p.id == id)
    }

    /// Products flagged for the homepage feature strip.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    /// The owner's picks ("bestsellers").
    #[must_use]
    pub fn favorites(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.favorite).collect()
    }

    /// Products whose category equals `category`, case-insensitively.
    #[must_use]
    pub fn in_category(&self, category: &str) -> Vec<&Product> {
        let needle = category.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.category.to_lowercase() == needle)
            .collect()
    }

    /// Case-insensitive substring search over name, description, and
    /// category.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl IntoIterator for Catalog {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
