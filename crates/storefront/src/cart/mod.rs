//! Cart state machine and persistence orchestration.
//!
//! A [`Cart`] holds at most one [`CartLine`] per product id; adding a product
//! that is already present increments its quantity instead of appending a
//! duplicate line. Quantities only grow; there is no decrement or removal
//! operation.
//!
//! [`CartStore`] drives the full add flow: resolve the id against the cached
//! catalog, mutate the loaded cart, persist synchronously, and report what
//! happened as an [`AddOutcome`].

pub mod repository;

pub use repository::{CartRepository, FileRepository, MemoryRepository, RepositoryError};

use farmstand_core::ProductId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::catalog::Product;
use crate::sheets::SheetClient;

/// One product's entry in the cart.
///
/// Carries the full product attribute set inline, so the persisted blob is
/// self-contained and renderable without a catalog fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

/// Ordered cart contents; at most one line per product id.
///
/// Serializes as a bare array of lines, the same shape the blob has on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities (the badge number).
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Merge one unit of `product` into the cart.
    ///
    /// Increments the existing line when the id is already present, appends a
    /// fresh line with quantity 1 otherwise.
    pub fn add(&mut self, product: Product) -> AddOutcome {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity = line.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                name: line.product.name.clone(),
                quantity: line.quantity,
            };
        }

        let name = product.name.clone();
        self.lines.push(CartLine {
            product,
            quantity: 1,
        });
        AddOutcome::Added { name }
    }
}

/// What an add did, carrying the data a notification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// First line for this product.
    Added { name: String },
    /// The product was already in the cart; its quantity grew.
    Incremented { name: String, quantity: u32 },
}

impl std::fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { name } => write!(f, "{name} added to cart!"),
            Self::Incremented { name, .. } => write!(f, "Added another {name} to cart!"),
        }
    }
}

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The id resolved to no catalog product.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The mutated cart could not be persisted.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Owns the persisted cart and its mutation flow.
pub struct CartStore<R> {
    sheets: SheetClient,
    repository: R,
}

impl<R: CartRepository> CartStore<R> {
    /// Create a store over a catalog source and a cart repository.
    pub const fn new(sheets: SheetClient, repository: R) -> Self {
        Self { sheets, repository }
    }

    /// Add one unit of `id` to the cart.
    ///
    /// The id is resolved against the (cached) catalog with strict equality;
    /// unknown ids and the invalid sentinel leave the persisted cart
    /// untouched and report [`CartError::NotFound`]. On success the updated
    /// cart is persisted before the outcome is returned.
    ///
    /// # Errors
    ///
    /// [`CartError::NotFound`] for an unresolvable id,
    /// [`CartError::Repository`] when the save fails.
    #[instrument(skip(self))]
    pub async fn add(&self, id: ProductId) -> Result<AddOutcome, CartError> {
        let catalog = self.sheets.catalog().await;
        let product = catalog.find(id).ok_or(CartError::NotFound(id))?.clone();

        let mut cart = self.repository.load();
        let outcome = cart.add(product);
        self.repository.save(&cart)?;
        Ok(outcome)
    }

    /// Current badge count: sum of quantities over the persisted cart.
    ///
    /// Absent or corrupt persisted state counts as zero.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.repository.load().total_quantity()
    }

    /// Tolerant read of the persisted cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.repository.load()
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_IMAGE;
    use farmstand_core::Price;
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: "fruit".to_string(),
            description: String::new(),
            price: Price::new(Decimal::new(300, 2)),
            unit: "kg".to_string(),
            image: DEFAULT_IMAGE.to_string(),
            featured: false,
            favorite: false,
        }
    }

    #[test]
    fn first_add_appends_a_line_with_quantity_one() {
        let mut cart = Cart::default();
        let outcome = cart.add(product(1, "Apples"));

        assert_eq!(
            outcome,
            AddOutcome::Added {
                name: "Apples".to_string()
            }
        );
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_quantity(), 1);
    }

    #[test]
    fn repeat_add_increments_instead_of_duplicating() {
        let mut cart = Cart::default();
        cart.add(product(1, "Apples"));
        let outcome = cart.add(product(1, "Apples"));

        assert_eq!(
            outcome,
            AddOutcome::Incremented {
                name: "Apples".to_string(),
                quantity: 2
            }
        );
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn distinct_ids_keep_their_own_lines_in_order() {
        let mut cart = Cart::default();
        cart.add(product(2, "Pears"));
        cart.add(product(1, "Apples"));
        cart.add(product(2, "Pears"));

        let names: Vec<_> = cart
            .lines()
            .iter()
            .map(|line| line.product.name.as_str())
            .collect();
        assert_eq!(names, ["Pears", "Apples"]);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn badge_count_sums_quantities() {
        let mut cart = Cart::default();
        cart.add(product(1, "Apples"));
        cart.add(product(1, "Apples"));
        cart.add(product(2, "Pears"));
        cart.add(product(2, "Pears"));
        cart.add(product(2, "Pears"));

        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn outcome_messages_match_the_shop_voice() {
        let mut cart = Cart::default();
        assert_eq!(
            cart.add(product(1, "Apples")).to_string(),
            "Apples added to cart!"
        );
        assert_eq!(
            cart.add(product(1, "Apples")).to_string(),
            "Added another Apples to cart!"
        );
    }

    #[test]
    fn cart_blob_round_trips_through_json() {
        let mut cart = Cart::default();
        cart.add(product(1, "Apples"));
        cart.add(product(2, "Pears"));
        cart.add(product(1, "Apples"));

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }

    #[test]
    fn cart_blob_is_a_bare_array_of_flattened_lines() {
        let mut cart = Cart::default();
        cart.add(product(1, "Apples"));

        let value = serde_json::to_value(&cart).expect("serialize");
        let lines = value.as_array().expect("blob is an array");
        let line = lines.first().expect("one line");
        // product fields sit inline next to quantity, like {...product, quantity}
        assert_eq!(line["name"], "Apples");
        assert_eq!(line["quantity"], 1);
    }
}
