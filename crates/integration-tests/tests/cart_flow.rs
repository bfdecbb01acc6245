//! The add/merge/persist flow end to end against the file repository.

#![allow(clippy::indexing_slicing)]

use axum::http::StatusCode;
use farmstand_core::ProductId;
use farmstand_integration_tests::{client_for, serve_sheet};
use farmstand_storefront::cart::{AddOutcome, CartError, CartStore, FileRepository};

const SHEET_BODY: &str = r#"[
    {"id": "1", "name": "Apples", "category": "fruit", "price": "3.20", "unit": "kg"},
    {"id": "2", "name": "Wildflower Honey", "category": "pantry", "price": "8.50", "unit": "jar"}
]"#;

async fn store_in(
    dir: &tempfile::TempDir,
) -> CartStore<FileRepository> {
    let endpoint = serve_sheet(StatusCode::OK, SHEET_BODY).await;
    let repository = FileRepository::new(dir.path().join("cart.json"));
    CartStore::new(client_for(endpoint), repository)
}

#[tokio::test]
async fn first_add_creates_a_line_and_persists_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir).await;

    let outcome = store.add(ProductId::new(1)).await.expect("add");
    assert_eq!(
        outcome,
        AddOutcome::Added {
            name: "Apples".to_string()
        }
    );

    let cart = store.cart();
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 1);
    assert_eq!(cart.lines()[0].product.name, "Apples");
}

#[tokio::test]
async fn adding_the_same_id_twice_merges_into_one_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir).await;

    store.add(ProductId::new(1)).await.expect("first add");
    let outcome = store.add(ProductId::new(1)).await.expect("second add");

    assert_eq!(
        outcome,
        AddOutcome::Incremented {
            name: "Apples".to_string(),
            quantity: 2
        }
    );

    let cart = store.cart();
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.total_quantity(), 2);
}

#[tokio::test]
async fn unknown_id_reports_not_found_and_mutates_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir).await;

    store.add(ProductId::new(2)).await.expect("seed the cart");
    let before = store.cart();

    let err = store.add(ProductId::new(99)).await.expect_err("unknown id");
    assert!(matches!(err, CartError::NotFound(id) if id == ProductId::new(99)));

    assert_eq!(store.cart(), before);
}

#[tokio::test]
async fn the_invalid_sentinel_never_resolves() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir).await;

    let err = store.add(ProductId::INVALID).await.expect_err("sentinel");
    assert!(matches!(err, CartError::NotFound(_)));
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn badge_count_sums_quantities_across_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir).await;

    store.add(ProductId::new(1)).await.expect("add");
    store.add(ProductId::new(1)).await.expect("add");
    store.add(ProductId::new(2)).await.expect("add");
    store.add(ProductId::new(2)).await.expect("add");
    store.add(ProductId::new(2)).await.expect("add");

    assert_eq!(store.total_quantity(), 5);
}

#[tokio::test]
async fn cart_survives_across_store_instances() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let store = store_in(&dir).await;
        store.add(ProductId::new(1)).await.expect("add");
        store.add(ProductId::new(2)).await.expect("add");
        store.add(ProductId::new(1)).await.expect("add");
    }

    // A fresh store over the same file sees the identical line sequence
    let store = store_in(&dir).await;
    let cart = store.cart();

    let summary: Vec<_> = cart
        .lines()
        .iter()
        .map(|line| (line.product.name.as_str(), line.quantity))
        .collect();
    assert_eq!(summary, [("Apples", 2), ("Wildflower Honey", 1)]);
}

#[tokio::test]
async fn persisted_blob_is_a_flat_line_array() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir).await;
    store.add(ProductId::new(2)).await.expect("add");

    let raw = std::fs::read_to_string(dir.path().join("cart.json")).expect("read blob");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("blob parses");

    let lines = value.as_array().expect("blob is an array");
    assert_eq!(lines.len(), 1);
    // Product fields sit inline next to quantity, like {...product, quantity}
    assert_eq!(lines[0]["name"], "Wildflower Honey");
    assert_eq!(lines[0]["price"], "8.50");
    assert_eq!(lines[0]["quantity"], 1);
}

#[tokio::test]
async fn corrupt_blob_reads_as_an_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("cart.json"), b"{definitely broken")
        .expect("write corrupt blob");

    let store = store_in(&dir).await;
    assert_eq!(store.total_quantity(), 0);
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn add_recovers_an_empty_cart_from_corrupt_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("cart.json"), b"[{\"broken\": true}")
        .expect("write corrupt blob");

    let store = store_in(&dir).await;
    let outcome = store.add(ProductId::new(1)).await.expect("add");

    assert_eq!(
        outcome,
        AddOutcome::Added {
            name: "Apples".to_string()
        }
    );
    assert_eq!(store.cart().total_quantity(), 1);
}
