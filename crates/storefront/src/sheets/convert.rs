//! Conversion of raw sheet rows into normalized products.
//!
//! The sheet endpoint returns an array of objects whose values are almost
//! always strings, whose headers drift between `price` and `Price`, and whose
//! cells go missing without warning. Conversion is total: every row maps to
//! exactly one [`Product`], malformed cells degrade to their field defaults,
//! and nothing here can fail.

use farmstand_core::{Price, ProductId};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::catalog::{DEFAULT_IMAGE, Product};

/// Normalize a fetched row set, preserving its order.
pub(super) fn products_from_rows(rows: &[Value]) -> Vec<Product> {
    rows.iter().map(product_from_row).collect()
}

fn product_from_row(row: &Value) -> Product {
    Product {
        id: coerce_id(field(row, "id", "ID")),
        name: coerce_string(field(row, "name", "Name")),
        category: coerce_string(field(row, "category", "Category")),
        description: coerce_string(field(row, "description", "Description")),
        price: coerce_price(field(row, "price", "Price")),
        unit: coerce_string(field(row, "unit", "Unit")),
        image: coerce_image(field(row, "image", "Image")),
        featured: is_truthy(field(row, "featured", "Featured")),
        favorite: is_truthy(field(row, "favorite", "Favorite")),
    }
}

/// Two-casing header fallback. The lower-case form wins when both are
/// present; a non-object row yields no fields at all.
fn field<'a>(row: &'a Value, lower: &str, capitalized: &str) -> Option<&'a Value> {
    row.get(lower).or_else(|| row.get(capitalized))
}

/// Parse the id column as an integer; anything unusable maps to the invalid
/// sentinel.
fn coerce_id(value: Option<&Value>) -> ProductId {
    let id = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    id.map_or(ProductId::INVALID, ProductId::new)
}

/// Parse the price column as a decimal. Unparsable or negative values
/// degrade to zero; the model types prices as non-negative.
fn coerce_price(value: Option<&Value>) -> Price {
    let amount = match value {
        Some(Value::Number(n)) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        Some(Value::String(s)) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    match amount {
        Some(a) if a >= Decimal::ZERO => Price::new(a),
        _ => Price::ZERO,
    }
}

/// String cells pass through; numeric cells keep their digits (sheet exports
/// are inconsistent about quoting); anything else is the empty default.
fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn coerce_image(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => DEFAULT_IMAGE.to_string(),
    }
}

/// The exact truthy encodings are `"TRUE"`, `"true"`, `"1"`, `1`, and `true`.
/// Everything else, including `"FALSE"`, `"True"`, `0`, and absent cells, is
/// false.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.as_str(), "TRUE" | "true" | "1"),
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        _ => false,
    }
}
