use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cart-based order.
///
/// `order_id` is the external correlation key shared with shipping
/// records. It never changes once the cart exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOrder {
    pub id: String,
    pub order_id: String,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    /// Product name; products are referenced by name, not id.
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
}
