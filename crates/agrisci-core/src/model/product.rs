use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub product_information: String,
    pub detail_description2: Option<String>,
    /// Image URLs, in display order.
    pub images: Vec<String>,
}
