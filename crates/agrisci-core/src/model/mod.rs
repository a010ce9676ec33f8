// ── Domain model ──
//
// Canonical entity types handed to the store, the editors and the row
// shapers. Wire types live in `agrisci_api::types`; `crate::convert`
// maps between the two.

mod order;
mod product;
mod shipping;

pub use order::{CartOrder, LineItem};
pub use product::Product;
pub use shipping::{ShippingRecord, ShippingStatus};

/// The three entity kinds the console manages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[strum(to_string = "product")]
    Product,
    #[strum(to_string = "order")]
    Order,
    #[strum(to_string = "shipping information")]
    Shipping,
}

impl EntityKind {
    /// Capitalised noun used at the start of notification messages.
    pub fn title(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Order => "Order",
            Self::Shipping => "Shipping information",
        }
    }
}
