// ── API-to-domain type conversions ──
//
// Bridges raw `agrisci_api::types` response bodies into canonical
// `agrisci_core::model` types, and domain values back into request bodies.

use std::str::FromStr;

use tracing::warn;

use agrisci_api::types::{CartResponse, LineItemResponse, ProductResponse, ShippingResponse};

use crate::model::{CartOrder, LineItem, Product, ShippingRecord, ShippingStatus};

// ── Helpers ────────────────────────────────────────────────────────

/// Map a wire status onto [`ShippingStatus`].
///
/// Missing values fall back to `ON_TRACK`; unknown ones are logged and
/// fall back the same way so a single odd record does not fail the load.
fn parse_status(raw: Option<&str>, id: &str) -> ShippingStatus {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => ShippingStatus::default(),
        Some(s) => ShippingStatus::from_str(&s.to_ascii_uppercase()).unwrap_or_else(|_| {
            warn!(shipping_id = id, status = s, "unknown shipping status, using ON_TRACK");
            ShippingStatus::default()
        }),
    }
}

// ── Products ───────────────────────────────────────────────────────

impl From<ProductResponse> for Product {
    fn from(p: ProductResponse) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            product_information: p.product_information,
            detail_description2: p.detail_description2.filter(|s| !s.is_empty()),
            images: p.images,
        }
    }
}

// ── Orders ─────────────────────────────────────────────────────────

impl From<LineItemResponse> for LineItem {
    fn from(item: LineItemResponse) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

impl From<CartResponse> for CartOrder {
    fn from(cart: CartResponse) -> Self {
        Self {
            id: cart.id,
            order_id: cart.order_id,
            items: cart.items.into_iter().map(LineItem::from).collect(),
        }
    }
}

// ── Shipping ───────────────────────────────────────────────────────

impl From<ShippingResponse> for ShippingRecord {
    fn from(s: ShippingResponse) -> Self {
        let status = parse_status(s.status.as_deref(), &s.id);
        Self {
            id: s.id,
            order_id: s.order_id,
            full_name: s.full_name,
            phone_number: s.phone_number,
            email: s.email,
            address: s.address,
            city: s.city,
            postal_code: s.postal_code,
            country: s.country,
            status,
        }
    }
}
