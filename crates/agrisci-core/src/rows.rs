// ── Grid row shaping ──
//
// The table widget gets flat, pre-shaped rows. Products and shipping
// records map one-to-one; each cart order expands to one row per line
// item.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::model::{CartOrder, EntityKind, Product, ShippingRecord, ShippingStatus};

/// Which row set the dashboard shows.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumIter,
)]
pub enum Tab {
    #[default]
    Products,
    Orders,
    Shipping,
}

impl Tab {
    pub fn kind(self) -> EntityKind {
        match self {
            Self::Products => EntityKind::Product,
            Self::Orders => EntityKind::Order,
            Self::Shipping => EntityKind::Shipping,
        }
    }
}

impl From<EntityKind> for Tab {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Product => Self::Products,
            EntityKind::Order => Self::Orders,
            EntityKind::Shipping => Self::Shipping,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
}

/// One line item of a cart order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    /// `"{orderId}-{itemId}"`, unique per row.
    pub id: String,
    /// The owning cart; update and delete address this id.
    pub cart_id: String,
    pub item_id: String,
    pub order_id: String,
    pub item_name: String,
    pub price: Decimal,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRow {
    pub id: String,
    pub order_id: String,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub status: ShippingStatus,
}

/// The row set for one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rows {
    Products(Vec<ProductRow>),
    Orders(Vec<OrderRow>),
    Shipping(Vec<ShippingRow>),
}

impl Rows {
    pub fn len(&self) -> usize {
        match self {
            Self::Products(rows) => rows.len(),
            Self::Orders(rows) => rows.len(),
            Self::Shipping(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Summary counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub products: usize,
    /// Carts, not line items.
    pub orders: usize,
    pub shipping: usize,
}

pub fn order_row_id(order_id: &str, item_id: &str) -> String {
    format!("{order_id}-{item_id}")
}

pub fn product_rows(products: &[Arc<Product>]) -> Vec<ProductRow> {
    products
        .iter()
        .map(|p| ProductRow {
            id: p.id.clone(),
            name: p.name.clone(),
            price: p.price,
            description: p.description.clone(),
        })
        .collect()
}

pub fn order_rows(orders: &[Arc<CartOrder>]) -> Vec<OrderRow> {
    orders
        .iter()
        .flat_map(|order| {
            order.items.iter().map(|item| OrderRow {
                id: order_row_id(&order.order_id, &item.id),
                cart_id: order.id.clone(),
                item_id: item.id.clone(),
                order_id: order.order_id.clone(),
                item_name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
            })
        })
        .collect()
}

pub fn shipping_rows(records: &[Arc<ShippingRecord>]) -> Vec<ShippingRow> {
    records
        .iter()
        .map(|s| ShippingRow {
            id: s.id.clone(),
            order_id: s.order_id.clone(),
            full_name: s.full_name.clone(),
            phone_number: s.phone_number.clone(),
            email: s.email.clone(),
            address: s.address.clone(),
            city: s.city.clone(),
            postal_code: s.postal_code.clone(),
            country: s.country.clone(),
            status: s.status,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::LineItem;

    fn item(id: &str, name: &str, qty: i64) -> LineItem {
        LineItem {
            id: id.into(),
            name: name.into(),
            price: Decimal::ONE,
            quantity: qty,
        }
    }

    #[test]
    fn orders_flatten_to_line_items() {
        let orders = vec![
            Arc::new(CartOrder {
                id: "c1".into(),
                order_id: "ORD-1".into(),
                items: vec![item("1", "A", 1), item("2", "B", 2), item("3", "C", 3)],
            }),
            Arc::new(CartOrder {
                id: "c2".into(),
                order_id: "ORD-2".into(),
                items: vec![],
            }),
        ];

        let rows = order_rows(&orders);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ORD-1-1", "ORD-1-2", "ORD-1-3"]);
        assert!(rows.iter().all(|r| r.order_id == "ORD-1" && r.cart_id == "c1"));
        assert_eq!(rows[1].item_name, "B");
    }

    #[test]
    fn tab_maps_to_kind() {
        assert_eq!(Tab::Orders.kind(), EntityKind::Order);
        assert_eq!(Tab::from(EntityKind::Shipping), Tab::Shipping);
    }
}
