// ── Central data store ──
//
// Holds the three fetched collections. Only `DashboardController::load`
// writes here, and always all three at once.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::collection::EntityCollection;
use crate::model::{CartOrder, Product, ShippingRecord};

/// Central store for products, cart orders and shipping records.
///
/// Reads are cheap snapshot clones of the last full refresh.
pub struct DataStore {
    pub(crate) products: EntityCollection<Product>,
    pub(crate) orders: EntityCollection<CartOrder>,
    pub(crate) shipping: EntityCollection<ShippingRecord>,
    pub(crate) last_full_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (last_full_refresh, _) = watch::channel(None);

        Self {
            products: EntityCollection::new(),
            orders: EntityCollection::new(),
            shipping: EntityCollection::new(),
            last_full_refresh,
        }
    }

    /// Replace all three collections and stamp the refresh time.
    pub(crate) fn apply_full_refresh(
        &self,
        products: Vec<Product>,
        orders: Vec<CartOrder>,
        shipping: Vec<ShippingRecord>,
    ) {
        self.products.replace(products);
        self.orders.replace(orders);
        self.shipping.replace(shipping);
        self.last_full_refresh.send_modify(|t| *t = Some(Utc::now()));
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn products_snapshot(&self) -> Arc<Vec<Arc<Product>>> {
        self.products.snapshot()
    }

    pub fn orders_snapshot(&self) -> Arc<Vec<Arc<CartOrder>>> {
        self.orders.snapshot()
    }

    pub fn shipping_snapshot(&self) -> Arc<Vec<Arc<ShippingRecord>>> {
        self.shipping.snapshot()
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub fn product_by_id(&self, id: &str) -> Option<Arc<Product>> {
        self.products.find(|p| p.id == id)
    }

    pub fn shipping_by_id(&self, id: &str) -> Option<Arc<ShippingRecord>> {
        self.shipping.find(|s| s.id == id)
    }

    // ── Counts ───────────────────────────────────────────────────────

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn shipping_count(&self) -> usize {
        self.shipping.len()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_full_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_full_refresh.borrow()
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::model::ShippingStatus;

    fn record(id: &str, order_id: &str) -> ShippingRecord {
        ShippingRecord {
            id: id.into(),
            order_id: order_id.into(),
            full_name: String::new(),
            phone_number: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            country: String::new(),
            status: ShippingStatus::OnTrack,
        }
    }

    #[test]
    fn full_refresh_replaces_everything_and_stamps_time() {
        let store = DataStore::new();
        assert!(store.last_full_refresh().is_none());

        store.apply_full_refresh(
            vec![Product {
                id: "p1".into(),
                name: "Seed".into(),
                description: String::new(),
                price: Decimal::ONE,
                product_information: String::new(),
                detail_description2: None,
                images: vec![],
            }],
            vec![],
            vec![record("s1", "ORD-1"), record("s2", "ORD-2")],
        );

        assert_eq!(store.product_count(), 1);
        assert_eq!(store.order_count(), 0);
        assert_eq!(store.shipping_count(), 2);
        assert!(store.last_full_refresh().is_some());
        assert_eq!(store.shipping_by_id("s2").unwrap().order_id, "ORD-2");
    }
}
