use agrisci_api::Resource;
use agrisci_api::types::CartRequest;

use super::schema::{EntitySchema, FieldKind, FieldSpec, parse_decimal, parse_quantity, text};
use super::FormValues;
use crate::error::CoreError;
use crate::model::{CartOrder, EntityKind, LineItem};

/// One line item of a cart, as edited by the order dialog.
///
/// The dialog edits a single row of the orders table; updates go to the
/// owning cart (`PUT /cart/{cart_id}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub cart_id: String,
    pub order_id: String,
    pub item: LineItem,
}

impl OrderLine {
    pub fn new(order: &CartOrder, item: &LineItem) -> Self {
        Self {
            cart_id: order.id.clone(),
            order_id: order.order_id.clone(),
            item: item.clone(),
        }
    }
}

/// Editor schema for cart orders.
#[derive(Debug)]
pub struct OrderSchema;

impl EntitySchema for OrderSchema {
    type Entity = OrderLine;
    type Payload = CartRequest;

    const KIND: EntityKind = EntityKind::Order;
    const RESOURCE: Resource = Resource::Cart;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("orderId", "Order ID").identity(),
        FieldSpec::text("itemName", "Item Name"),
        FieldSpec::text("price", "Price").kind(FieldKind::Decimal),
        FieldSpec::text("quantity", "Quantity").kind(FieldKind::Integer),
    ];

    fn seed(line: &OrderLine) -> FormValues {
        let mut values = Self::defaults();
        values.set("orderId", line.order_id.clone());
        values.set("itemName", line.item.name.clone());
        values.set("price", line.item.price.to_string());
        values.set("quantity", line.item.quantity.to_string());
        values
    }

    fn entity_id(line: &OrderLine) -> String {
        line.cart_id.clone()
    }

    fn payload(values: &FormValues) -> Result<CartRequest, CoreError> {
        Ok(CartRequest {
            order_id: text(values, "orderId"),
            item_name: text(values, "itemName"),
            price: parse_decimal(values.get("price"), "Price")?,
            quantity: parse_quantity(values.get("quantity"), "Quantity")?,
        })
    }
}
