use std::str::FromStr;

use strum::VariantNames;

use agrisci_api::Resource;
use agrisci_api::types::ShippingRequest;

use super::schema::{EntitySchema, FieldKind, FieldSpec, text};
use super::FormValues;
use crate::error::CoreError;
use crate::model::{EntityKind, ShippingRecord, ShippingStatus};

/// Editor schema for shipping records.
#[derive(Debug)]
pub struct ShippingSchema;

impl EntitySchema for ShippingSchema {
    type Entity = ShippingRecord;
    type Payload = ShippingRequest;

    const KIND: EntityKind = EntityKind::Shipping;
    const RESOURCE: Resource = Resource::Shippings;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("orderId", "Order ID").identity(),
        FieldSpec::text("fullName", "Full Name"),
        FieldSpec::text("phoneNumber", "Phone Number"),
        FieldSpec::text("email", "Email"),
        FieldSpec::text("address", "Address"),
        FieldSpec::text("city", "City"),
        FieldSpec::text("postalCode", "Postal Code"),
        FieldSpec::text("country", "Country"),
        FieldSpec::text("status", "Status")
            .kind(FieldKind::Choice(ShippingStatus::VARIANTS))
            .optional()
            .default_value("ON_TRACK"),
    ];

    fn seed(s: &ShippingRecord) -> FormValues {
        let mut values = Self::defaults();
        values.set("orderId", s.order_id.clone());
        values.set("fullName", s.full_name.clone());
        values.set("phoneNumber", s.phone_number.clone());
        values.set("email", s.email.clone());
        values.set("address", s.address.clone());
        values.set("city", s.city.clone());
        values.set("postalCode", s.postal_code.clone());
        values.set("country", s.country.clone());
        values.set("status", s.status.as_str().to_owned());
        values
    }

    fn entity_id(s: &ShippingRecord) -> String {
        s.id.clone()
    }

    fn payload(values: &FormValues) -> Result<ShippingRequest, CoreError> {
        let raw_status = values.get("status").trim();
        let status = if raw_status.is_empty() {
            ShippingStatus::default()
        } else {
            ShippingStatus::from_str(raw_status)
                .map_err(|_| CoreError::validation(format!("Unknown status: {raw_status}")))?
        };

        Ok(ShippingRequest {
            order_id: text(values, "orderId"),
            full_name: text(values, "fullName"),
            phone_number: text(values, "phoneNumber"),
            email: text(values, "email"),
            address: text(values, "address"),
            city: text(values, "city"),
            postal_code: text(values, "postalCode"),
            country: text(values, "country"),
            status: status.as_str().to_owned(),
        })
    }
}
