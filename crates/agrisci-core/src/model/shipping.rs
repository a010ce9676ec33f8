use serde::{Deserialize, Serialize};

/// Delivery state of a shipment.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
    strum::VariantNames,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingStatus {
    Delivered,
    #[default]
    OnTrack,
    Failed,
    Cancelled,
}

impl ShippingStatus {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Shipment details for one order.
///
/// Linked to a [`CartOrder`](super::CartOrder) only by `order_id`; nothing
/// enforces that the order exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRecord {
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn status_round_trips_wire_names() {
        assert_eq!(ShippingStatus::OnTrack.as_str(), "ON_TRACK");
        assert_eq!(
            ShippingStatus::from_str("CANCELLED").unwrap(),
            ShippingStatus::Cancelled
        );
        assert!(ShippingStatus::from_str("LOST").is_err());
    }

    #[test]
    fn default_status_is_on_track() {
        assert_eq!(ShippingStatus::default(), ShippingStatus::OnTrack);
    }
}
