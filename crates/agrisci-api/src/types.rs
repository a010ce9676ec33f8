// Wire types for the admin JSON API.
//
// All bodies are camelCase JSON. Ids are opaque: the backend sends some as
// strings and some as numbers, so every id field is normalised to `String`
// on the way in.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ── Id normalisation ─────────────────────────────────────────────────

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

fn opt_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Products ─────────────────────────────────────────────────────────

/// Product as returned by `GET /products`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub name: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub product_information: String,
    #[serde(default)]
    pub detail_description2: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Body for `POST /products/add` and `PUT /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub product_information: String,
    pub detail_description2: String,
    pub images: Vec<String>,
}

// ── Cart orders ──────────────────────────────────────────────────────

/// Cart as returned by `GET /cart`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub order_id: String,
    #[serde(default)]
    pub items: Vec<LineItemResponse>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i64,
}

/// Body for `POST /cart/add` and `PUT /cart/{id}`.
///
/// Carries a single line item; the backend folds it into the cart keyed by
/// `orderId`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest {
    pub order_id: String,
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i64,
}

// ── Shipping ─────────────────────────────────────────────────────────

/// Shipping record as returned by `GET /shippings`.
///
/// `status` stays a raw string here; `agrisci-core` maps it onto its enum.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingResponse {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub order_id: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub full_name: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub email: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub address: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub city: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "opt_string_or_null")]
    pub country: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body for `POST /shippings/save` and `PUT /shippings/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRequest {
    pub order_id: String,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub status: String,
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful `POST /admin/login` body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
