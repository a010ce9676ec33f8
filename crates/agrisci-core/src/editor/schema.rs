// Per-kind editor schema and shared field parsing.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use agrisci_api::Resource;

use super::FormValues;
use crate::error::CoreError;
use crate::model::EntityKind;

/// How a field's text is interpreted at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Parsed to [`Decimal`].
    Decimal,
    /// Parsed to a positive integer.
    Integer,
    /// Comma-separated list of URLs.
    UrlList,
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire / form key, e.g. `orderId`.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Correlation key; read-only once the entity exists.
    pub identity: bool,
    /// Value when opening for create.
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: true,
            identity: false,
            default: "",
        }
    }

    pub const fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    pub const fn default_value(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }
}

/// Everything that differs between the product, order and shipping editors.
pub trait EntitySchema: Send + Sync + 'static {
    /// What the dialog edits.
    type Entity: Send + Sync;
    /// Body sent to the create and update endpoints.
    type Payload: Serialize + Send + Sync;

    const KIND: EntityKind;
    const RESOURCE: Resource;
    const FIELDS: &'static [FieldSpec];

    /// Field values for editing an existing entity.
    fn seed(entity: &Self::Entity) -> FormValues;

    /// Id used in `PUT /{resource}/{id}`.
    fn entity_id(entity: &Self::Entity) -> String;

    /// Coerce validated text into the wire payload. Required fields are
    /// already known to be non-empty.
    fn payload(values: &FormValues) -> Result<Self::Payload, CoreError>;

    fn defaults() -> FormValues {
        FormValues::defaults(Self::FIELDS)
    }
}

// ── Field coercion ───────────────────────────────────────────────────

/// Split a comma-separated list, trimming each entry and dropping empties.
pub fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Inverse of [`split_urls`] for seeding a form.
pub fn join_urls(urls: &[String]) -> String {
    urls.join(", ")
}

pub(crate) fn parse_decimal(raw: &str, label: &str) -> Result<Decimal, CoreError> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| CoreError::validation(format!("{label} must be a number.")))
}

pub(crate) fn parse_quantity(raw: &str, label: &str) -> Result<i64, CoreError> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CoreError::validation(format!(
            "{label} must be a whole number of at least 1."
        ))),
    }
}

pub(crate) fn text(values: &FormValues, name: &str) -> String {
    values.get(name).trim().to_owned()
}
