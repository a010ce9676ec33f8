use agrisci_api::Resource;
use agrisci_api::types::ProductRequest;

use super::schema::{EntitySchema, FieldKind, FieldSpec, join_urls, parse_decimal, split_urls, text};
use super::FormValues;
use crate::error::CoreError;
use crate::messages;
use crate::model::{EntityKind, Product};

/// Editor schema for catalog products.
#[derive(Debug)]
pub struct ProductSchema;

impl EntitySchema for ProductSchema {
    type Entity = Product;
    type Payload = ProductRequest;

    const KIND: EntityKind = EntityKind::Product;
    const RESOURCE: Resource = Resource::Products;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("name", "Name"),
        FieldSpec::text("description", "Description"),
        FieldSpec::text("price", "Price").kind(FieldKind::Decimal),
        FieldSpec::text("productInformation", "Product Information"),
        FieldSpec::text("detailDescription2", "Detail Description").optional(),
        FieldSpec::text("images", "Images (comma-separated URLs)").kind(FieldKind::UrlList),
    ];

    fn seed(p: &Product) -> FormValues {
        let mut values = Self::defaults();
        values.set("name", p.name.clone());
        values.set("description", p.description.clone());
        values.set("price", p.price.to_string());
        values.set("productInformation", p.product_information.clone());
        values.set(
            "detailDescription2",
            p.detail_description2.clone().unwrap_or_default(),
        );
        values.set("images", join_urls(&p.images));
        values
    }

    fn entity_id(p: &Product) -> String {
        p.id.clone()
    }

    fn payload(values: &FormValues) -> Result<ProductRequest, CoreError> {
        let images = split_urls(values.get("images"));
        if images.is_empty() {
            return Err(CoreError::validation(messages::REQUIRED_FIELDS));
        }

        Ok(ProductRequest {
            name: text(values, "name"),
            description: text(values, "description"),
            price: parse_decimal(values.get("price"), "Price")?,
            product_information: text(values, "productInformation"),
            detail_description2: text(values, "detailDescription2"),
            images,
        })
    }
}
