use super::{ListableModel, Listing, SearchField};
use crate::domain::validator::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub price: String,
    /// Mean of the product's review ratings, maintained by the store.
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
    pub version: i32,
}

impl ListableModel for Product {
    const LISTING: Listing = Listing {
        table: "products",
        primary_key: "product_id",
        columns: "product_id, name, description, category, image_url, price, average_rating, created_at, version",
        search_fields: &[
            SearchField { param: "name", column: "name" },
            SearchField { param: "category", column: "category" },
        ],
        sort_safelist: &[
            "product_id",
            "name",
            "-product_id",
            "-name",
        ],
        default_sort: "product_id",
    };
}

/// Client-writable product fields. Missing fields decode as empty and are
/// reported by [`validate_product`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub price: String,
}

/// Partial update payload; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<String>,
}

impl Product {
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            image_url: self.image_url.clone(),
            price: self.price.clone(),
        }
    }
}

impl ProductDraft {
    pub fn apply(mut self, patch: ProductPatch) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        self
    }
}

pub fn validate_product(v: &mut Validator, p: &ProductDraft) {
    v.check(!p.name.is_empty(), "name", "this is required");
    v.check(p.name.len() <= 100, "name", "cannot be more than 100 characters long");
    v.check(!p.description.is_empty(), "description", "this is required");
    v.check(
        p.description.len() <= 500,
        "description",
        "cannot be more than 500 characters long",
    );
    v.check(!p.category.is_empty(), "category", "this is required");
    v.check(!p.image_url.is_empty(), "image_url", "this is required");
    v.check(
        p.image_url.len() <= 255,
        "image_url",
        "cannot be more than 255 characters long",
    );
    v.check(p.price.len() <= 10, "price", "cannot be more than 10 characters long");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> ProductDraft {
        ProductDraft {
            name: "Desk lamp".into(),
            description: "Warm white LED lamp".into(),
            category: "lighting".into(),
            image_url: "https://img.example.com/lamp.png".into(),
            price: "24.99".into(),
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        let mut v = Validator::new();
        validate_product(&mut v, &lamp());
        assert!(v.is_empty(), "{:?}", v.errors());
    }

    #[test]
    fn missing_fields_are_each_reported() {
        let mut v = Validator::new();
        validate_product(&mut v, &ProductDraft::default());
        let errors = v.into_errors();
        for key in ["name", "description", "category", "image_url"] {
            assert_eq!(errors[key], "this is required");
        }
        assert!(!errors.contains_key("price"));
    }

    #[test]
    fn length_limits() {
        let mut draft = lamp();
        draft.name = "n".repeat(101);
        draft.price = "12345678901".into();
        let mut v = Validator::new();
        validate_product(&mut v, &draft);
        assert_eq!(v.errors()["name"], "cannot be more than 100 characters long");
        assert_eq!(v.errors()["price"], "cannot be more than 10 characters long");
    }

    #[test]
    fn patch_overrides_only_present_fields() {
        let patch: ProductPatch = serde_json::from_str(r#"{"name":"Floor lamp"}"#).unwrap();
        let draft = lamp().apply(patch);
        assert_eq!(draft.name, "Floor lamp");
        assert_eq!(draft.category, "lighting");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = serde_json::from_str::<ProductDraft>(r#"{"name":"x","average_rating":5}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<ProductPatch>(r#"{"version":3}"#);
        assert!(err.is_err());
    }
}
