// Storefront
// Copyright 2024 The Storefront Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! The `Product` data type and its companions.
//!
//! This is the one canonical product shape: creation and partial updates both
//! use these fields and constraints.

use crate::model::{check_not_empty, check_positive, fold_problems, ModelResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Minimum length of a product description.
pub(crate) const MIN_DESCRIPTION_LENGTH: usize = 3;

/// Newtype pattern for the opaque string identifiers of products.
#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub(crate) struct ProductId(String);

impl ProductId {
    /// Creates a product identifier from an untrusted string `s`.
    pub(crate) fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    /// Returns a string view of the identifier.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// An item listed for sale in a shop.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Product {
    /// Identifier of the product.
    id: ProductId,

    /// Identifier of the user that listed the product.
    user_id: String,

    /// Identifier of the shop the product belongs to.
    shop_id: String,

    /// Display name of the product.
    name: String,

    /// Free-form description; at least `MIN_DESCRIPTION_LENGTH` characters.
    description: String,

    /// Units in stock.
    quantity: i64,

    /// Identifier of the product's category.
    category_id: i64,

    /// Identifier of the product's image.
    image_id: i64,

    /// Listed price; strictly positive.
    price: f64,

    /// Discounted price; strictly positive.
    discount_price: f64,

    /// Tax applied to the price; strictly positive.
    tax: f64,

    /// Moderation status of the product.
    admin_status: String,

    /// Identifier of the product's rating record; strictly positive.
    rating_id: i64,

    /// Currency the prices are expressed in.
    currency: String,

    /// Whether the product is published.
    is_published: bool,

    /// Whether the product has been marked as deleted.
    is_deleted: bool,
}

impl Product {
    /// Creates a product from untrusted primitives, reporting every invalid field.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: ProductId,
        user_id: String,
        shop_id: String,
        name: String,
        description: String,
        quantity: i64,
        category_id: i64,
        image_id: i64,
        price: f64,
        discount_price: f64,
        tax: f64,
        admin_status: String,
        rating_id: i64,
        currency: String,
        is_published: bool,
        is_deleted: bool,
    ) -> ModelResult<Product> {
        let mut problems = vec![];

        check_not_empty(&mut problems, "name", &name);
        if description.chars().count() < MIN_DESCRIPTION_LENGTH {
            problems.push(format!(
                "description must be at least {} characters long",
                MIN_DESCRIPTION_LENGTH
            ));
        }
        check_positive(&mut problems, "price", price);
        check_positive(&mut problems, "discount_price", discount_price);
        check_positive(&mut problems, "tax", tax);
        if rating_id <= 0 {
            problems.push("rating_id must be a positive integer".to_owned());
        }

        fold_problems(
            Product {
                id,
                user_id,
                shop_id,
                name,
                description,
                quantity,
                category_id,
                image_id,
                price,
                discount_price,
                tax,
                admin_status,
                rating_id,
                currency,
                is_published,
                is_deleted,
            },
            problems,
        )
    }

    /// Applies the partial update in `delta`, revalidating the fields it carries.  Fields not
    /// present in the delta keep their current values.
    pub(crate) fn with_delta(mut self, delta: ProductDelta) -> ModelResult<Product> {
        let mut problems = vec![];

        if let Some(user_id) = delta.user_id {
            self.user_id = user_id;
        }
        if let Some(shop_id) = delta.shop_id {
            self.shop_id = shop_id;
        }
        if let Some(name) = delta.name {
            check_not_empty(&mut problems, "name", &name);
            self.name = name;
        }
        if let Some(description) = delta.description {
            if description.chars().count() < MIN_DESCRIPTION_LENGTH {
                problems.push(format!(
                    "description must be at least {} characters long",
                    MIN_DESCRIPTION_LENGTH
                ));
            }
            self.description = description;
        }
        if let Some(quantity) = delta.quantity {
            self.quantity = quantity;
        }
        if let Some(category_id) = delta.category_id {
            self.category_id = category_id;
        }
        if let Some(image_id) = delta.image_id {
            self.image_id = image_id;
        }
        if let Some(price) = delta.price {
            check_positive(&mut problems, "price", price);
            self.price = price;
        }
        if let Some(discount_price) = delta.discount_price {
            check_positive(&mut problems, "discount_price", discount_price);
            self.discount_price = discount_price;
        }
        if let Some(tax) = delta.tax {
            check_positive(&mut problems, "tax", tax);
            self.tax = tax;
        }
        if let Some(admin_status) = delta.admin_status {
            self.admin_status = admin_status;
        }
        if let Some(rating_id) = delta.rating_id {
            if rating_id <= 0 {
                problems.push("rating_id must be a positive integer".to_owned());
            }
            self.rating_id = rating_id;
        }
        if let Some(currency) = delta.currency {
            self.currency = currency;
        }
        if let Some(is_published) = delta.is_published {
            self.is_published = is_published;
        }
        if let Some(is_deleted) = delta.is_deleted {
            self.is_deleted = is_deleted;
        }

        fold_problems(self, problems)
    }
}

/// Partial update to a product.  Every field is optional; fields that are present must satisfy
/// the same constraints as on creation.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct ProductDelta {
    /// New listing user, if updated.
    pub(crate) user_id: Option<String>,

    /// New owning shop, if updated.
    pub(crate) shop_id: Option<String>,

    /// New display name, if updated.
    pub(crate) name: Option<String>,

    /// New description, if updated.
    pub(crate) description: Option<String>,

    /// New stock count, if updated.
    pub(crate) quantity: Option<i64>,

    /// New category, if updated.
    pub(crate) category_id: Option<i64>,

    /// New image, if updated.
    pub(crate) image_id: Option<i64>,

    /// New price, if updated.
    pub(crate) price: Option<f64>,

    /// New discounted price, if updated.
    pub(crate) discount_price: Option<f64>,

    /// New tax, if updated.
    pub(crate) tax: Option<f64>,

    /// New moderation status, if updated.
    pub(crate) admin_status: Option<String>,

    /// New rating record, if updated.
    pub(crate) rating_id: Option<i64>,

    /// New currency, if updated.
    pub(crate) currency: Option<String>,

    /// New published flag, if updated.
    pub(crate) is_published: Option<bool>,

    /// New deleted flag, if updated.
    pub(crate) is_deleted: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testutils::sample_product;

    #[test]
    fn test_product_new_ok() {
        let product = sample_product();
        assert_eq!("Gizmo", product.name());
        assert_eq!(10, *product.quantity());
        assert!(!*product.is_deleted());
    }

    #[test]
    fn test_product_new_enumerates_all_problems() {
        let err = Product::new(
            ProductId::new("p1"),
            "u1".to_owned(),
            "s1".to_owned(),
            "Gizmo".to_owned(),
            "ab".to_owned(),
            10,
            2,
            7,
            -1.0,
            90.0,
            0.0,
            "PENDING".to_owned(),
            0,
            "NGN".to_owned(),
            true,
            false,
        )
        .unwrap_err();
        assert!(err.0.contains("description must be at least 3 characters"), "got: {}", err);
        assert!(err.0.contains("price must be a positive number"), "got: {}", err);
        assert!(err.0.contains("tax must be a positive number"), "got: {}", err);
        assert!(err.0.contains("rating_id must be a positive integer"), "got: {}", err);
    }

    #[test]
    fn test_product_delta_partial_fields_only() {
        let product = sample_product()
            .with_delta(ProductDelta { quantity: Some(3), ..Default::default() })
            .unwrap();
        assert_eq!(3, *product.quantity());

        // Everything else kept its old value.
        assert_eq!("Gizmo", product.name());
        assert_eq!(100.0, *product.price());
        assert_eq!("NGN", product.currency());
    }

    #[test]
    fn test_product_delta_rejects_bad_fields() {
        let err = sample_product()
            .with_delta(ProductDelta {
                description: Some("x".to_owned()),
                discount_price: Some(-5.0),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.0.contains("description must be at least 3 characters"), "got: {}", err);
        assert!(err.0.contains("discount_price must be a positive number"), "got: {}", err);
    }
}
