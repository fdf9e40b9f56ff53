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

//! API to register a new product.

use crate::driver::Driver;
use crate::model::Product;
use crate::rest::RestResult;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Message of the request to create a product.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct Request {
    /// Identifier of the user listing the product.
    user_id: String,

    /// Identifier of the shop the product belongs to.
    shop_id: String,

    /// Display name of the product.
    name: String,

    /// Free-form description of the product.
    description: String,

    /// Units in stock.
    quantity: i64,

    /// Identifier of the product category.
    category_id: i64,

    /// Identifier of the product image.
    image_id: i64,

    /// Unit price.
    price: f64,

    /// Discounted unit price.
    discount_price: f64,

    /// Tax applied to the price.
    tax: f64,

    /// Administrative approval state of the product.
    admin_status: String,

    /// Identifier of the rating record.
    rating_id: i64,

    /// ISO currency code for the price.
    currency: String,

    /// Whether the product is published.
    is_published: bool,

    /// Whether the product is soft-deleted.
    is_deleted: bool,
}

/// Response to a successful creation.
#[derive(Serialize)]
struct Response {
    /// Outcome marker for the client.
    status: &'static str,

    /// The newly-created product.
    product: Product,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<Request>,
) -> RestResult<impl IntoResponse> {
    let product = driver
        .create_product(
            request.user_id,
            request.shop_id,
            request.name,
            request.description,
            request.quantity,
            request.category_id,
            request.image_id,
            request.price,
            request.discount_price,
            request.tax,
            request.admin_status,
            request.rating_id,
            request.currency,
            request.is_published,
            request.is_deleted,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(Response { status: "success", product })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::rest::testutils::*;
    use axum::http;

    fn route() -> (http::Method, &'static str) {
        (http::Method::POST, "/api/v1/products")
    }

    fn valid_request() -> Request {
        Request {
            user_id: "u1".to_owned(),
            shop_id: "s1".to_owned(),
            name: "Gizmo".to_owned(),
            description: "A fine gizmo".to_owned(),
            quantity: 10,
            category_id: 2,
            image_id: 7,
            price: 100.0,
            discount_price: 90.0,
            tax: 5.0,
            admin_status: "PENDING".to_owned(),
            rating_id: 1,
            currency: "NGN".to_owned(),
            is_published: true,
            is_deleted: false,
        }
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let app = context.app();

        let response = OneShotBuilder::new(app, route())
            .send_json(valid_request())
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!("success", response["status"]);
        let product: Product = serde_json::from_value(response["product"].clone()).unwrap();
        assert_eq!("Gizmo", product.name());

        let stored = db::get_product(&mut context.ex().await, product.id()).await.unwrap();
        assert_eq!(product, stored);
    }

    #[tokio::test]
    async fn test_invalid_fields_are_all_reported() {
        let context = TestContext::setup().await;

        let mut request = valid_request();
        request.description = "no".to_owned();
        request.price = -5.0;

        OneShotBuilder::new(context.into_app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("description.*price|price.*description")
            .await;
    }
}
