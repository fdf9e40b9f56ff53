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

//! API to register a new coupon.

use crate::driver::Driver;
use crate::model::Coupon;
use crate::rest::RestResult;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Message of the request to create a coupon.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct Request {
    /// Identifier of the shop the coupon applies to.
    shop_id: String,

    /// Identifier of the issuing merchant.
    merchant_id: String,

    /// Identifier of the transaction that paid for the coupon.
    transaction_id: i64,

    /// Maximum number of redemptions.
    coupon_limit: i64,

    /// Discount percentage.
    percentage: f64,

    /// Redemption code; must be unique across all coupons.
    coupon_code: String,

    /// Expiry timestamp in RFC 3339 format.
    expiry_date: String,
}

/// Response to a successful creation.
#[derive(Serialize)]
struct Response {
    /// Human-readable confirmation.
    message: &'static str,

    /// The newly-created coupon.
    coupon: Coupon,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<Request>,
) -> RestResult<impl IntoResponse> {
    let coupon = driver
        .create_coupon(
            request.shop_id,
            request.merchant_id,
            request.transaction_id,
            request.coupon_limit,
            request.percentage,
            request.coupon_code,
            &request.expiry_date,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(Response { message: "coupon added successfully!!!", coupon })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::rest::testutils::*;
    use axum::http;

    fn route() -> (http::Method, &'static str) {
        (http::Method::POST, "/api/v1/coupon")
    }

    fn valid_request() -> Request {
        Request {
            shop_id: "s1".to_owned(),
            merchant_id: "m1".to_owned(),
            transaction_id: 77,
            coupon_limit: 5,
            percentage: 20.0,
            coupon_code: "SAVE20".to_owned(),
            expiry_date: "2024-06-01T00:00:00Z".to_owned(),
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
        assert_eq!("coupon added successfully!!!", response["message"]);
        let coupon: Coupon = serde_json::from_value(response["coupon"].clone()).unwrap();
        assert_eq!("SAVE20", coupon.data().coupon_code());

        let stored = db::get_coupon(&mut context.ex().await, coupon.id()).await.unwrap();
        assert_eq!(coupon, stored);
    }

    #[tokio::test]
    async fn test_duplicate_code() {
        let context = TestContext::setup().await;
        let app = context.app();

        OneShotBuilder::new(app.clone(), route())
            .send_json(valid_request())
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<serde_json::Value>()
            .await;

        OneShotBuilder::new(app, route())
            .send_json(valid_request())
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Already exists")
            .await;
    }

    #[tokio::test]
    async fn test_bad_expiry_date() {
        let context = TestContext::setup().await;

        let mut request = valid_request();
        request.expiry_date = "tomorrow".to_owned();

        OneShotBuilder::new(context.into_app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("expiry_date")
            .await;
    }
}
