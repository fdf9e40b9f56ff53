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

//! API to list all coupons that have not yet expired.

use crate::driver::Driver;
use crate::model::Coupon;
use crate::rest::{EmptyBody, RestResult};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Response to a successful query.
#[derive(Serialize)]
struct Response {
    /// Outcome marker for the client.
    status: &'static str,

    /// All coupons whose expiry date is in the future.
    coupons: Vec<Coupon>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let coupons = driver.list_valid_coupons().await?;
    Ok(Json(Response { status: "success", coupons }))
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::model::testutils::sample_coupon_data;
    use crate::model::Coupon;
    use crate::rest::testutils::*;
    use axum::http;
    use std::time::Duration;

    fn route() -> (http::Method, &'static str) {
        (http::Method::GET, "/api/v1/coupon")
    }

    #[tokio::test]
    async fn test_empty_is_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("No valid coupons found")
            .await;
    }

    #[tokio::test]
    async fn test_some() {
        let context = TestContext::setup().await;

        let data = sample_coupon_data();
        let coupon = db::create_coupon(&mut context.ex().await, &data).await.unwrap();

        let response = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!("success", response["status"]);
        let coupons: Vec<Coupon> = serde_json::from_value(response["coupons"].clone()).unwrap();
        assert_eq!(vec![coupon], coupons);
    }

    #[tokio::test]
    async fn test_expired_are_hidden() {
        let context = TestContext::setup().await;

        let data = sample_coupon_data();
        db::create_coupon(&mut context.ex().await, &data).await.unwrap();

        // The sample coupon expires on 2024-06-01 and the clock starts on 2024-05-01, so
        // jumping 45 days ahead leaves no valid coupons behind.
        context.clock().advance(Duration::from_secs(60 * 60 * 24 * 45));

        OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("No valid coupons found")
            .await;
    }
}
