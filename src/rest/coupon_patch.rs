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

//! API to update an existing coupon.

use crate::driver::Driver;
use crate::model::{Coupon, CouponDelta, CouponId};
use crate::rest::RestResult;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Response to a successful update.
#[derive(Serialize)]
struct Response {
    /// Human-readable confirmation.
    message: &'static str,

    /// The coupon after the update.
    coupon: Coupon,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<CouponId>,
    Json(delta): Json<CouponDelta>,
) -> RestResult<impl IntoResponse> {
    let coupon = driver.update_coupon(id, delta).await?;
    Ok(Json(Response { message: "Coupon updated successfully", coupon }))
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::model::testutils::sample_coupon_data;
    use crate::model::{Coupon, CouponDelta};
    use crate::rest::testutils::*;
    use axum::http;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::PATCH, format!("/api/v1/coupon/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let app = context.app();

        let data = sample_coupon_data();
        let coupon = db::create_coupon(&mut context.ex().await, &data).await.unwrap();

        let delta = CouponDelta { percentage: Some(25.0), ..Default::default() };
        let response = OneShotBuilder::new(app, route(coupon.id().as_i64()))
            .send_json(delta)
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!("Coupon updated successfully", response["message"]);
        let updated: Coupon = serde_json::from_value(response["coupon"].clone()).unwrap();
        assert_eq!(25.0, *updated.data().percentage());

        let stored = db::get_coupon(&mut context.ex().await, coupon.id()).await.unwrap();
        assert_eq!(updated, stored);
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        let delta = CouponDelta { percentage: Some(25.0), ..Default::default() };
        OneShotBuilder::new(context.into_app(), route(123))
            .send_json(delta)
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Coupon not found")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_delta() {
        let context = TestContext::setup().await;
        let app = context.app();

        let data = sample_coupon_data();
        let coupon = db::create_coupon(&mut context.ex().await, &data).await.unwrap();

        let delta = CouponDelta { expiry_date: Some("tomorrow".to_owned()), ..Default::default() };
        OneShotBuilder::new(app, route(coupon.id().as_i64()))
            .send_json(delta)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("expiry_date")
            .await;

        let stored = db::get_coupon(&mut context.ex().await, coupon.id()).await.unwrap();
        assert_eq!(coupon, stored);
    }
}
