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

//! API to fetch a single coupon, expired or not.

use crate::driver::Driver;
use crate::model::{Coupon, CouponId};
use crate::rest::{EmptyBody, RestResult};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Response to a successful query.
#[derive(Serialize)]
struct Response {
    /// The queried coupon.
    coupon: Coupon,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<CouponId>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let coupon = driver.get_coupon(id).await?;
    Ok(Json(Response { coupon }))
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::model::testutils::sample_coupon_data;
    use crate::model::Coupon;
    use crate::rest::testutils::*;
    use axum::http;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::GET, format!("/api/v1/coupon/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let data = sample_coupon_data();
        let coupon = db::create_coupon(&mut context.ex().await, &data).await.unwrap();

        let response = OneShotBuilder::new(context.into_app(), route(coupon.id().as_i64()))
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        let returned: Coupon = serde_json::from_value(response["coupon"].clone()).unwrap();
        assert_eq!(coupon, returned);
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route(123))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Coupon not found")
            .await;
    }
}
