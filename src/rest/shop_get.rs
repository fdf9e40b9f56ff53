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

//! API to fetch a single shop.

use crate::driver::Driver;
use crate::model::{Shop, ShopId};
use crate::rest::{EmptyBody, RestResult};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Response to a successful query.
#[derive(Serialize)]
struct Response {
    /// Outcome marker for the client.
    status: &'static str,

    /// The queried shop.
    shop: Shop,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<ShopId>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let shop = driver.get_shop(&id).await?;
    Ok(Json(Response { status: "success", shop }))
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::model::testutils::sample_shop;
    use crate::model::Shop;
    use crate::rest::testutils::*;
    use axum::http;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/api/v1/shop/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let shop = sample_shop();
        db::create_shop(&mut context.ex().await, &shop).await.unwrap();

        let response = OneShotBuilder::new(context.into_app(), route("abc"))
            .send_empty()
            .await
            .expect_json::<serde_json::Value>()
            .await;
        assert_eq!("success", response["status"]);
        let returned: Shop = serde_json::from_value(response["shop"].clone()).unwrap();
        assert_eq!(shop, returned);
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("does-not-exist"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("No shop found with that ID")
            .await;
    }
}
