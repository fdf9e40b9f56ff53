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

//! API to delete a product.

use crate::driver::Driver;
use crate::model::ProductId;
use crate::rest::{EmptyBody, RestResult};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<ProductId>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    driver.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::db::DbError;
    use crate::model::testutils::sample_product;
    use crate::rest::testutils::*;
    use axum::http;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/api/v1/products/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let app = context.app();

        let product = sample_product();
        db::create_product(&mut context.ex().await, &product).await.unwrap();

        OneShotBuilder::new(app, route("p1"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert_eq!(
            DbError::NotFound,
            db::get_product(&mut context.ex().await, product.id()).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), route("does-not-exist"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Product not found")
            .await;
    }
}
