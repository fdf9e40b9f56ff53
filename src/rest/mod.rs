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

//! Entry point to the REST server.
//!
//! Every API is put in its own `.rs` file, using a name like `<entity>_<method>.rs`.  This
//! may seem overkill, but putting every API in its own file makes it easy to ensure all the
//! integration tests for the given API truly belong to that API.
//!
//! More specifically, the `tests` module within an API defines a `route` method that returns
//! the HTTP method and the API path under test.  All integration tests within the module then
//! rely on `route` to obtain this information, ensuring that they all test the desired API.

use crate::driver::{Driver, DriverError};
use crate::model::ModelError;
use async_trait::async_trait;
use axum::body::HttpBody;
use axum::extract::{DefaultBodyLimit, FromRequest, Request};
use axum::http::{self, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use log::error;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

mod coupon_delete;
mod coupon_get;
mod coupon_patch;
mod coupon_post;
mod coupons_get;
mod liveness_get;
mod product_delete;
mod product_get;
mod product_patch;
mod product_post;
mod products_get;
mod shop_delete;
mod shop_get;
mod shop_patch;
mod shop_post;
mod shops_get;
#[cfg(test)]
pub(crate) mod testutils;

/// Maximum size of a request body in bytes.  Larger payloads are rejected outright.
const MAX_BODY_SIZE: usize = 10 * 1024;

/// Frontend errors.  These are the errors that are visible to the user on failed requests.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum RestError {
    /// Catch-all error type for all unexpected errors.
    #[error("{0}")]
    InternalError(String),

    /// Indicates an error in the contents of the request.
    #[error("{0}")]
    InvalidRequest(String),

    /// Indicates that a requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Indicates that a request that should have empty content did not.
    #[error("Content should be empty")]
    PayloadNotEmpty,
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::AlreadyExists(_) => RestError::InvalidRequest(e.to_string()),
            DriverError::BackendError(_) => RestError::InternalError(e.to_string()),
            DriverError::InvalidInput(_) => RestError::InvalidRequest(e.to_string()),
            DriverError::NotFound(_) => RestError::NotFound(e.to_string()),
        }
    }
}

impl From<ModelError> for RestError {
    fn from(e: ModelError) -> Self {
        RestError::InvalidRequest(e.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            RestError::InternalError(msg) => {
                // Whatever the cause was, it is not something the client can act upon, so log
                // the details here and return a fixed message to avoid leaking internals.
                error!("Internal error during request processing: {}", msg);
                (http::StatusCode::INTERNAL_SERVER_ERROR, "Something went very wrong!".to_owned())
            }
            RestError::InvalidRequest(msg) => (http::StatusCode::BAD_REQUEST, msg),
            RestError::NotFound(msg) => (http::StatusCode::NOT_FOUND, msg),
            RestError::PayloadNotEmpty => {
                (http::StatusCode::PAYLOAD_TOO_LARGE, RestError::PayloadNotEmpty.to_string())
            }
        };

        let response = ErrorResponse { message };

        (status, Json(response)).into_response()
    }
}

/// Result type for this module.
pub(crate) type RestResult<T> = Result<T, RestError>;

/// Representation of the details of an error response.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ErrorResponse {
    /// Textual representation of the error message.
    pub(crate) message: String,
}

/// A request body extractor that forbids any content.
///
/// Any API that doesn't expect a body should use this to ensure we don't get garbage data that
/// we don't care about.  This future-proofs the service.
pub(crate) struct EmptyBody {}

#[async_trait]
impl<S> FromRequest<S> for EmptyBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        if req.into_body().is_end_stream() {
            Ok(EmptyBody {})
        } else {
            Err(RestError::PayloadNotEmpty)
        }
    }
}

/// Handler for any route not declared in the router.
async fn fallback(uri: Uri) -> RestError {
    RestError::NotFound(format!("{} route cannot be found on this server", uri.path()))
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/", get(liveness_get::root_handler))
        .route("/api/v1", get(liveness_get::api_handler))
        .route("/api/v1/shop", get(shops_get::handler).post(shop_post::handler))
        .route(
            "/api/v1/shop/:id",
            get(shop_get::handler).patch(shop_patch::handler).delete(shop_delete::handler),
        )
        .route("/api/v1/products", get(products_get::handler).post(product_post::handler))
        .route(
            "/api/v1/products/:id",
            get(product_get::handler)
                .patch(product_patch::handler)
                .delete(product_delete::handler),
        )
        .route("/api/v1/coupon", get(coupons_get::handler).post(coupon_post::handler))
        .route(
            "/api/v1/coupon/:id",
            get(coupon_get::handler).patch(coupon_patch::handler).delete(coupon_delete::handler),
        )
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive())
        .with_state(driver)
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;

    #[tokio::test]
    async fn test_unknown_route_mentions_the_path() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::GET, "/api/v1/nothing/here"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("/api/v1/nothing/here route cannot be found on this server")
            .await;
    }

    #[tokio::test]
    async fn test_unknown_method_on_known_route() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.into_app(), (http::Method::PUT, "/api/v1/shop"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::METHOD_NOT_ALLOWED)
            .expect_empty()
            .await;
    }
}
