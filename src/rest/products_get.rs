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

//! API to list all products.

use crate::driver::Driver;
use crate::model::Product;
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

    /// All registered products, which may be none.
    products: Vec<Product>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let products = driver.list_products().await?;
    Ok(Json(Response { status: "success", products }))
}
