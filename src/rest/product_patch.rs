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

//! API to update an existing product.

use crate::driver::Driver;
use crate::model::{Product, ProductDelta, ProductId};
use crate::rest::RestResult;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Response to a successful update.
#[derive(Serialize)]
struct Response {
    /// Outcome marker for the client.
    status: &'static str,

    /// The product after the update.
    product: Product,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<ProductId>,
    Json(delta): Json<ProductDelta>,
) -> RestResult<impl IntoResponse> {
    let product = driver.update_product(&id, delta).await?;
    Ok(Json(Response { status: "success", product }))
}
