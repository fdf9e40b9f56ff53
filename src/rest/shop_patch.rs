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

//! API to update an existing shop.

use crate::driver::Driver;
use crate::model::{Shop, ShopDelta, ShopId};
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

    /// The shop after the update.
    shop: Shop,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<ShopId>,
    Json(delta): Json<ShopDelta>,
) -> RestResult<impl IntoResponse> {
    let shop = driver.update_shop(&id, delta).await?;
    Ok(Json(Response { message: "Shop updated successfully", shop }))
}
