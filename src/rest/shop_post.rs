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

//! API to register a new shop.

use crate::driver::Driver;
use crate::model::Shop;
use crate::rest::RestResult;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Message of the request to create a shop.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct Request {
    /// Identifier of the owning merchant.
    merchant_id: String,

    /// Display name of the shop.
    name: String,

    /// Whether the merchant confirmed the platform policies.
    policy_confirmation: bool,

    /// Restriction state of the shop.
    restricted: String,

    /// Administrative approval state of the shop.
    admin_status: String,

    /// Whether the shop has been reviewed.
    reviewed: bool,

    /// Aggregate shop rating.
    rating: f64,
}

/// Response to a successful creation.
#[derive(Serialize)]
struct Response {
    /// Outcome marker for the client.
    status: &'static str,

    /// The newly-created shop.
    shop: Shop,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<Request>,
) -> RestResult<impl IntoResponse> {
    let shop = driver
        .create_shop(
            request.merchant_id,
            request.name,
            request.policy_confirmation,
            &request.restricted,
            &request.admin_status,
            request.reviewed,
            request.rating,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(Response { status: "success", shop })))
}
