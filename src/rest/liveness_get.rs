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

//! APIs to check that the service is up.

use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

/// Response to the liveness queries.
#[derive(Serialize)]
struct LivenessResponse {
    /// Human-readable confirmation that the endpoint responds.
    message: &'static str,
}

/// API handler for the root path.
pub(crate) async fn root_handler() -> impl IntoResponse {
    Json(LivenessResponse { message: "api endpoint is working" })
}

/// API handler for the API prefix path.
pub(crate) async fn api_handler() -> impl IntoResponse {
    Json(LivenessResponse { message: "endpoint/api/v1 is working" })
}
