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

//! API to delete a coupon.

use crate::driver::Driver;
use crate::model::CouponId;
use crate::rest::{EmptyBody, RestResult};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<CouponId>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    driver.delete_coupon(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
