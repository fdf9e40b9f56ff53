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

//! High-level data types for the shop domain.
//!
//! Constructors take untrusted primitives and validate them, reporting every
//! field that violates its constraint in a single `ModelError` so that a bad
//! request surfaces all of its problems at once.  Deltas carry the optional
//! fields of a partial update; applying a delta revalidates only the fields
//! that are present.

mod coupon;
mod product;
mod shop;

pub(crate) use coupon::{Coupon, CouponData, CouponDelta, CouponId};
pub(crate) use product::{Product, ProductDelta, ProductId};
pub(crate) use shop::{Shop, ShopDelta, ShopId};

/// Error type returned by all model constructors when the input data is invalid.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub(crate) struct ModelError(pub(crate) String);

/// Result type for this module.
pub(crate) type ModelResult<T> = Result<T, ModelError>;

/// Collects per-field `problems` into a single `ModelError`, or returns `ok` if there are none.
pub(crate) fn fold_problems<T>(ok: T, problems: Vec<String>) -> ModelResult<T> {
    if problems.is_empty() {
        Ok(ok)
    } else {
        Err(ModelError(problems.join("; ")))
    }
}

/// Checks that `value` is a strictly-positive, finite number and records a problem for
/// `field` otherwise.
pub(crate) fn check_positive(problems: &mut Vec<String>, field: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        problems.push(format!("{} must be a positive number", field));
    }
}

/// Checks that `value` is not empty and records a problem for `field` otherwise.
pub(crate) fn check_not_empty(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{} cannot be empty", field));
    }
}
