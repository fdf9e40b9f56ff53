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

//! The `Coupon` data type and its companions.
//!
//! Coupon identifiers are assigned by the database, so the business fields
//! live in `CouponData` and only become a full `Coupon` once persisted.

use crate::model::{check_not_empty, fold_problems, ModelError, ModelResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Newtype pattern for the integer identifiers of coupons.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub(crate) struct CouponId(i64);

impl CouponId {
    /// Creates a coupon identifier from its storage representation.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the identifier as an `i64` for storage purposes.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Business fields of a coupon, without the store-assigned identifier.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct CouponData {
    /// Identifier of the shop the coupon applies to.
    shop_id: String,

    /// Identifier of the issuing merchant.
    merchant_id: String,

    /// Identifier of the transaction the coupon originated from.
    transaction_id: i64,

    /// Maximum number of redemptions.
    coupon_limit: i64,

    /// Discount percentage granted by the coupon.
    percentage: f64,

    /// Code the customer types in to redeem the coupon.
    coupon_code: String,

    /// Instant after which the coupon is no longer valid.
    #[serde(with = "time::serde::rfc3339")]
    expiry_date: OffsetDateTime,
}

impl CouponData {
    /// Creates the business fields of a coupon from untrusted primitives, reporting every
    /// invalid field.  `expiry_date` must be an RFC 3339 timestamp.
    pub(crate) fn new(
        shop_id: String,
        merchant_id: String,
        transaction_id: i64,
        coupon_limit: i64,
        percentage: f64,
        coupon_code: String,
        expiry_date: &str,
    ) -> ModelResult<CouponData> {
        let mut problems = vec![];

        check_not_empty(&mut problems, "coupon_code", &coupon_code);
        let expiry_date = match parse_expiry_date(expiry_date) {
            Ok(expiry_date) => expiry_date,
            Err(e) => {
                problems.push(e.0);
                OffsetDateTime::UNIX_EPOCH
            }
        };

        fold_problems(
            CouponData {
                shop_id,
                merchant_id,
                transaction_id,
                coupon_limit,
                percentage,
                coupon_code,
                expiry_date,
            },
            problems,
        )
    }

    /// Recreates the business fields of a coupon from values extracted from the store, where
    /// the expiry is already a timestamp.
    pub(crate) fn from_storage(
        shop_id: String,
        merchant_id: String,
        transaction_id: i64,
        coupon_limit: i64,
        percentage: f64,
        coupon_code: String,
        expiry_date: OffsetDateTime,
    ) -> ModelResult<CouponData> {
        let mut problems = vec![];

        check_not_empty(&mut problems, "coupon_code", &coupon_code);

        fold_problems(
            CouponData {
                shop_id,
                merchant_id,
                transaction_id,
                coupon_limit,
                percentage,
                coupon_code,
                expiry_date,
            },
            problems,
        )
    }

    /// Applies the partial update in `delta`, revalidating the fields it carries.  Fields not
    /// present in the delta keep their current values.
    fn with_delta(mut self, delta: CouponDelta) -> ModelResult<CouponData> {
        let mut problems = vec![];

        if let Some(shop_id) = delta.shop_id {
            self.shop_id = shop_id;
        }
        if let Some(merchant_id) = delta.merchant_id {
            self.merchant_id = merchant_id;
        }
        if let Some(transaction_id) = delta.transaction_id {
            self.transaction_id = transaction_id;
        }
        if let Some(coupon_limit) = delta.coupon_limit {
            self.coupon_limit = coupon_limit;
        }
        if let Some(percentage) = delta.percentage {
            self.percentage = percentage;
        }
        if let Some(coupon_code) = delta.coupon_code {
            check_not_empty(&mut problems, "coupon_code", &coupon_code);
            self.coupon_code = coupon_code;
        }
        if let Some(expiry_date) = delta.expiry_date {
            match parse_expiry_date(&expiry_date) {
                Ok(expiry_date) => self.expiry_date = expiry_date,
                Err(e) => problems.push(e.0),
            }
        }

        fold_problems(self, problems)
    }
}

/// A discount coupon as persisted in the store.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Coupon {
    /// Store-assigned identifier of the coupon.
    id: CouponId,

    /// Business fields of the coupon.
    #[serde(flatten)]
    data: CouponData,
}

impl Coupon {
    /// Creates a coupon from its store-assigned `id` and its business `data`.
    pub(crate) fn new(id: CouponId, data: CouponData) -> Coupon {
        Coupon { id, data }
    }

    /// Returns the identifier of the coupon.
    pub(crate) fn id(&self) -> CouponId {
        self.id
    }

    /// Returns the business fields of the coupon.
    pub(crate) fn data(&self) -> &CouponData {
        &self.data
    }

    /// Applies the partial update in `delta` to the business fields, keeping the identifier.
    pub(crate) fn with_delta(self, delta: CouponDelta) -> ModelResult<Coupon> {
        Ok(Coupon { id: self.id, data: self.data.with_delta(delta)? })
    }
}

/// Partial update to a coupon.  Every field is optional; fields that are present must satisfy
/// the same constraints as on creation.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct CouponDelta {
    /// New shop reference, if updated.
    pub(crate) shop_id: Option<String>,

    /// New merchant reference, if updated.
    pub(crate) merchant_id: Option<String>,

    /// New transaction reference, if updated.
    pub(crate) transaction_id: Option<i64>,

    /// New redemption limit, if updated.
    pub(crate) coupon_limit: Option<i64>,

    /// New discount percentage, if updated.
    pub(crate) percentage: Option<f64>,

    /// New coupon code, if updated.
    pub(crate) coupon_code: Option<String>,

    /// New expiry timestamp in RFC 3339 format, if updated.
    pub(crate) expiry_date: Option<String>,
}

/// Parses an RFC 3339 `expiry_date` into a timestamp.
fn parse_expiry_date(s: &str) -> ModelResult<OffsetDateTime> {
    OffsetDateTime::parse(s, &Rfc3339)
        .map_err(|e| ModelError(format!("expiry_date must be an RFC 3339 timestamp: {}", e)))
}
