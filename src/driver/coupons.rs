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

//! Operations on coupons.

use crate::db::{self, DbError};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{Coupon, CouponData, CouponDelta, CouponId};

impl Driver {
    /// Gets a list of all coupons that have not yet expired according to the driver's clock.
    /// An empty list is reported as a missing entity because clients only ever ask for coupons
    /// they can redeem.
    pub(crate) async fn list_valid_coupons(self) -> DriverResult<Vec<Coupon>> {
        let now = self.clock.now_utc();
        let coupons = db::list_valid_coupons(&mut self.db.ex().await?, now).await?;
        if coupons.is_empty() {
            return Err(DriverError::NotFound("No valid coupons found".to_owned()));
        }
        Ok(coupons)
    }

    /// Gets the coupon with identifier `id`, expired or not.
    pub(crate) async fn get_coupon(self, id: CouponId) -> DriverResult<Coupon> {
        match db::get_coupon(&mut self.db.ex().await?, id).await {
            Ok(coupon) => Ok(coupon),
            Err(DbError::NotFound) => {
                Err(DriverError::NotFound("Coupon not found".to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Registers a new coupon from its untrusted fields and returns the persisted entity with
    /// its database-assigned identifier.
    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn create_coupon(
        self,
        shop_id: String,
        merchant_id: String,
        transaction_id: i64,
        coupon_limit: i64,
        percentage: f64,
        coupon_code: String,
        expiry_date: &str,
    ) -> DriverResult<Coupon> {
        let data = CouponData::new(
            shop_id,
            merchant_id,
            transaction_id,
            coupon_limit,
            percentage,
            coupon_code,
            expiry_date,
        )?;
        let coupon = db::create_coupon(&mut self.db.ex().await?, &data).await?;
        Ok(coupon)
    }

    /// Applies the partial update in `delta` to the coupon with identifier `id` and returns
    /// the updated entity.  The read and the write happen in the same transaction so concurrent
    /// updates cannot interleave.
    pub(crate) async fn update_coupon(
        self,
        id: CouponId,
        delta: CouponDelta,
    ) -> DriverResult<Coupon> {
        let mut tx = self.db.begin().await?;
        let coupon = match db::get_coupon(tx.ex(), id).await {
            Ok(coupon) => coupon,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound("Coupon not found".to_owned()));
            }
            Err(e) => return Err(e.into()),
        };
        let coupon = coupon.with_delta(delta)?;
        db::update_coupon(tx.ex(), &coupon).await?;
        tx.commit().await?;
        Ok(coupon)
    }

    /// Deletes the coupon with identifier `id`.
    pub(crate) async fn delete_coupon(self, id: CouponId) -> DriverResult<()> {
        match db::delete_coupon(&mut self.db.ex().await?, id).await {
            Ok(()) => Ok(()),
            Err(DbError::NotFound) => {
                Err(DriverError::NotFound("Coupon not found".to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
