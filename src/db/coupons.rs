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

//! Store operations for coupons.
//!
//! Coupon identifiers are assigned by the database, so creation returns the
//! persisted entity instead of taking a fully-formed one.

use crate::db::sqlite::{build_timestamp, unpack_timestamp};
use crate::db::{postgres, sqlite, DbError, DbResult, Executor};
use crate::model::{Coupon, CouponData, CouponId};
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use time::OffsetDateTime;

impl TryFrom<PgRow> for Coupon {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let shop_id: String = row.try_get("shop_id").map_err(postgres::map_sqlx_error)?;
        let merchant_id: String = row.try_get("merchant_id").map_err(postgres::map_sqlx_error)?;
        let transaction_id: i64 =
            row.try_get("transaction_id").map_err(postgres::map_sqlx_error)?;
        let coupon_limit: i64 = row.try_get("coupon_limit").map_err(postgres::map_sqlx_error)?;
        let percentage: f64 = row.try_get("percentage").map_err(postgres::map_sqlx_error)?;
        let coupon_code: String = row.try_get("coupon_code").map_err(postgres::map_sqlx_error)?;
        let expiry_date: OffsetDateTime =
            row.try_get("expiry_date").map_err(postgres::map_sqlx_error)?;

        let data = CouponData::from_storage(
            shop_id,
            merchant_id,
            transaction_id,
            coupon_limit,
            percentage,
            coupon_code,
            expiry_date,
        )?;
        Ok(Coupon::new(CouponId::new(id), data))
    }
}

impl TryFrom<SqliteRow> for Coupon {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let shop_id: String = row.try_get("shop_id").map_err(sqlite::map_sqlx_error)?;
        let merchant_id: String = row.try_get("merchant_id").map_err(sqlite::map_sqlx_error)?;
        let transaction_id: i64 =
            row.try_get("transaction_id").map_err(sqlite::map_sqlx_error)?;
        let coupon_limit: i64 = row.try_get("coupon_limit").map_err(sqlite::map_sqlx_error)?;
        let percentage: f64 = row.try_get("percentage").map_err(sqlite::map_sqlx_error)?;
        let coupon_code: String = row.try_get("coupon_code").map_err(sqlite::map_sqlx_error)?;
        let expiry_date_secs: i64 =
            row.try_get("expiry_date_secs").map_err(sqlite::map_sqlx_error)?;
        let expiry_date_nsecs: i64 =
            row.try_get("expiry_date_nsecs").map_err(sqlite::map_sqlx_error)?;

        let expiry_date = build_timestamp(expiry_date_secs, expiry_date_nsecs)?;
        let data = CouponData::from_storage(
            shop_id,
            merchant_id,
            transaction_id,
            coupon_limit,
            percentage,
            coupon_code,
            expiry_date,
        )?;
        Ok(Coupon::new(CouponId::new(id), data))
    }
}

/// Lists the coupons whose expiry date is at or after `now`.
pub(crate) async fn list_valid_coupons(
    ex: &mut Executor,
    now: OffsetDateTime,
) -> DbResult<Vec<Coupon>> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM coupons WHERE expiry_date >= $1 ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(now)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Coupon::try_from).collect()
        }

        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now);
            let query_str = "
                SELECT * FROM coupons
                WHERE expiry_date_secs > ?
                    OR (expiry_date_secs = ? AND expiry_date_nsecs >= ?)
                ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(now_secs)
                .bind(now_secs)
                .bind(now_nsecs)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Coupon::try_from).collect()
        }
    }
}

/// Fetches the coupon with identifier `id`.
pub(crate) async fn get_coupon(ex: &mut Executor, id: CouponId) -> DbResult<Coupon> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM coupons WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Coupon::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM coupons WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Coupon::try_from(row)
        }
    }
}

/// Persists the business fields in `data` as a new coupon and returns the entity carrying its
/// database-assigned identifier.
pub(crate) async fn create_coupon(ex: &mut Executor, data: &CouponData) -> DbResult<Coupon> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO coupons
                    (shop_id, merchant_id, transaction_id, coupon_limit, percentage, coupon_code,
                        expiry_date)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(data.shop_id().as_str())
                .bind(data.merchant_id().as_str())
                .bind(*data.transaction_id())
                .bind(*data.coupon_limit())
                .bind(*data.percentage())
                .bind(data.coupon_code().as_str())
                .bind(*data.expiry_date())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let (expiry_secs, expiry_nsecs) = unpack_timestamp(*data.expiry_date());
            let query_str = "
                INSERT INTO coupons
                    (shop_id, merchant_id, transaction_id, coupon_limit, percentage, coupon_code,
                        expiry_date_secs, expiry_date_nsecs)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(data.shop_id().as_str())
                .bind(data.merchant_id().as_str())
                .bind(*data.transaction_id())
                .bind(*data.coupon_limit())
                .bind(*data.percentage())
                .bind(data.coupon_code().as_str())
                .bind(expiry_secs)
                .bind(expiry_nsecs)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }
    };

    Ok(Coupon::new(CouponId::new(id), data.clone()))
}

/// Replaces the stored record of `coupon`, which must already exist.
pub(crate) async fn update_coupon(ex: &mut Executor, coupon: &Coupon) -> DbResult<()> {
    let data = coupon.data();
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE coupons
                SET shop_id = $2, merchant_id = $3, transaction_id = $4, coupon_limit = $5,
                    percentage = $6, coupon_code = $7, expiry_date = $8
                WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(coupon.id().as_i64())
                .bind(data.shop_id().as_str())
                .bind(data.merchant_id().as_str())
                .bind(*data.transaction_id())
                .bind(*data.coupon_limit())
                .bind(*data.percentage())
                .bind(data.coupon_code().as_str())
                .bind(*data.expiry_date())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let (expiry_secs, expiry_nsecs) = unpack_timestamp(*data.expiry_date());
            let query_str = "
                UPDATE coupons
                SET shop_id = ?, merchant_id = ?, transaction_id = ?, coupon_limit = ?,
                    percentage = ?, coupon_code = ?, expiry_date_secs = ?, expiry_date_nsecs = ?
                WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(data.shop_id().as_str())
                .bind(data.merchant_id().as_str())
                .bind(*data.transaction_id())
                .bind(*data.coupon_limit())
                .bind(*data.percentage())
                .bind(data.coupon_code().as_str())
                .bind(expiry_secs)
                .bind(expiry_nsecs)
                .bind(coupon.id().as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };

    if rows_affected == 0 {
        return Err(DbError::NotFound);
    } else if rows_affected != 1 {
        return Err(DbError::BackendError("Update affected more than one row".to_owned()));
    }
    Ok(())
}

/// Deletes the coupon with identifier `id`.
pub(crate) async fn delete_coupon(ex: &mut Executor, id: CouponId) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM coupons WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM coupons WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };

    if rows_affected == 0 {
        return Err(DbError::NotFound);
    } else if rows_affected != 1 {
        return Err(DbError::BackendError("Deletion affected more than one row".to_owned()));
    }
    Ok(())
}
