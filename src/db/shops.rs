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

//! Store operations for shops.

use crate::db::{postgres, sqlite, DbError, DbResult, Executor};
use crate::model::{Shop, ShopId};
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl TryFrom<PgRow> for Shop {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let merchant_id: String = row.try_get("merchant_id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let policy_confirmation: bool =
            row.try_get("policy_confirmation").map_err(postgres::map_sqlx_error)?;
        let restricted: String = row.try_get("restricted").map_err(postgres::map_sqlx_error)?;
        let admin_status: String = row.try_get("admin_status").map_err(postgres::map_sqlx_error)?;
        let reviewed: bool = row.try_get("reviewed").map_err(postgres::map_sqlx_error)?;
        let rating: f64 = row.try_get("rating").map_err(postgres::map_sqlx_error)?;

        Ok(Shop::new(
            ShopId::new(id),
            merchant_id,
            name,
            policy_confirmation,
            &restricted,
            &admin_status,
            reviewed,
            rating,
        )?)
    }
}

impl TryFrom<SqliteRow> for Shop {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let merchant_id: String = row.try_get("merchant_id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let policy_confirmation: bool =
            row.try_get("policy_confirmation").map_err(sqlite::map_sqlx_error)?;
        let restricted: String = row.try_get("restricted").map_err(sqlite::map_sqlx_error)?;
        let admin_status: String = row.try_get("admin_status").map_err(sqlite::map_sqlx_error)?;
        let reviewed: bool = row.try_get("reviewed").map_err(sqlite::map_sqlx_error)?;
        let rating: f64 = row.try_get("rating").map_err(sqlite::map_sqlx_error)?;

        Ok(Shop::new(
            ShopId::new(id),
            merchant_id,
            name,
            policy_confirmation,
            &restricted,
            &admin_status,
            reviewed,
            rating,
        )?)
    }
}

/// Lists all registered shops.
pub(crate) async fn list_shops(ex: &mut Executor) -> DbResult<Vec<Shop>> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM shops ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Shop::try_from).collect()
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM shops ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Shop::try_from).collect()
        }
    }
}

/// Fetches the shop with identifier `id`.
pub(crate) async fn get_shop(ex: &mut Executor, id: &ShopId) -> DbResult<Shop> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM shops WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Shop::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM shops WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Shop::try_from(row)
        }
    }
}

/// Persists the new shop `shop`.
pub(crate) async fn create_shop(ex: &mut Executor, shop: &Shop) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO shops
                    (id, merchant_id, name, policy_confirmation, restricted, admin_status,
                        reviewed, rating)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)";
            let done = sqlx::query(query_str)
                .bind(shop.id().as_str())
                .bind(shop.merchant_id().as_str())
                .bind(shop.name().as_str())
                .bind(*shop.policy_confirmation())
                .bind(shop.restricted().as_str())
                .bind(shop.admin_status().as_str())
                .bind(*shop.reviewed())
                .bind(*shop.rating())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO shops
                    (id, merchant_id, name, policy_confirmation, restricted, admin_status,
                        reviewed, rating)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(shop.id().as_str())
                .bind(shop.merchant_id().as_str())
                .bind(shop.name().as_str())
                .bind(*shop.policy_confirmation())
                .bind(shop.restricted().as_str())
                .bind(shop.admin_status().as_str())
                .bind(*shop.reviewed())
                .bind(*shop.rating())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError("Insertion affected more than one row".to_owned()));
    }
    Ok(())
}

/// Replaces the stored record of `shop`, which must already exist.
pub(crate) async fn update_shop(ex: &mut Executor, shop: &Shop) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE shops
                SET merchant_id = $2, name = $3, policy_confirmation = $4, restricted = $5,
                    admin_status = $6, reviewed = $7, rating = $8
                WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(shop.id().as_str())
                .bind(shop.merchant_id().as_str())
                .bind(shop.name().as_str())
                .bind(*shop.policy_confirmation())
                .bind(shop.restricted().as_str())
                .bind(shop.admin_status().as_str())
                .bind(*shop.reviewed())
                .bind(*shop.rating())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE shops
                SET merchant_id = ?, name = ?, policy_confirmation = ?, restricted = ?,
                    admin_status = ?, reviewed = ?, rating = ?
                WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(shop.merchant_id().as_str())
                .bind(shop.name().as_str())
                .bind(*shop.policy_confirmation())
                .bind(shop.restricted().as_str())
                .bind(shop.admin_status().as_str())
                .bind(*shop.reviewed())
                .bind(*shop.rating())
                .bind(shop.id().as_str())
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

/// Deletes the shop with identifier `id`.
pub(crate) async fn delete_shop(ex: &mut Executor, id: &ShopId) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM shops WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM shops WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
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
