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

//! Store operations for products.

use crate::db::{postgres, sqlite, DbError, DbResult, Executor};
use crate::model::{Product, ProductId};
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl TryFrom<PgRow> for Product {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let user_id: String = row.try_get("user_id").map_err(postgres::map_sqlx_error)?;
        let shop_id: String = row.try_get("shop_id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let quantity: i64 = row.try_get("quantity").map_err(postgres::map_sqlx_error)?;
        let category_id: i64 = row.try_get("category_id").map_err(postgres::map_sqlx_error)?;
        let image_id: i64 = row.try_get("image_id").map_err(postgres::map_sqlx_error)?;
        let price: f64 = row.try_get("price").map_err(postgres::map_sqlx_error)?;
        let discount_price: f64 =
            row.try_get("discount_price").map_err(postgres::map_sqlx_error)?;
        let tax: f64 = row.try_get("tax").map_err(postgres::map_sqlx_error)?;
        let admin_status: String = row.try_get("admin_status").map_err(postgres::map_sqlx_error)?;
        let rating_id: i64 = row.try_get("rating_id").map_err(postgres::map_sqlx_error)?;
        let currency: String = row.try_get("currency").map_err(postgres::map_sqlx_error)?;
        let is_published: bool = row.try_get("is_published").map_err(postgres::map_sqlx_error)?;
        let is_deleted: bool = row.try_get("is_deleted").map_err(postgres::map_sqlx_error)?;

        Ok(Product::new(
            ProductId::new(id),
            user_id,
            shop_id,
            name,
            description,
            quantity,
            category_id,
            image_id,
            price,
            discount_price,
            tax,
            admin_status,
            rating_id,
            currency,
            is_published,
            is_deleted,
        )?)
    }
}

impl TryFrom<SqliteRow> for Product {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let user_id: String = row.try_get("user_id").map_err(sqlite::map_sqlx_error)?;
        let shop_id: String = row.try_get("shop_id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let quantity: i64 = row.try_get("quantity").map_err(sqlite::map_sqlx_error)?;
        let category_id: i64 = row.try_get("category_id").map_err(sqlite::map_sqlx_error)?;
        let image_id: i64 = row.try_get("image_id").map_err(sqlite::map_sqlx_error)?;
        let price: f64 = row.try_get("price").map_err(sqlite::map_sqlx_error)?;
        let discount_price: f64 = row.try_get("discount_price").map_err(sqlite::map_sqlx_error)?;
        let tax: f64 = row.try_get("tax").map_err(sqlite::map_sqlx_error)?;
        let admin_status: String = row.try_get("admin_status").map_err(sqlite::map_sqlx_error)?;
        let rating_id: i64 = row.try_get("rating_id").map_err(sqlite::map_sqlx_error)?;
        let currency: String = row.try_get("currency").map_err(sqlite::map_sqlx_error)?;
        let is_published: bool = row.try_get("is_published").map_err(sqlite::map_sqlx_error)?;
        let is_deleted: bool = row.try_get("is_deleted").map_err(sqlite::map_sqlx_error)?;

        Ok(Product::new(
            ProductId::new(id),
            user_id,
            shop_id,
            name,
            description,
            quantity,
            category_id,
            image_id,
            price,
            discount_price,
            tax,
            admin_status,
            rating_id,
            currency,
            is_published,
            is_deleted,
        )?)
    }
}

/// Lists all registered products.
pub(crate) async fn list_products(ex: &mut Executor) -> DbResult<Vec<Product>> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM products ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Product::try_from).collect()
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM products ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Product::try_from).collect()
        }
    }
}

/// Fetches the product with identifier `id`.
pub(crate) async fn get_product(ex: &mut Executor, id: &ProductId) -> DbResult<Product> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM products WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Product::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM products WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Product::try_from(row)
        }
    }
}

/// Persists the new product `product`.
pub(crate) async fn create_product(ex: &mut Executor, product: &Product) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO products
                    (id, user_id, shop_id, name, description, quantity, category_id, image_id,
                        price, discount_price, tax, admin_status, rating_id, currency,
                        is_published, is_deleted)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)";
            let done = sqlx::query(query_str)
                .bind(product.id().as_str())
                .bind(product.user_id().as_str())
                .bind(product.shop_id().as_str())
                .bind(product.name().as_str())
                .bind(product.description().as_str())
                .bind(*product.quantity())
                .bind(*product.category_id())
                .bind(*product.image_id())
                .bind(*product.price())
                .bind(*product.discount_price())
                .bind(*product.tax())
                .bind(product.admin_status().as_str())
                .bind(*product.rating_id())
                .bind(product.currency().as_str())
                .bind(*product.is_published())
                .bind(*product.is_deleted())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO products
                    (id, user_id, shop_id, name, description, quantity, category_id, image_id,
                        price, discount_price, tax, admin_status, rating_id, currency,
                        is_published, is_deleted)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(product.id().as_str())
                .bind(product.user_id().as_str())
                .bind(product.shop_id().as_str())
                .bind(product.name().as_str())
                .bind(product.description().as_str())
                .bind(*product.quantity())
                .bind(*product.category_id())
                .bind(*product.image_id())
                .bind(*product.price())
                .bind(*product.discount_price())
                .bind(*product.tax())
                .bind(product.admin_status().as_str())
                .bind(*product.rating_id())
                .bind(product.currency().as_str())
                .bind(*product.is_published())
                .bind(*product.is_deleted())
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

/// Replaces the stored record of `product`, which must already exist.
pub(crate) async fn update_product(ex: &mut Executor, product: &Product) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE products
                SET user_id = $2, shop_id = $3, name = $4, description = $5, quantity = $6,
                    category_id = $7, image_id = $8, price = $9, discount_price = $10, tax = $11,
                    admin_status = $12, rating_id = $13, currency = $14, is_published = $15,
                    is_deleted = $16
                WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(product.id().as_str())
                .bind(product.user_id().as_str())
                .bind(product.shop_id().as_str())
                .bind(product.name().as_str())
                .bind(product.description().as_str())
                .bind(*product.quantity())
                .bind(*product.category_id())
                .bind(*product.image_id())
                .bind(*product.price())
                .bind(*product.discount_price())
                .bind(*product.tax())
                .bind(product.admin_status().as_str())
                .bind(*product.rating_id())
                .bind(product.currency().as_str())
                .bind(*product.is_published())
                .bind(*product.is_deleted())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE products
                SET user_id = ?, shop_id = ?, name = ?, description = ?, quantity = ?,
                    category_id = ?, image_id = ?, price = ?, discount_price = ?, tax = ?,
                    admin_status = ?, rating_id = ?, currency = ?, is_published = ?,
                    is_deleted = ?
                WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(product.user_id().as_str())
                .bind(product.shop_id().as_str())
                .bind(product.name().as_str())
                .bind(product.description().as_str())
                .bind(*product.quantity())
                .bind(*product.category_id())
                .bind(*product.image_id())
                .bind(*product.price())
                .bind(*product.discount_price())
                .bind(*product.tax())
                .bind(product.admin_status().as_str())
                .bind(*product.rating_id())
                .bind(product.currency().as_str())
                .bind(*product.is_published())
                .bind(*product.is_deleted())
                .bind(product.id().as_str())
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

/// Deletes the product with identifier `id`.
pub(crate) async fn delete_product(ex: &mut Executor, id: &ProductId) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM products WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM products WHERE id = ?";
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
