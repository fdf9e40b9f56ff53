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

//! Operations on products.

use crate::db::{self, DbError};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{Product, ProductDelta, ProductId};

impl Driver {
    /// Gets a list of all registered products.  Unlike shops, an empty catalog is a perfectly
    /// valid answer.
    pub(crate) async fn list_products(self) -> DriverResult<Vec<Product>> {
        let products = db::list_products(&mut self.db.ex().await?).await?;
        Ok(products)
    }

    /// Gets the product with identifier `id`.
    pub(crate) async fn get_product(self, id: &ProductId) -> DriverResult<Product> {
        match db::get_product(&mut self.db.ex().await?, id).await {
            Ok(product) => Ok(product),
            Err(DbError::NotFound) => {
                Err(DriverError::NotFound("Product not found".to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Registers a new product from its untrusted fields and returns the persisted entity with
    /// its freshly-generated identifier.
    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn create_product(
        self,
        user_id: String,
        shop_id: String,
        name: String,
        description: String,
        quantity: i64,
        category_id: i64,
        image_id: i64,
        price: f64,
        discount_price: f64,
        tax: f64,
        admin_status: String,
        rating_id: i64,
        currency: String,
        is_published: bool,
        is_deleted: bool,
    ) -> DriverResult<Product> {
        let id = ProductId::new(uuid::Uuid::new_v4().to_string());
        let product = Product::new(
            id,
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
        )?;
        db::create_product(&mut self.db.ex().await?, &product).await?;
        Ok(product)
    }

    /// Applies the partial update in `delta` to the product with identifier `id` and returns
    /// the updated entity.  The read and the write happen in the same transaction so concurrent
    /// updates cannot interleave.
    pub(crate) async fn update_product(
        self,
        id: &ProductId,
        delta: ProductDelta,
    ) -> DriverResult<Product> {
        let mut tx = self.db.begin().await?;
        let product = match db::get_product(tx.ex(), id).await {
            Ok(product) => product,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound("Product not found".to_owned()));
            }
            Err(e) => return Err(e.into()),
        };
        let product = product.with_delta(delta)?;
        db::update_product(tx.ex(), &product).await?;
        tx.commit().await?;
        Ok(product)
    }

    /// Deletes the product with identifier `id`.
    pub(crate) async fn delete_product(self, id: &ProductId) -> DriverResult<()> {
        match db::delete_product(&mut self.db.ex().await?, id).await {
            Ok(()) => Ok(()),
            Err(DbError::NotFound) => {
                Err(DriverError::NotFound("Product not found".to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
