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

//! Operations on shops.

use crate::db::{self, DbError};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{Shop, ShopDelta, ShopId};

impl Driver {
    /// Gets a list of all registered shops.  An empty list is reported as a missing entity
    /// because clients treat a shopless deployment as such.
    pub(crate) async fn list_shops(self) -> DriverResult<Vec<Shop>> {
        let shops = db::list_shops(&mut self.db.ex().await?).await?;
        if shops.is_empty() {
            return Err(DriverError::NotFound("No shops found".to_owned()));
        }
        Ok(shops)
    }

    /// Gets the shop with identifier `id`.
    pub(crate) async fn get_shop(self, id: &ShopId) -> DriverResult<Shop> {
        match db::get_shop(&mut self.db.ex().await?, id).await {
            Ok(shop) => Ok(shop),
            Err(DbError::NotFound) => {
                Err(DriverError::NotFound("No shop found with that ID".to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Registers a new shop from its untrusted fields and returns the persisted entity with
    /// its freshly-generated identifier.
    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn create_shop(
        self,
        merchant_id: String,
        name: String,
        policy_confirmation: bool,
        restricted: &str,
        admin_status: &str,
        reviewed: bool,
        rating: f64,
    ) -> DriverResult<Shop> {
        let id = ShopId::new(uuid::Uuid::new_v4().to_string());
        let shop = Shop::new(
            id,
            merchant_id,
            name,
            policy_confirmation,
            restricted,
            admin_status,
            reviewed,
            rating,
        )?;
        db::create_shop(&mut self.db.ex().await?, &shop).await?;
        Ok(shop)
    }

    /// Applies the partial update in `delta` to the shop with identifier `id` and returns the
    /// updated entity.  The read and the write happen in the same transaction so concurrent
    /// updates cannot interleave.
    pub(crate) async fn update_shop(self, id: &ShopId, delta: ShopDelta) -> DriverResult<Shop> {
        let mut tx = self.db.begin().await?;
        let shop = match db::get_shop(tx.ex(), id).await {
            Ok(shop) => shop,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound("Shop not found".to_owned()));
            }
            Err(e) => return Err(e.into()),
        };
        let shop = shop.with_delta(delta)?;
        db::update_shop(tx.ex(), &shop).await?;
        tx.commit().await?;
        Ok(shop)
    }

    /// Deletes the shop with identifier `id` and returns the deleted entity.
    pub(crate) async fn delete_shop(self, id: &ShopId) -> DriverResult<Shop> {
        let mut tx = self.db.begin().await?;
        let shop = match db::get_shop(tx.ex(), id).await {
            Ok(shop) => shop,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound("Shop not found".to_owned()));
            }
            Err(e) => return Err(e.into()),
        };
        db::delete_shop(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(shop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::driver::testutils::*;
    use crate::model::testutils::sample_shop;

    #[tokio::test]
    async fn test_list_shops_empty_is_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("No shops found".to_owned()),
            context.driver().list_shops().await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_list_shops_some() {
        let context = TestContext::setup().await;

        let shop = sample_shop();
        db::create_shop(&mut context.ex().await, &shop).await.unwrap();

        assert_eq!(vec![shop], context.driver().list_shops().await.unwrap());
    }

    #[tokio::test]
    async fn test_get_shop_ok() {
        let context = TestContext::setup().await;

        let shop = sample_shop();
        db::create_shop(&mut context.ex().await, &shop).await.unwrap();

        assert_eq!(shop, context.driver().get_shop(shop.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_shop_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("No shop found with that ID".to_owned()),
            context.driver().get_shop(&ShopId::new("missing")).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_create_shop_generates_unique_ids() {
        let context = TestContext::setup().await;

        let shop1 = context
            .driver()
            .create_shop("m1".to_owned(), "Shop A".to_owned(), true, "NO", "PENDING", false, 4.5)
            .await
            .unwrap();
        let shop2 = context
            .driver()
            .create_shop("m1".to_owned(), "Shop A".to_owned(), true, "NO", "PENDING", false, 4.5)
            .await
            .unwrap();
        assert_ne!(shop1.id(), shop2.id());

        assert_eq!(shop1, db::get_shop(&mut context.ex().await, shop1.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_shop_invalid_input() {
        let context = TestContext::setup().await;

        match context
            .driver()
            .create_shop("".to_owned(), "Shop A".to_owned(), true, "NO", "MAYBE", false, 4.5)
            .await
        {
            Err(DriverError::InvalidInput(msg)) => {
                assert!(msg.contains("merchant_id cannot be empty"), "got: {}", msg);
                assert!(msg.contains("admin_status must be one of"), "got: {}", msg);
            }
            e => panic!("Unexpected result: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_update_shop_applies_delta() {
        let context = TestContext::setup().await;

        let shop = sample_shop();
        db::create_shop(&mut context.ex().await, &shop).await.unwrap();

        let delta = ShopDelta {
            name: Some("Renamed".to_owned()),
            restricted: Some("TEMPORARY".to_owned()),
            ..Default::default()
        };
        let updated = context.driver().update_shop(shop.id(), delta).await.unwrap();
        assert_eq!("Renamed", updated.name());
        assert_eq!(shop.merchant_id(), updated.merchant_id());

        assert_eq!(updated, db::get_shop(&mut context.ex().await, shop.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_shop_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Shop not found".to_owned()),
            context
                .driver()
                .update_shop(&ShopId::new("missing"), ShopDelta::default())
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_shop_invalid_delta() {
        let context = TestContext::setup().await;

        let shop = sample_shop();
        db::create_shop(&mut context.ex().await, &shop).await.unwrap();

        let delta = ShopDelta { rating: Some(-3.0), ..Default::default() };
        match context.driver().update_shop(shop.id(), delta).await {
            Err(DriverError::InvalidInput(msg)) => {
                assert!(msg.contains("rating"), "got: {}", msg);
            }
            e => panic!("Unexpected result: {:?}", e),
        }

        // The failed update must not have touched the stored entity.
        assert_eq!(shop, db::get_shop(&mut context.ex().await, shop.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_shop_returns_deleted_entity() {
        let context = TestContext::setup().await;

        let shop = sample_shop();
        db::create_shop(&mut context.ex().await, &shop).await.unwrap();

        assert_eq!(shop, context.driver().delete_shop(shop.id()).await.unwrap());
        assert_eq!(
            DbError::NotFound,
            db::get_shop(&mut context.ex().await, shop.id()).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_delete_shop_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Shop not found".to_owned()),
            context.driver().delete_shop(&ShopId::new("missing")).await.unwrap_err()
        );
    }
}
