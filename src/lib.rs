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

//! REST service for the e-commerce "shop" domain: CRUD endpoints for shops,
//! products and coupons, backed by a relational store.
//!
//! The code follows a strict layering, bottom to top:
//!
//! 1.  `model`: validated domain data types; no logic, no I/O.
//!
//! 1.  `db`: the persistence gateway, exposing one free function per store
//!     operation over a backend-agnostic `Executor`.
//!
//! 1.  `driver`: the business logic, coordinating validation and persistence
//!     for each resource operation.
//!
//! 1.  `rest`: the HTTP layer, with one handler file per API and a single
//!     error funnel that turns layered errors into JSON responses.
//!
//! 1.  `main`: configuration gathering and process startup.
//!
//! Errors float towards the REST layer via `?`, being converted from
//! `DbError` to `DriverError` to `RestError` along the way, and only become
//! client-visible status codes in `RestError`'s `IntoResponse`.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use crate::clocks::SystemClock;
use crate::db::Db;
use crate::driver::Driver;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

pub(crate) mod clocks;
pub mod db;
pub(crate) mod driver;
pub mod env;
pub(crate) mod model;
mod rest;
use rest::app;

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose
/// many crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Box<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(Arc::from(db), Arc::from(SystemClock::default()));
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
