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

//! The `Shop` data type and its companions.

use crate::model::{check_not_empty, check_positive, fold_problems, ModelError, ModelResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Newtype pattern for the opaque string identifiers of shops.
#[derive(Clone, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub(crate) struct ShopId(String);

impl ShopId {
    /// Creates a shop identifier from an untrusted string `s`.
    pub(crate) fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    /// Returns a string view of the identifier.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Restriction state of a shop.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum RestrictedState {
    /// The shop operates without restrictions.
    No,

    /// The shop is restricted until further review.
    Temporary,

    /// The shop is restricted for good.
    Permanent,
}

impl RestrictedState {
    /// Creates a restriction state from an untrusted string `s`, making sure it is one of the
    /// enumerated values.
    pub(crate) fn new(s: &str) -> ModelResult<Self> {
        match s {
            "NO" => Ok(RestrictedState::No),
            "TEMPORARY" => Ok(RestrictedState::Temporary),
            "PERMANENT" => Ok(RestrictedState::Permanent),
            _ => Err(ModelError(format!(
                "restricted must be one of NO, TEMPORARY, PERMANENT; got '{}'",
                s
            ))),
        }
    }

    /// Returns the wire and storage representation of the state.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            RestrictedState::No => "NO",
            RestrictedState::Temporary => "TEMPORARY",
            RestrictedState::Permanent => "PERMANENT",
        }
    }
}

/// Moderation state of a shop.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum AdminStatus {
    /// The shop awaits its first review.
    Pending,

    /// The shop is under review.
    Review,

    /// The shop has been approved.
    Approved,

    /// The shop has been blacklisted.
    Blacklist,
}

impl AdminStatus {
    /// Creates a moderation state from an untrusted string `s`, making sure it is one of the
    /// enumerated values.
    pub(crate) fn new(s: &str) -> ModelResult<Self> {
        match s {
            "PENDING" => Ok(AdminStatus::Pending),
            "REVIEW" => Ok(AdminStatus::Review),
            "APPROVED" => Ok(AdminStatus::Approved),
            "BLACKLIST" => Ok(AdminStatus::Blacklist),
            _ => Err(ModelError(format!(
                "admin_status must be one of PENDING, REVIEW, APPROVED, BLACKLIST; got '{}'",
                s
            ))),
        }
    }

    /// Returns the wire and storage representation of the state.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            AdminStatus::Pending => "PENDING",
            AdminStatus::Review => "REVIEW",
            AdminStatus::Approved => "APPROVED",
            AdminStatus::Blacklist => "BLACKLIST",
        }
    }
}

/// A merchant's shop.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Shop {
    /// Identifier of the shop.
    id: ShopId,

    /// Identifier of the owning merchant.
    merchant_id: String,

    /// Display name of the shop.
    name: String,

    /// Whether the merchant confirmed the usage policy.
    policy_confirmation: bool,

    /// Restriction state of the shop.
    restricted: RestrictedState,

    /// Moderation state of the shop.
    admin_status: AdminStatus,

    /// Whether the shop has been reviewed.
    reviewed: bool,

    /// Rating of the shop; strictly positive.
    rating: f64,
}

impl Shop {
    /// Creates a shop from untrusted primitives, reporting every invalid field.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: ShopId,
        merchant_id: String,
        name: String,
        policy_confirmation: bool,
        restricted: &str,
        admin_status: &str,
        reviewed: bool,
        rating: f64,
    ) -> ModelResult<Shop> {
        let mut problems = vec![];

        check_not_empty(&mut problems, "merchant_id", &merchant_id);
        check_not_empty(&mut problems, "name", &name);
        check_positive(&mut problems, "rating", rating);

        let restricted = match RestrictedState::new(restricted) {
            Ok(restricted) => restricted,
            Err(e) => {
                problems.push(e.0);
                RestrictedState::No
            }
        };
        let admin_status = match AdminStatus::new(admin_status) {
            Ok(admin_status) => admin_status,
            Err(e) => {
                problems.push(e.0);
                AdminStatus::Pending
            }
        };

        fold_problems(
            Shop { id, merchant_id, name, policy_confirmation, restricted, admin_status, reviewed, rating },
            problems,
        )
    }

    /// Applies the partial update in `delta`, revalidating the fields it carries.  Fields not
    /// present in the delta keep their current values.
    pub(crate) fn with_delta(mut self, delta: ShopDelta) -> ModelResult<Shop> {
        let mut problems = vec![];

        if let Some(merchant_id) = delta.merchant_id {
            check_not_empty(&mut problems, "merchant_id", &merchant_id);
            self.merchant_id = merchant_id;
        }
        if let Some(name) = delta.name {
            check_not_empty(&mut problems, "name", &name);
            self.name = name;
        }
        if let Some(policy_confirmation) = delta.policy_confirmation {
            self.policy_confirmation = policy_confirmation;
        }
        if let Some(restricted) = delta.restricted {
            match RestrictedState::new(&restricted) {
                Ok(restricted) => self.restricted = restricted,
                Err(e) => problems.push(e.0),
            }
        }
        if let Some(admin_status) = delta.admin_status {
            match AdminStatus::new(&admin_status) {
                Ok(admin_status) => self.admin_status = admin_status,
                Err(e) => problems.push(e.0),
            }
        }
        if let Some(reviewed) = delta.reviewed {
            self.reviewed = reviewed;
        }
        if let Some(rating) = delta.rating {
            check_positive(&mut problems, "rating", rating);
            self.rating = rating;
        }

        fold_problems(self, problems)
    }
}

/// Partial update to a shop.  Every field is optional; fields that are present must satisfy
/// the same constraints as on creation.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct ShopDelta {
    /// New identifier of the owning merchant, if updated.
    pub(crate) merchant_id: Option<String>,

    /// New display name, if updated.
    pub(crate) name: Option<String>,

    /// New policy confirmation flag, if updated.
    pub(crate) policy_confirmation: Option<bool>,

    /// New restriction state, if updated.
    pub(crate) restricted: Option<String>,

    /// New moderation state, if updated.
    pub(crate) admin_status: Option<String>,

    /// New reviewed flag, if updated.
    pub(crate) reviewed: Option<bool>,

    /// New rating, if updated.
    pub(crate) rating: Option<f64>,
}
