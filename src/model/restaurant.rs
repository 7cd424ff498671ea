use crate::model::{AccountRef, RestaurantId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A restaurant profile. Owns its meals: deleting a restaurant deletes them too.
///
/// # Actor Framework
/// Managed by the restaurant actor; see
/// [`catalog_actor`](crate::catalog_actor) for the `ActorEntity` implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub account: AccountRef,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub logo: String,
}

impl Restaurant {
    pub fn new(id: RestaurantId, params: RestaurantCreate) -> Self {
        Self {
            id,
            account: params.account,
            name: params.name,
            phone: params.phone,
            address: params.address,
            logo: params.logo,
        }
    }
}

impl Display for Restaurant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Payload for registering a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub account: AccountRef,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub logo: String,
}

/// Profile changes; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo: Option<String>,
}
