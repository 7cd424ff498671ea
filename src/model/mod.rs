//! Plain data types managed by the actors.
//!
//! Each entity implements [`ActorEntity`](actor_framework::ActorEntity) in its actor
//! module; this module only holds the state, the identifiers and the create/update
//! payloads.

pub mod customer;
pub mod driver;
pub mod meal;
pub mod order;
pub mod restaurant;

pub use customer::*;
pub use driver::*;
pub use meal::*;
pub use order::*;
pub use restaurant::*;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Declares a `u32` newtype identifier that the actor framework can allocate.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Type-safe identifier for Restaurants.
    RestaurantId,
    "restaurant"
);
entity_id!(
    /// Type-safe identifier for Meals.
    MealId,
    "meal"
);
entity_id!(
    /// Type-safe identifier for Customers.
    CustomerId,
    "customer"
);
entity_id!(
    /// Type-safe identifier for Drivers. Allocation order is registration order, which
    /// dispatch uses as its tie-break.
    DriverId,
    "driver"
);
entity_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

/// Opaque reference to the account (user identity) that owns a restaurant, customer or
/// driver profile. Authentication happens upstream; this core only stores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountRef(pub String);

impl AccountRef {
    pub fn new(account: impl Into<String>) -> Self {
        Self(account.into())
    }
}

impl Display for AccountRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `true` when the string is empty or only whitespace.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
