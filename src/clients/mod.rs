//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client speaks its actor's domain error. Errors raised by an entity hook cross
//! the actor boundary boxed inside
//! [`FrameworkError::EntityError`](actor_framework::FrameworkError::EntityError) and are
//! recovered here, so callers can match on e.g. `OrderError::InvalidTransition`
//! directly.

pub mod customer_client;
pub mod driver_client;
pub mod meal_client;
pub mod order_client;
pub mod restaurant_client;

pub use customer_client::*;
pub use driver_client::*;
pub use meal_client::*;
pub use order_client::*;
pub use restaurant_client::*;

use actor_framework::FrameworkError;

/// One client per actor.
#[derive(Clone)]
pub struct Clients {
    pub restaurants: RestaurantClient,
    pub meals: MealClient,
    pub customers: CustomerClient,
    pub drivers: DriverClient,
    pub orders: OrderClient,
}

/// Recovers the domain error carried by `e`; plumbing failures become `E::from(message)`.
pub(crate) fn entity_error<E>(e: FrameworkError) -> E
where
    E: std::error::Error + From<String> + 'static,
{
    e.downcast_entity::<E>()
        .unwrap_or_else(|other| E::from(other.to_string()))
}

/// Like [`entity_error`], with the actor's "no such id" mapped to `not_found`.
pub(crate) fn lookup_error<E>(e: FrameworkError, not_found: E) -> E
where
    E: std::error::Error + From<String> + 'static,
{
    match e {
        FrameworkError::NotFound(_) => not_found,
        other => entity_error(other),
    }
}
