//! # Catalog Actors
//!
//! Restaurants and their meals: read-mostly reference data that the ledger validates
//! carts against.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementations for
//!   [`Restaurant`] and [`Meal`]
//! - [`error`] - [`CatalogError`], shared by both actors
//! - [`new_restaurants()`] / [`new_meals()`] - factories returning the actor and its client
//!
//! ## Wiring
//!
//! The meal actor checks that the owning restaurant exists when a meal is added, so it
//! runs with a [`RestaurantClient`] as context:
//!
//! ```rust
//! use delivery_core::catalog_actor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (restaurant_actor, restaurants) = catalog_actor::new_restaurants(32);
//!     let (meal_actor, _meals) = catalog_actor::new_meals(32);
//!
//!     tokio::spawn(restaurant_actor.run(()));
//!     tokio::spawn(meal_actor.run(restaurants.clone()));
//! }
//! ```
//!
//! Removing a restaurant cascades to its meals; that routine lives in
//! [`integrity`](crate::integrity) because it has to consult the orders as well.

pub mod entity;
pub mod error;

pub use entity::{MealAction, RestaurantAction};
pub use error::*;

use crate::clients::{MealClient, RestaurantClient};
use crate::model::{Meal, Restaurant};
use actor_framework::ResourceActor;

/// Creates a new Restaurant actor and its client.
pub fn new_restaurants(buffer_size: usize) -> (ResourceActor<Restaurant>, RestaurantClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, RestaurantClient::new(generic_client))
}

/// Creates a new Meal actor and its client. Run it with a [`RestaurantClient`].
pub fn new_meals(buffer_size: usize) -> (ResourceActor<Meal>, MealClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, MealClient::new(generic_client))
}
