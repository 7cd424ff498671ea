//! # Directory Actors
//!
//! Customers and drivers, the two account-backed profiles of the marketplace.
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementations
//! - [`actions`] - [`DriverAction`] (duty, location, claim, release)
//! - [`error`] - [`DirectoryError`]
//!
//! Both actors run without context: they never call other actors.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{CustomerClient, DriverClient};
use crate::model::{Customer, Driver};
use actor_framework::ResourceActor;

/// Creates a new Customer actor and its client.
pub fn new_customers(buffer_size: usize) -> (ResourceActor<Customer>, CustomerClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CustomerClient::new(generic_client))
}

/// Creates a new Driver actor and its client.
pub fn new_drivers(buffer_size: usize) -> (ResourceActor<Driver>, DriverClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, DriverClient::new(generic_client))
}
