//! # Order Actor
//!
//! One actor hosts both halves of the order lifecycle:
//!
//! - **Ledger**: placement. A cart becomes an [`Order`] with its
//!   [`OrderDetails`](crate::model::OrderDetails), priced from the catalog, all or nothing.
//! - **Status engine**: the transitions in [`status`], applied through [`OrderAction`].
//!
//! Every mutation of every order goes through this actor's mailbox, so mutations of a
//! single order are serialized without a lock.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation and
//!   [`OrderContext`]
//! - [`status`] - [`OrderEvent`] and the transition table
//! - [`actions`] - [`OrderAction`]
//! - [`error`] - [`OrderError`]
//!
//! ## Dependencies
//!
//! ```text
//! Order ──get──> Customer
//!       ──get──> Restaurant
//!       ──get──> Meal ──get──> Restaurant
//! ```
//!
//! Dispatch talks to the Order and Driver actors from the outside; no actor calls the
//! Order actor.

pub mod actions;
pub mod entity;
pub mod error;
pub mod status;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;
pub use status::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client. Run it with an [`OrderContext`].
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
