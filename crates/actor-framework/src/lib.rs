//! # Actor Framework
//!
//! Building blocks for resource-oriented actors on top of Tokio. Every resource type
//! (a restaurant, a meal, a driver, an order) lives in exactly one [`ResourceActor`]
//! that owns its store and processes requests one at a time. Callers talk to it through a
//! cheap, cloneable [`ResourceClient`].
//!
//! ## Why actors for a marketplace core?
//!
//! A delivery marketplace has a handful of entity kinds that change concurrently but need
//! strict per-entity ordering: an order must never be advanced twice by racing callers,
//! and a driver must never be handed to two orders at once. An actor gives each entity
//! kind a single ordering point without any lock in the domain code:
//!
//! - **Isolation**: the store is owned by one task, so no `Mutex` guards entity state.
//! - **Sequential processing**: a read-check-write inside one hook is atomic with
//!   respect to every other request sent to the same actor.
//! - **Parallelism across kinds**: restaurants, drivers and orders run in separate tasks.
//!
//! Further reading: [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/).
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - domain state plus lifecycle hooks.
//! 2. **Runtime** ([`ResourceActor`]) - the message loop and the store.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed async calls.
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Meal {
//!     id: u32,
//!     price: u64,
//! }
//!
//! #[derive(Debug)] struct MealCreate { price: u64 }
//! #[derive(Debug)] struct MealUpdate { price: Option<u64> }
//! #[derive(Debug)] enum MealAction { Price }
//! #[derive(Debug, thiserror::Error)] #[error("meal error")] struct MealError;
//!
//! #[async_trait]
//! impl ActorEntity for Meal {
//!     type Id = u32;
//!     type Create = MealCreate;
//!     type Update = MealUpdate;
//!     type Action = MealAction;
//!     type ActionResult = u64;
//!     type Context = ();
//!     type Error = MealError;
//!
//!     fn from_create_params(id: u32, params: MealCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, price: params.price })
//!     }
//!
//!     async fn on_update(&mut self, update: MealUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(price) = update.price { self.price = price; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: MealAction, _ctx: &()) -> Result<u64, Self::Error> {
//!         match action { MealAction::Price => Ok(self.price) }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Meal>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(MealCreate { price: 500 }).await.unwrap();
//!     client.update(id, MealUpdate { price: Some(450) }).await.unwrap();
//!     assert_eq!(client.perform_action(id, MealAction::Price).await.unwrap(), 450);
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to the constructor. The
//! order actor, for instance, is started with the catalog and directory clients it needs
//! to validate a cart; those clients are created first and simply cloned into the context.
//! Keep the dependency graph acyclic: an actor awaiting a hook that calls an actor which
//! in turn calls back into the first one will deadlock.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations so client wrappers
//! and actors with dependencies can be tested without spawning the real dependencies.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
