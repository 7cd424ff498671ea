//! # ActorEntity Trait
//!
//! The contract every resource must satisfy to be hosted by a [`ResourceActor`](crate::ResourceActor).
//!
//! Associated types pin down the payloads each operation accepts, so a `MealCreate` can
//! never be sent to the driver actor. Hooks run inside the actor task, which means every
//! hook observes and mutates the entity with no other request interleaved.
//!
//! `on_create` and `on_delete` have no-op defaults; `on_update` and `handle_action` must
//! be implemented (an entity without updates or actions can return `Ok` immediately).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they may call other actors through the clients held in
/// `Context`. The actor awaits the hook before it reads its next message; a slow hook
/// therefore delays every other request for the same entity type.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier for this entity. Built from the actor's sequential `u32` counter, so
    /// identifier order is creation order.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. claiming a driver, advancing an order).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()` time. Use `()` when there are none.
    type Context: Send + Sync;

    /// Error type for this entity.
    ///
    /// One enum per actor rather than one per action: callers match a single type and the
    /// framework can carry it across the channel inside
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its freshly allocated ID and the creation payload.
    /// Runs synchronously before `on_create`; reject malformed payloads here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity is stored. An error here discards
    /// the entity entirely, so nothing partial is ever visible.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before removal. An error vetoes the delete and leaves the entity in place.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a resource-specific action.
    ///
    /// An implementation that returns `Err` must leave `self` unchanged.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
