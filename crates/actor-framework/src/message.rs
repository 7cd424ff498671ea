//! # Generic Messages
//!
//! Requests travelling from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor), each carrying a oneshot reply channel.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to an actor.
///
/// The variants are the resource lifecycle (create, read, update, delete) plus:
///
/// - **List**: a snapshot of every entity in the store, taken between two other
///   requests. Used for scans such as "which drivers are free" or "which order details
///   reference this meal".
/// - **Action**: a custom [`ActorEntity::Action`] applied to one entity.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
