//! # Generic Actor Server
//!
//! `ResourceActor` owns the store for one entity type and is the only task that ever
//! touches it. Requests are handled strictly one after another.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Concurrency Model
/// One actor per entity type, one Tokio task per actor. Because the loop handles a
/// single request at a time, a hook that reads a field and then writes it (for example
/// "claim this driver if it is free") cannot be interleaved with another request for the
/// same store. That sequential loop is the ordering point the domain relies on; no
/// `Mutex` or `RwLock` protects `store`.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the server half and a client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the returned future.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Customer { id: u32, phone: String }
/// #[derive(Debug)] struct CustomerCreate { phone: String }
/// #[derive(Debug)] struct CustomerUpdate;
/// #[derive(Debug)] enum CustomerAction {}
/// #[derive(Debug, thiserror::Error)] #[error("customer error")] struct CustomerError;
///
/// #[async_trait]
/// impl ActorEntity for Customer {
///     type Id = u32;
///     type Create = CustomerCreate;
///     type Update = CustomerUpdate;
///     type Action = CustomerAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = CustomerError;
///
///     fn from_create_params(id: u32, p: CustomerCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, phone: p.phone })
///     }
///     async fn on_update(&mut self, _: CustomerUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CustomerAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Customer>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(CustomerCreate { phone: "555-0100".into() }).await.unwrap();
///     assert_eq!(id, 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: allocate the next ID, `from_create_params`, `on_create`, then insert.
///   Nothing is inserted if either step fails.
/// * **Get**: clone of the entity, or `None`.
/// * **List**: clones of every entity, in no particular order.
/// * **Update**: `on_update` on the stored entity; returns the new state.
/// * **Delete**: `on_delete` may veto; otherwise the entity is removed.
/// * **Action**: `handle_action` on the stored entity; returns its result.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is handed to every hook.
    pub async fn run(mut self, context: T::Context) {
        // "Driver" rather than "delivery_core::model::driver::Driver"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let items: Vec<T> = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete vetoed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
