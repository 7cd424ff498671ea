//! # Mock Clients
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. Use it to test client
//! wrappers, or an actor whose `Context` holds other clients, without spawning the
//! dependencies.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | scripted replies | real store |
//! | **Determinism** | total | subject to the scheduler |
//! | **Error injection** | `return_err` | needs the right state |
//!
//! Expectations are consumed in order, one per request, regardless of the ID sent. A
//! request that does not match the kind of the next expectation panics the mock task,
//! and the caller then sees [`FrameworkError::ActorDropped`].
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Meal { id: u32, price: u64 }
//! #[derive(Debug)] struct MealCreate;
//! #[derive(Debug)] struct MealUpdate;
//! #[derive(Debug)] enum MealAction {}
//! #[derive(Debug, thiserror::Error)] #[error("meal error")] struct MealError;
//!
//! #[async_trait]
//! impl ActorEntity for Meal {
//!     type Id = u32; type Create = MealCreate; type Update = MealUpdate;
//!     type Action = MealAction; type ActionResult = (); type Context = (); type Error = MealError;
//!     fn from_create_params(id: u32, _: MealCreate) -> Result<Self, Self::Error> { Ok(Self { id, price: 0 }) }
//!     async fn on_update(&mut self, _: MealUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: MealAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Meal>::new();
//!     mock.expect_get(7).return_ok(Some(Meal { id: 7, price: 500 }));
//!     mock.expect_list().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(7).await.unwrap().unwrap().price, 500);
//!     assert!(matches!(client.list().await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For tests that want to inspect each request themselves, [`create_mock_client`]
//! returns the raw receiver and the `expect_*` helper functions pull typed requests off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted reply, queued by one of the `expect_*` builders.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Delete {
        response: Result<(), FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio
    /// runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { respond_to, .. },
                        Some(Expectation::Delete { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Get { response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::List { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Create { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Update { response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, _id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Delete { response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, _id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Action { response })
    }

    /// Panics unless every queued expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder returned by the `expect_*` methods; finish it with `return_ok` or `return_err`.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(expectations: &Queue<T>, wrap: fn(Result<R, FrameworkError>) -> Expectation<T>) -> Self {
        Self {
            expectations: expectations.clone(),
            wrap,
        }
    }

    /// Queues a successful reply.
    pub fn return_ok(self, value: R) {
        let expectation = (self.wrap)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Queues an error reply.
    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.wrap)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
///
/// The test plays the actor: pull a request with one of the `expect_*` helpers, assert
/// on its payload, then answer through the returned oneshot sender.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request, if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a List.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Restaurant {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct RestaurantCreate {
        name: String,
    }

    #[derive(Debug)]
    struct RestaurantUpdate;

    #[derive(Debug)]
    enum RestaurantAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("Restaurant error")]
    struct RestaurantError;

    #[async_trait]
    impl ActorEntity for Restaurant {
        type Id = u32;
        type Create = RestaurantCreate;
        type Update = RestaurantUpdate;
        type Action = RestaurantAction;
        type ActionResult = ();
        type Context = ();
        type Error = RestaurantError;

        fn from_create_params(id: u32, params: RestaurantCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(
            &mut self,
            _update: RestaurantUpdate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(
            &mut self,
            _action: RestaurantAction,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn restaurant(id: u32, name: &str) -> Restaurant {
        Restaurant {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_create_roundtrip() {
        let (client, mut receiver) = create_mock_client::<Restaurant>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(RestaurantCreate {
                    name: "Pho Corner".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Pho Corner");
        responder.send(Ok(1)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_raw_receiver_list() {
        let (client, mut receiver) = create_mock_client::<Restaurant>(10);
        let list_task = tokio::spawn(async move { client.list().await });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        responder
            .send(Ok(vec![restaurant(1, "A"), restaurant(2, "B")]))
            .unwrap();

        assert_eq!(list_task.await.unwrap().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_expectations_are_consumed_in_order() {
        let mut mock = MockClient::<Restaurant>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(restaurant(1, "Pho Corner")));
        mock.expect_delete(1)
            .return_err(FrameworkError::NotFound("1".to_string()));

        let client = mock.client();
        let id = client
            .create(RestaurantCreate {
                name: "Pho Corner".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched.unwrap().name, "Pho Corner");

        let deleted = client.delete(1).await;
        assert!(matches!(deleted, Err(FrameworkError::NotFound(_))));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_reply() {
        let mut mock = MockClient::<Restaurant>::new();
        mock.expect_list().return_ok(vec![]);

        let client = mock.client();
        let result = client.get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
