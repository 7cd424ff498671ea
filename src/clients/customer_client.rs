//! # Customer Client
//!
//! High-level API for the `Customer` actor.

use super::{entity_error, lookup_error};
use crate::directory_actor::DirectoryError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(account = %params.account))]
    pub async fn register(&self, params: CustomerCreate) -> Result<CustomerId, DirectoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(entity_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, DirectoryError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| lookup_error(e, DirectoryError::CustomerNotFound(id)))
    }

    /// Removes the customer record only; see
    /// [`integrity::delete_customer`](crate::integrity::delete_customer).
    #[instrument(skip(self))]
    pub(crate) async fn remove(&self, id: CustomerId) -> Result<(), DirectoryError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map_err(|e| lookup_error(e, DirectoryError::CustomerNotFound(id)))
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = DirectoryError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        entity_error(e)
    }
}
