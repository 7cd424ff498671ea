//! # Driver Client
//!
//! High-level API for the `Driver` actor. `claim` and `release` are the two halves of
//! a dispatch binding; everything else is data entry.

use super::{entity_error, lookup_error};
use crate::directory_actor::{DirectoryError, DriverAction};
use crate::model::{Driver, DriverCreate, DriverId, DriverUpdate, OrderId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Driver actor.
#[derive(Clone)]
pub struct DriverClient {
    inner: ResourceClient<Driver>,
}

impl DriverClient {
    pub fn new(inner: ResourceClient<Driver>) -> Self {
        Self { inner }
    }

    /// Registers a driver. New drivers are off duty.
    #[instrument(skip(self, params), fields(account = %params.account))]
    pub async fn register(&self, params: DriverCreate) -> Result<DriverId, DirectoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(entity_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: DriverId,
        update: DriverUpdate,
    ) -> Result<Driver, DirectoryError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| lookup_error(e, DirectoryError::DriverNotFound(id)))
    }

    #[instrument(skip(self))]
    pub async fn set_availability(
        &self,
        id: DriverId,
        on_duty: bool,
    ) -> Result<Driver, DirectoryError> {
        self.act(id, DriverAction::SetAvailability(on_duty)).await
    }

    #[instrument(skip(self))]
    pub async fn update_location(
        &self,
        id: DriverId,
        location: String,
    ) -> Result<Driver, DirectoryError> {
        self.act(id, DriverAction::UpdateLocation(location)).await
    }

    /// Binds the driver to `order_id` if, and only if, it is available at the moment the
    /// driver actor handles the request.
    #[instrument(skip(self))]
    pub async fn claim(&self, id: DriverId, order_id: OrderId) -> Result<Driver, DirectoryError> {
        self.act(id, DriverAction::Claim(order_id)).await
    }

    #[instrument(skip(self))]
    pub async fn release(&self, id: DriverId, order_id: OrderId) -> Result<Driver, DirectoryError> {
        self.act(id, DriverAction::Release(order_id)).await
    }

    /// Drivers that are on duty and unbound, earliest registered first.
    ///
    /// This is a snapshot: a listed driver may be claimed by someone else before the
    /// caller gets to it, which is why dispatch goes through [`claim`](Self::claim).
    #[instrument(skip(self))]
    pub async fn available_drivers(&self) -> Result<Vec<Driver>, DirectoryError> {
        let mut drivers: Vec<Driver> = self
            .list()
            .await?
            .into_iter()
            .filter(Driver::is_available)
            .collect();
        drivers.sort_by_key(|driver| driver.id);
        debug!(count = drivers.len(), "Available drivers");
        Ok(drivers)
    }

    /// The driver currently bound to `order_id`, if any.
    #[instrument(skip(self))]
    pub async fn bound_to(&self, order_id: OrderId) -> Result<Option<Driver>, DirectoryError> {
        let bound = self
            .list()
            .await?
            .into_iter()
            .find(|driver| driver.current_order == Some(order_id));
        Ok(bound)
    }

    /// Removes the driver record; the actor refuses while the driver is bound. See
    /// [`integrity::delete_driver`](crate::integrity::delete_driver).
    #[instrument(skip(self))]
    pub(crate) async fn remove(&self, id: DriverId) -> Result<(), DirectoryError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map_err(|e| lookup_error(e, DirectoryError::DriverNotFound(id)))
    }

    async fn act(&self, id: DriverId, action: DriverAction) -> Result<Driver, DirectoryError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(|e| lookup_error(e, DirectoryError::DriverNotFound(id)))
    }
}

#[async_trait]
impl ActorClient<Driver> for DriverClient {
    type Error = DirectoryError;

    fn inner(&self) -> &ResourceClient<Driver> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        entity_error(e)
    }
}
