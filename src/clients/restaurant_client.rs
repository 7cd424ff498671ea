//! # Restaurant Client
//!
//! High-level API for the `Restaurant` actor.

use super::{entity_error, lookup_error};
use crate::catalog_actor::CatalogError;
use crate::model::{Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Restaurant actor.
#[derive(Clone)]
pub struct RestaurantClient {
    inner: ResourceClient<Restaurant>,
}

impl RestaurantClient {
    pub fn new(inner: ResourceClient<Restaurant>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn register(&self, params: RestaurantCreate) -> Result<RestaurantId, CatalogError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(entity_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: RestaurantId,
        update: RestaurantUpdate,
    ) -> Result<Restaurant, CatalogError> {
        debug!("Sending request");
        self.inner
            .update(id, update)
            .await
            .map_err(|e| lookup_error(e, CatalogError::RestaurantNotFound(id)))
    }

    /// Removes the restaurant record only. Use
    /// [`integrity::delete_restaurant`](crate::integrity::delete_restaurant) to apply the
    /// cascade and restrict rules.
    #[instrument(skip(self))]
    pub(crate) async fn remove(&self, id: RestaurantId) -> Result<(), CatalogError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map_err(|e| lookup_error(e, CatalogError::RestaurantNotFound(id)))
    }
}

#[async_trait]
impl ActorClient<Restaurant> for RestaurantClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        entity_error(e)
    }
}
