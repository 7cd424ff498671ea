//! # Order Client
//!
//! High-level API for the `Order` actor: placement, the status events, and the order
//! queries. Validation and pricing happen inside the actor (`Order::on_create`); this
//! client only translates between the caller and the mailbox.

use super::{entity_error, lookup_error};
use crate::model::{
    CustomerId, DriverId, Order, OrderCreate, OrderId, OrderStatus, PlacedOrder, RestaurantId,
};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Validates, prices and stores a cart as a new order in `Cooking`.
    #[instrument(
        skip(self, params),
        fields(customer_id = %params.customer_id, restaurant_id = %params.restaurant_id)
    )]
    pub async fn place_order(&self, params: OrderCreate) -> Result<PlacedOrder, OrderError> {
        debug!(lines = params.line_items.len(), "place_order called");
        let order_id = self.inner.create(params).await.map_err(entity_error::<OrderError>)?;

        let order = self
            .inner
            .get(order_id)
            .await
            .map_err(entity_error::<OrderError>)?
            .ok_or(OrderError::NotFound(order_id))?;
        info!(%order_id, total = order.total, "Order placed");
        Ok(PlacedOrder {
            order_id,
            total: order.total,
        })
    }

    /// Cooking -> Ready.
    #[instrument(skip(self))]
    pub async fn mark_kitchen_ready(&self, id: OrderId) -> Result<Order, OrderError> {
        self.act(id, OrderAction::KitchenReady).await
    }

    /// Ready -> On the way with `driver_id` bound. Only dispatch should call this, after
    /// it has claimed the driver.
    #[instrument(skip(self))]
    pub async fn assign_driver(
        &self,
        id: OrderId,
        driver_id: DriverId,
        at: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        self.act(id, OrderAction::AssignDriver { driver_id, at }).await
    }

    /// On the way -> Delivered.
    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, id: OrderId) -> Result<Order, OrderError> {
        self.act(id, OrderAction::Delivered).await
    }

    #[instrument(skip(self))]
    pub(crate) async fn clear_driver(
        &self,
        id: OrderId,
        driver_id: DriverId,
    ) -> Result<Order, OrderError> {
        self.act(id, OrderAction::ClearDriver(driver_id)).await
    }

    /// Asks the actor to remove the order; it always refuses. See
    /// [`integrity::delete_order`](crate::integrity::delete_order).
    #[instrument(skip(self))]
    pub(crate) async fn remove(&self, id: OrderId) -> Result<(), OrderError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map_err(|e| lookup_error(e, OrderError::NotFound(id)))
    }

    /// Fetches an order, failing with `NotFound` when it does not exist.
    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id).await?.ok_or(OrderError::NotFound(id))
    }

    pub async fn orders_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, OrderError> {
        self.orders_where(|o| o.customer_id == customer_id).await
    }

    pub async fn orders_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Order>, OrderError> {
        self.orders_where(|o| o.restaurant_id == restaurant_id).await
    }

    pub async fn orders_for_driver(&self, driver_id: DriverId) -> Result<Vec<Order>, OrderError> {
        self.orders_where(|o| o.driver_id == Some(driver_id)).await
    }

    /// The unfinished order the driver is delivering, if any.
    #[instrument(skip(self))]
    pub async fn current_order_for_driver(
        &self,
        driver_id: DriverId,
    ) -> Result<Option<Order>, OrderError> {
        Ok(self
            .orders_where(|o| o.driver_id == Some(driver_id) && !o.is_finished())
            .await?
            .into_iter()
            .next())
    }

    /// Orders waiting for a driver, oldest first.
    #[instrument(skip(self))]
    pub async fn ready_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders_where(|o| o.status == OrderStatus::Ready).await
    }

    /// Orders matching `keep`, by id (which is placement order).
    async fn orders_where(
        &self,
        keep: impl Fn(&Order) -> bool + Send,
    ) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self.list().await?.into_iter().filter(|o| keep(o)).collect();
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(|e| lookup_error(e, OrderError::NotFound(id)))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        entity_error(e)
    }
}
