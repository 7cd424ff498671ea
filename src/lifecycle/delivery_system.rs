use crate::clients::Clients;
use crate::config::Config;
use crate::dispatch::{AssignOutcome, DispatchAssigner};
use crate::error::DeliveryError;
use crate::integrity::{self, IntegrityGuard};
use crate::model::*;
use crate::notify::{StatusChanged, StatusNotifier, TracingNotifier};
use crate::order_actor::{OrderContext, OrderError, OrderEvent};
use crate::{catalog_actor, directory_actor, order_actor};
use actor_framework::ActorClient;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// The runtime orchestrator of the delivery core.
///
/// `DeliverySystem` starts one actor per entity type, wires the order actor to the
/// catalog and directory, and exposes the inbound operations. Everything that spans
/// more than one actor (dispatch, deletes) is coordinated here.
///
/// Must be created inside a Tokio runtime.
///
/// ```rust
/// use delivery_core::lifecycle::DeliverySystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), delivery_core::error::DeliveryError> {
///     let system = DeliverySystem::new();
///     // ... register restaurants, place orders ...
///     system.shutdown().await
/// }
/// ```
pub struct DeliverySystem {
    clients: Clients,
    dispatch: DispatchAssigner,
    notifier: Arc<dyn StatusNotifier>,
    guard: IntegrityGuard,
    handles: Vec<JoinHandle<()>>,
}

impl DeliverySystem {
    /// Starts the system with the default configuration and a [`TracingNotifier`].
    pub fn new() -> Self {
        Self::spawn(Config::default().channel_capacity, Arc::new(TracingNotifier))
    }

    /// Starts the system with `config`, reporting status changes to `notifier`.
    pub fn with_config(
        config: &Config,
        notifier: Arc<dyn StatusNotifier>,
    ) -> Result<Self, DeliveryError> {
        config.validate()?;
        Ok(Self::spawn(config.channel_capacity, notifier))
    }

    fn spawn(capacity: usize, notifier: Arc<dyn StatusNotifier>) -> Self {
        // 1. Create actors
        let (restaurant_actor, restaurants) = catalog_actor::new_restaurants(capacity);
        let (meal_actor, meals) = catalog_actor::new_meals(capacity);
        let (customer_actor, customers) = directory_actor::new_customers(capacity);
        let (driver_actor, drivers) = directory_actor::new_drivers(capacity);
        let (order_actor, orders) = order_actor::new(capacity);

        // 2. Start actors with injected context
        let order_context = OrderContext {
            customers: customers.clone(),
            restaurants: restaurants.clone(),
            meals: meals.clone(),
        };
        let handles = vec![
            tokio::spawn(order_actor.run(order_context)),
            tokio::spawn(meal_actor.run(restaurants.clone())),
            tokio::spawn(restaurant_actor.run(())),
            tokio::spawn(customer_actor.run(())),
            tokio::spawn(driver_actor.run(())),
        ];
        info!(capacity, "Delivery system started");

        let dispatch = DispatchAssigner::new(orders.clone(), drivers.clone(), notifier.clone());
        Self {
            clients: Clients {
                restaurants,
                meals,
                customers,
                drivers,
                orders,
            },
            dispatch,
            notifier,
            guard: IntegrityGuard::default(),
            handles,
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn register_restaurant(
        &self,
        params: RestaurantCreate,
    ) -> Result<RestaurantId, DeliveryError> {
        Ok(self.clients.restaurants.register(params).await?)
    }

    pub async fn update_restaurant(
        &self,
        id: RestaurantId,
        update: RestaurantUpdate,
    ) -> Result<Restaurant, DeliveryError> {
        Ok(self.clients.restaurants.update_profile(id, update).await?)
    }

    pub async fn restaurant(&self, id: RestaurantId) -> Result<Option<Restaurant>, DeliveryError> {
        Ok(self.clients.restaurants.get(id).await?)
    }

    /// Adds a meal to an existing restaurant's menu.
    pub async fn add_meal(&self, params: MealCreate) -> Result<MealId, DeliveryError> {
        let _shared = self.guard.shared().await;
        Ok(self.clients.meals.add_meal(params).await?)
    }

    /// Edits a meal. Orders already placed keep the price they were placed at.
    pub async fn update_meal(&self, id: MealId, update: MealUpdate) -> Result<Meal, DeliveryError> {
        Ok(self.clients.meals.update_meal(id, update).await?)
    }

    pub async fn meal_price(&self, id: MealId) -> Result<u64, DeliveryError> {
        Ok(self.clients.meals.meal_price(id).await?)
    }

    pub async fn restaurant_owns(
        &self,
        restaurant_id: RestaurantId,
        meal_id: MealId,
    ) -> Result<bool, DeliveryError> {
        Ok(self.clients.meals.restaurant_owns(restaurant_id, meal_id).await?)
    }

    pub async fn menu(&self, restaurant_id: RestaurantId) -> Result<Vec<Meal>, DeliveryError> {
        Ok(self.clients.meals.meals_for_restaurant(restaurant_id).await?)
    }

    // =========================================================================
    // Directory
    // =========================================================================

    pub async fn register_customer(
        &self,
        params: CustomerCreate,
    ) -> Result<CustomerId, DeliveryError> {
        Ok(self.clients.customers.register(params).await?)
    }

    pub async fn update_customer(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, DeliveryError> {
        Ok(self.clients.customers.update_profile(id, update).await?)
    }

    pub async fn customer(&self, id: CustomerId) -> Result<Option<Customer>, DeliveryError> {
        Ok(self.clients.customers.get(id).await?)
    }

    /// Registers a driver, off duty until it reports availability.
    pub async fn register_driver(&self, params: DriverCreate) -> Result<DriverId, DeliveryError> {
        Ok(self.clients.drivers.register(params).await?)
    }

    pub async fn update_driver(
        &self,
        id: DriverId,
        update: DriverUpdate,
    ) -> Result<Driver, DeliveryError> {
        Ok(self.clients.drivers.update_profile(id, update).await?)
    }

    pub async fn update_driver_location(
        &self,
        id: DriverId,
        location: impl Into<String>,
    ) -> Result<Driver, DeliveryError> {
        Ok(self.clients.drivers.update_location(id, location.into()).await?)
    }

    /// The driver goes on or off duty. Does not start a dispatch by itself; call
    /// [`try_assign`](Self::try_assign) or
    /// [`dispatch_ready_orders`](Self::dispatch_ready_orders) afterwards.
    #[instrument(skip(self))]
    pub async fn register_driver_availability(
        &self,
        id: DriverId,
        available: bool,
    ) -> Result<Driver, DeliveryError> {
        let driver = self.clients.drivers.set_availability(id, available).await?;
        info!(driver_id = %id, available, "Driver availability changed");
        Ok(driver)
    }

    pub async fn driver(&self, id: DriverId) -> Result<Option<Driver>, DeliveryError> {
        Ok(self.clients.drivers.get(id).await?)
    }

    pub async fn available_drivers(&self) -> Result<Vec<Driver>, DeliveryError> {
        Ok(self.clients.drivers.available_drivers().await?)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Places an order in `Cooking`. No notification is sent.
    #[instrument(skip(self, params), fields(customer_id = %params.customer_id))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<PlacedOrder, DeliveryError> {
        let _shared = self.guard.shared().await;
        Ok(self.clients.orders.place_order(params).await?)
    }

    /// Cooking -> Ready, then an immediate dispatch attempt.
    ///
    /// Returns the dispatch outcome. When the attempt errors, the order stays `Ready`
    /// and the error is returned; the transition itself is not undone.
    #[instrument(skip(self))]
    pub async fn mark_kitchen_ready(
        &self,
        order_id: OrderId,
    ) -> Result<AssignOutcome, DeliveryError> {
        self.clients.orders.mark_kitchen_ready(order_id).await?;
        self.notifier
            .notify(StatusChanged::now(order_id, OrderStatus::Ready));

        match self.dispatch.try_assign(order_id).await {
            Ok(outcome) => Ok(outcome),
            // a concurrent sweep got there first
            Err(OrderError::InvalidTransition { .. }) => self.outcome_of(order_id).await,
            Err(e) => {
                warn!(%order_id, error = %e, "Dispatch after kitchen ready failed");
                Err(e.into())
            }
        }
    }

    /// Retries dispatch for one `Ready` order.
    pub async fn try_assign(&self, order_id: OrderId) -> Result<AssignOutcome, DeliveryError> {
        Ok(self.dispatch.try_assign(order_id).await?)
    }

    /// Retries dispatch for every `Ready` order, oldest first. Meant for a scheduler.
    ///
    /// Orders that stopped being `Ready` while the sweep ran are skipped. A driver left
    /// bound to a `Ready` order is put to work on that order.
    #[instrument(skip(self))]
    pub async fn dispatch_ready_orders(
        &self,
    ) -> Result<Vec<(OrderId, AssignOutcome)>, DeliveryError> {
        let ready = self.clients.orders.ready_orders().await?;
        let mut outcomes = Vec::with_capacity(ready.len());
        for order in ready {
            match self.dispatch.try_assign(order.id).await {
                Ok(outcome) => outcomes.push((order.id, outcome)),
                Err(OrderError::InvalidTransition { .. }) => {
                    debug!(order_id = %order.id, "No longer ready");
                }
                Err(e) => return Err(e.into()),
            }
        }
        let assigned = outcomes.iter().filter(|(_, o)| o.driver_id().is_some()).count();
        info!(ready = outcomes.len(), assigned, "Dispatch sweep finished");
        Ok(outcomes)
    }

    /// On the way -> Delivered, then frees the driver.
    ///
    /// If freeing the driver fails the order stays delivered and the error is returned.
    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, order_id: OrderId) -> Result<Order, DeliveryError> {
        Ok(self.dispatch.deliver(order_id).await?)
    }

    pub async fn order(&self, id: OrderId) -> Result<Order, DeliveryError> {
        Ok(self.clients.orders.order(id).await?)
    }

    pub async fn orders_for_customer(&self, id: CustomerId) -> Result<Vec<Order>, DeliveryError> {
        Ok(self.clients.orders.orders_for_customer(id).await?)
    }

    pub async fn orders_for_restaurant(
        &self,
        id: RestaurantId,
    ) -> Result<Vec<Order>, DeliveryError> {
        Ok(self.clients.orders.orders_for_restaurant(id).await?)
    }

    pub async fn orders_for_driver(&self, id: DriverId) -> Result<Vec<Order>, DeliveryError> {
        Ok(self.clients.orders.orders_for_driver(id).await?)
    }

    pub async fn current_order_for_driver(
        &self,
        id: DriverId,
    ) -> Result<Option<Order>, DeliveryError> {
        Ok(self.clients.orders.current_order_for_driver(id).await?)
    }

    pub async fn ready_orders(&self) -> Result<Vec<Order>, DeliveryError> {
        Ok(self.clients.orders.ready_orders().await?)
    }

    async fn outcome_of(&self, order_id: OrderId) -> Result<AssignOutcome, DeliveryError> {
        let order = self.clients.orders.order(order_id).await?;
        match (order.driver_id, order.picked_at) {
            (Some(driver_id), Some(picked_at)) => Ok(AssignOutcome::Assigned {
                driver_id,
                picked_at,
            }),
            _ => Err(OrderError::InvalidTransition {
                order_id,
                from: order.status,
                event: OrderEvent::DriverAssigned,
            }
            .into()),
        }
    }

    // =========================================================================
    // Deletes
    // =========================================================================

    /// Deletes a restaurant and, with it, its menu.
    pub async fn delete_restaurant(&self, id: RestaurantId) -> Result<(), DeliveryError> {
        integrity::delete_restaurant(&self.clients, &self.guard, id).await
    }

    pub async fn delete_meal(&self, id: MealId) -> Result<(), DeliveryError> {
        integrity::delete_meal(&self.clients, &self.guard, id).await
    }

    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), DeliveryError> {
        integrity::delete_customer(&self.clients, &self.guard, id).await
    }

    pub async fn delete_driver(&self, id: DriverId) -> Result<(), DeliveryError> {
        integrity::delete_driver(&self.clients, &self.guard, id).await
    }

    pub async fn delete_order(&self, id: OrderId) -> Result<(), DeliveryError> {
        integrity::delete_order(&self.clients, &self.guard, id).await
    }

    /// Gracefully shuts down every actor.
    ///
    /// Dropping the clients closes the mailboxes; each actor drains what is queued and
    /// exits, dropping the clients held in its context, which lets its dependencies exit
    /// in turn. Fails if any actor task panicked.
    pub async fn shutdown(self) -> Result<(), DeliveryError> {
        info!("Shutting down delivery system...");
        drop(self.dispatch);
        drop(self.clients);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(DeliveryError::Shutdown(e.to_string()));
            }
        }

        info!("Delivery system shutdown complete.");
        Ok(())
    }
}

impl Default for DeliverySystem {
    fn default() -> Self {
        Self::new()
    }
}
