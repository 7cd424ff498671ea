//! # Referential Integrity
//!
//! Each actor owns one entity type and cannot see the others, so the cross-entity
//! delete rules live here as explicit routines:
//!
//! | Delete | Dependents | Rule |
//! |---|---|---|
//! | Restaurant | Orders | restrict |
//! | Restaurant | Meals | cascade |
//! | Meal | Order details | restrict |
//! | Customer | Orders | restrict |
//! | Driver | Unfinished order | restrict |
//! | Driver | Delivered orders | set the order's driver to none |
//! | Order | Order details | restrict |
//!
//! Deletes hold the [`IntegrityGuard`] exclusively for their whole check-then-act
//! sequence. Operations that create references (placing an order, adding a meal) hold
//! it shared, so no reference can appear between a delete's check and its removal.
//! Guards are released on drop, which covers every early return.

use crate::catalog_actor::CatalogError;
use crate::clients::Clients;
use crate::directory_actor::DirectoryError;
use crate::error::DeliveryError;
use crate::model::{CustomerId, DriverId, MealId, OrderId, RestaurantId};
use crate::order_actor::OrderError;
use actor_framework::ActorClient;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, instrument, warn};

/// Orders reference-creating operations against deletes.
#[derive(Debug, Clone, Default)]
pub struct IntegrityGuard {
    lock: Arc<RwLock<()>>,
}

impl IntegrityGuard {
    /// Held while creating references.
    pub async fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().await
    }

    /// Held for the duration of a delete routine.
    pub async fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().await
    }
}

fn restricted(entity: &'static str, id: impl ToString, dependents: String) -> DeliveryError {
    DeliveryError::ReferentialIntegrityViolation {
        entity,
        id: id.to_string(),
        dependents,
    }
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Deletes a restaurant and its meals. Refused while any order names the restaurant.
#[instrument(skip(clients, guard))]
pub async fn delete_restaurant(
    clients: &Clients,
    guard: &IntegrityGuard,
    id: RestaurantId,
) -> Result<(), DeliveryError> {
    let _exclusive = guard.exclusive().await;

    clients
        .restaurants
        .get(id)
        .await?
        .ok_or(CatalogError::RestaurantNotFound(id))?;

    let orders = clients.orders.orders_for_restaurant(id).await?;
    if !orders.is_empty() {
        warn!(orders = orders.len(), "Restaurant still has orders");
        return Err(restricted("restaurant", id, count(orders.len(), "order")));
    }

    let meals = clients.meals.meals_for_restaurant(id).await?;
    for meal in &meals {
        clients.meals.remove(meal.id).await?;
    }
    clients.restaurants.remove(id).await?;
    info!(meals = meals.len(), "Restaurant deleted with its meals");
    Ok(())
}

/// Deletes a meal. Refused while any order line references it.
#[instrument(skip(clients, guard))]
pub async fn delete_meal(
    clients: &Clients,
    guard: &IntegrityGuard,
    id: MealId,
) -> Result<(), DeliveryError> {
    let _exclusive = guard.exclusive().await;

    clients
        .meals
        .get(id)
        .await?
        .ok_or(CatalogError::MealNotFound(id))?;

    let lines: usize = clients
        .orders
        .list()
        .await?
        .iter()
        .map(|order| order.details.iter().filter(|d| d.meal_id == id).count())
        .sum();
    if lines > 0 {
        warn!(lines, "Meal is referenced by order details");
        return Err(restricted("meal", id, count(lines, "order detail")));
    }

    clients.meals.remove(id).await?;
    info!("Meal deleted");
    Ok(())
}

/// Deletes a customer. Refused while any order belongs to it.
#[instrument(skip(clients, guard))]
pub async fn delete_customer(
    clients: &Clients,
    guard: &IntegrityGuard,
    id: CustomerId,
) -> Result<(), DeliveryError> {
    let _exclusive = guard.exclusive().await;

    clients
        .customers
        .get(id)
        .await?
        .ok_or(DirectoryError::CustomerNotFound(id))?;

    let orders = clients.orders.orders_for_customer(id).await?;
    if !orders.is_empty() {
        warn!(orders = orders.len(), "Customer still has orders");
        return Err(restricted("customer", id, count(orders.len(), "order")));
    }

    clients.customers.remove(id).await?;
    info!("Customer deleted");
    Ok(())
}

/// Deletes a driver and unsets it on its delivered orders. Refused while the driver is
/// bound to an unfinished order.
///
/// The driver is removed first: its actor refuses the delete while a binding exists, and
/// once it is gone no dispatch can claim it, so the orders cleared afterwards are all
/// delivered ones.
#[instrument(skip(clients, guard))]
pub async fn delete_driver(
    clients: &Clients,
    guard: &IntegrityGuard,
    id: DriverId,
) -> Result<(), DeliveryError> {
    let _exclusive = guard.exclusive().await;

    let driver = clients
        .drivers
        .get(id)
        .await?
        .ok_or(DirectoryError::DriverNotFound(id))?;

    match clients.drivers.remove(id).await {
        Ok(()) => {}
        Err(DirectoryError::ReferentialIntegrityViolation(reason)) => {
            warn!(%reason, "Driver is still delivering");
            let dependents = match driver.current_order {
                Some(order_id) => format!("unfinished {order_id}"),
                None => "an unfinished order".to_string(),
            };
            return Err(restricted("driver", id, dependents));
        }
        Err(e) => return Err(e.into()),
    }

    let delivered = clients.orders.orders_for_driver(id).await?;
    for order in &delivered {
        clients.orders.clear_driver(order.id, id).await?;
    }
    info!(cleared = delivered.len(), "Driver deleted");
    Ok(())
}

/// Orders always carry details, so this only ever reports why the delete is refused.
#[instrument(skip(clients, guard))]
pub async fn delete_order(
    clients: &Clients,
    guard: &IntegrityGuard,
    id: OrderId,
) -> Result<(), DeliveryError> {
    let _exclusive = guard.exclusive().await;

    let order = clients.orders.order(id).await?;
    match clients.orders.remove(id).await {
        Ok(()) => Ok(()),
        Err(OrderError::ReferentialIntegrityViolation(_)) => Err(restricted(
            "order",
            id,
            count(order.details.len(), "order detail"),
        )),
        Err(e) => Err(e.into()),
    }
}
