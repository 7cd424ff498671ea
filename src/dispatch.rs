//! # Dispatch
//!
//! Binds `Ready` orders to available drivers.
//!
//! Binding takes two steps across two actors:
//!
//! 1. **Claim** the driver (`DriverAction::Claim`). The driver actor checks and flips the
//!    availability in one message, so of two dispatches racing for the same driver
//!    exactly one wins; the loser moves on to the next candidate.
//! 2. **Assign** the order (`OrderAction::AssignDriver`), which performs
//!    Ready -> On the way and records `picked_at`.
//!
//! If step 2 fails (the order was assigned by someone else in the meantime, or is not
//! `Ready`) the claim is rolled back with `DriverAction::Release`, unless the order ended
//! up with this very driver.
//!
//! Both steps run on a spawned task, as do delivery and the driver release that follows
//! it, so dropping the caller's future cannot stop half way. A driver still bound to a
//! `Ready` order (for example after a crash between the steps) is picked up again by the
//! next attempt for that order.

use crate::clients::{DriverClient, OrderClient};
use crate::directory_actor::DirectoryError;
use crate::model::{DriverId, Order, OrderId, OrderStatus};
use crate::notify::{StatusChanged, StatusNotifier};
use crate::order_actor::{OrderError, OrderEvent};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn, Instrument};

/// Result of a dispatch attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    /// The order is on the way with `driver_id`.
    Assigned {
        driver_id: DriverId,
        picked_at: DateTime<Utc>,
    },
    /// Every driver is off duty or busy. The order stays `Ready`.
    NoDriverAvailable,
}

impl AssignOutcome {
    pub fn driver_id(&self) -> Option<DriverId> {
        match self {
            AssignOutcome::Assigned { driver_id, .. } => Some(*driver_id),
            AssignOutcome::NoDriverAvailable => None,
        }
    }
}

#[derive(Clone)]
pub struct DispatchAssigner {
    orders: OrderClient,
    drivers: DriverClient,
    notifier: Arc<dyn StatusNotifier>,
}

impl DispatchAssigner {
    pub fn new(
        orders: OrderClient,
        drivers: DriverClient,
        notifier: Arc<dyn StatusNotifier>,
    ) -> Self {
        Self {
            orders,
            drivers,
            notifier,
        }
    }

    /// Tries to bind one available driver to a `Ready` order, earliest registered driver
    /// first. A driver already bound to this order is reused.
    #[instrument(skip(self))]
    pub async fn try_assign(&self, order_id: OrderId) -> Result<AssignOutcome, OrderError> {
        let this = self.clone();
        detached(async move { this.assign(order_id).await }).await
    }

    async fn assign(&self, order_id: OrderId) -> Result<AssignOutcome, OrderError> {
        let order = self.orders.order(order_id).await?;
        if order.status != OrderStatus::Ready {
            return Err(OrderError::InvalidTransition {
                order_id,
                from: order.status,
                event: OrderEvent::DriverAssigned,
            });
        }

        let driver_id = match self.drivers.bound_to(order_id).await? {
            Some(bound) => {
                debug!(driver_id = %bound.id, "Resuming with the driver already bound");
                bound.id
            }
            None => match self.claim_first_available(order_id).await? {
                Some(driver_id) => driver_id,
                None => {
                    info!(%order_id, "No driver available; order stays ready");
                    return Ok(AssignOutcome::NoDriverAvailable);
                }
            },
        };

        let at = Utc::now();
        match self.orders.assign_driver(order_id, driver_id, at).await {
            Ok(order) => {
                let picked_at = order.picked_at.unwrap_or(at);
                info!(%order_id, %driver_id, "Driver assigned");
                self.notifier
                    .notify(StatusChanged::now(order_id, OrderStatus::OnTheWay));
                Ok(AssignOutcome::Assigned {
                    driver_id,
                    picked_at,
                })
            }
            Err(e) => {
                self.roll_back_claim(order_id, driver_id, &e).await;
                Err(e)
            }
        }
    }

    /// Releases `driver_id` after a failed assignment, unless a concurrent attempt bound
    /// the order to the same driver.
    async fn roll_back_claim(&self, order_id: OrderId, driver_id: DriverId, cause: &OrderError) {
        if let Ok(order) = self.orders.order(order_id).await {
            if order.driver_id == Some(driver_id) {
                debug!(%order_id, %driver_id, "Order went out with this driver; keeping it bound");
                return;
            }
        }
        warn!(%order_id, %driver_id, error = %cause, "Assignment failed; releasing driver");
        if let Err(release_err) = self.drivers.release(driver_id, order_id).await {
            error!(%order_id, %driver_id, error = %release_err, "Rollback of driver claim failed");
        }
    }

    /// Claims candidates in id order until one accepts.
    async fn claim_first_available(
        &self,
        order_id: OrderId,
    ) -> Result<Option<DriverId>, OrderError> {
        for candidate in self.drivers.available_drivers().await? {
            match self.drivers.claim(candidate.id, order_id).await {
                Ok(_) => return Ok(Some(candidate.id)),
                // lost the race for this one, or it was removed
                Err(DirectoryError::DriverUnavailable(_) | DirectoryError::DriverNotFound(_)) => {
                    debug!(driver_id = %candidate.id, "Candidate taken");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(None)
    }

    /// On the way -> Delivered, then frees the driver.
    ///
    /// If freeing the driver fails the order stays delivered and the error is returned.
    #[instrument(skip(self))]
    pub async fn deliver(&self, order_id: OrderId) -> Result<Order, OrderError> {
        let this = self.clone();
        detached(async move {
            let order = this.orders.mark_delivered(order_id).await?;
            this.notifier
                .notify(StatusChanged::now(order_id, OrderStatus::Delivered));
            if let Err(e) = this.release_driver(&order).await {
                error!(%order_id, error = %e, "Delivered, but the driver was not released");
                return Err(e);
            }
            Ok(order)
        })
        .await
    }

    /// Frees the driver of a delivered order.
    async fn release_driver(&self, order: &Order) -> Result<(), OrderError> {
        let Some(driver_id) = order.driver_id else {
            return Ok(());
        };
        self.drivers.release(driver_id, order.id).await?;
        debug!(%driver_id, "Driver released");
        Ok(())
    }
}

/// Runs `work` on its own task so it completes even if the caller stops waiting.
async fn detached<T, F>(work: F) -> Result<T, OrderError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, OrderError>> + Send + 'static,
{
    match tokio::spawn(work.in_current_span()).await {
        Ok(result) => result,
        Err(e) => Err(OrderError::ActorCommunicationError(format!(
            "dispatch task failed: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountRef, CustomerId, Driver, DriverCreate, RestaurantId};
    use crate::notify::TracingNotifier;
    use actor_framework::mock::MockClient;
    use actor_framework::FrameworkError;

    fn order(status: OrderStatus, driver: Option<u32>) -> Order {
        Order {
            id: OrderId(1),
            customer_id: CustomerId(1),
            restaurant_id: RestaurantId(1),
            driver_id: driver.map(DriverId),
            address: "123 Main St".to_string(),
            total: 1300,
            status,
            created_at: Utc::now(),
            picked_at: driver.map(|_| Utc::now()),
            details: Vec::new(),
        }
    }

    fn driver(id: u32, on_duty: bool, current_order: Option<OrderId>) -> Driver {
        let mut d = Driver::new(
            DriverId(id),
            DriverCreate {
                account: AccountRef::new(format!("acct-{id}")),
                avatar: String::new(),
                car_model: "Corolla".to_string(),
                plate_number: format!("PLT-{id}"),
            },
        );
        d.on_duty = on_duty;
        d.current_order = current_order;
        d
    }

    fn assigner(orders: &MockClient<Order>, drivers: &MockClient<Driver>) -> DispatchAssigner {
        DispatchAssigner::new(
            OrderClient::new(orders.client()),
            DriverClient::new(drivers.client()),
            Arc::new(TracingNotifier),
        )
    }

    fn already_on_the_way() -> FrameworkError {
        FrameworkError::EntityError(Box::new(OrderError::InvalidTransition {
            order_id: OrderId(1),
            from: OrderStatus::OnTheWay,
            event: OrderEvent::DriverAssigned,
        }))
    }

    #[tokio::test]
    async fn test_driver_left_bound_to_ready_order_is_reused() {
        let mut orders = MockClient::<Order>::new();
        let mut drivers = MockClient::<Driver>::new();
        orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Ready, None)));
        drivers.expect_list().return_ok(vec![
            driver(1, true, None),
            driver(2, false, Some(OrderId(1))),
        ]);
        let assigned = order(OrderStatus::OnTheWay, Some(2));
        orders.expect_action(OrderId(1)).return_ok(assigned.clone());

        let outcome = assigner(&orders, &drivers).try_assign(OrderId(1)).await.unwrap();

        assert_eq!(
            outcome,
            AssignOutcome::Assigned {
                driver_id: DriverId(2),
                picked_at: assigned.picked_at.unwrap(),
            }
        );
        orders.verify();
        drivers.verify();
    }

    #[tokio::test]
    async fn test_failed_assignment_keeps_driver_the_order_went_out_with() {
        let mut orders = MockClient::<Order>::new();
        let mut drivers = MockClient::<Driver>::new();
        orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Ready, None)));
        drivers.expect_list().return_ok(vec![driver(1, true, None)]);
        drivers.expect_list().return_ok(vec![driver(1, true, None)]);
        drivers
            .expect_action(DriverId(1))
            .return_ok(driver(1, true, Some(OrderId(1))));
        orders.expect_action(OrderId(1)).return_err(already_on_the_way());
        orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::OnTheWay, Some(1))));

        let err = assigner(&orders, &drivers).try_assign(OrderId(1)).await.unwrap_err();

        assert!(matches!(err, OrderError::InvalidTransition { .. }));
        orders.verify();
        drivers.verify();
    }

    #[tokio::test]
    async fn test_failed_assignment_releases_claimed_driver() {
        let mut orders = MockClient::<Order>::new();
        let mut drivers = MockClient::<Driver>::new();
        orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::Ready, None)));
        drivers.expect_list().return_ok(vec![driver(1, true, None)]);
        drivers.expect_list().return_ok(vec![driver(1, true, None)]);
        drivers
            .expect_action(DriverId(1))
            .return_ok(driver(1, true, Some(OrderId(1))));
        orders.expect_action(OrderId(1)).return_err(already_on_the_way());
        orders
            .expect_get(OrderId(1))
            .return_ok(Some(order(OrderStatus::OnTheWay, Some(5))));
        drivers
            .expect_action(DriverId(1))
            .return_ok(driver(1, true, None));

        let err = assigner(&orders, &drivers).try_assign(OrderId(1)).await.unwrap_err();

        assert!(matches!(err, OrderError::InvalidTransition { .. }));
        orders.verify();
        drivers.verify();
    }
}
