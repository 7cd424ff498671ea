//! `ActorEntity` implementation for [`Order`].
//!
//! Placement is split across the two creation hooks: `from_create_params` checks the
//! cart on its own, `on_create` checks it against the directory and the catalog and
//! prices it. Both run before the actor inserts anything, so a rejected cart leaves no
//! trace.

use super::{next_status, OrderAction, OrderError, OrderEvent, OrderUpdate};
use crate::clients::{CustomerClient, MealClient, RestaurantClient};
use crate::model::{is_blank, DriverId, Order, OrderCreate, OrderDetails, OrderId, OrderStatus};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

/// Clients the Order actor reads from while placing an order.
#[derive(Clone)]
pub struct OrderContext {
    pub customers: CustomerClient,
    pub restaurants: RestaurantClient,
    pub meals: MealClient,
}

impl Order {
    /// Moves the order along `event`, or reports why it cannot.
    fn advance(&mut self, event: OrderEvent) -> Result<OrderStatus, OrderError> {
        let to = next_status(self.status, event).ok_or(OrderError::InvalidTransition {
            order_id: self.id,
            from: self.status,
            event,
        })?;
        debug!(order_id = %self.id, from = %self.status, %to, "Transition");
        self.status = to;
        Ok(to)
    }

    fn clear_driver(&mut self, driver_id: DriverId) -> Result<(), OrderError> {
        if self.driver_id != Some(driver_id) {
            return Ok(());
        }
        if !self.is_finished() {
            return Err(OrderError::ReferentialIntegrityViolation(format!(
                "{} is still delivering {}",
                driver_id, self.id
            )));
        }
        self.driver_id = None;
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    /// Cart checks that need nothing but the cart.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.line_items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if is_blank(&params.address) {
            return Err(OrderError::BlankAddress);
        }
        if let Some(item) = params.line_items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::InvalidQuantity {
                meal_id: item.meal_id,
            });
        }

        let details = params
            .line_items
            .iter()
            .zip(1..)
            .map(|(item, line)| OrderDetails {
                order_id: id,
                line,
                meal_id: item.meal_id,
                quantity: item.quantity,
                sub_total: 0,
            })
            .collect();

        Ok(Order {
            id,
            customer_id: params.customer_id,
            restaurant_id: params.restaurant_id,
            driver_id: None,
            address: params.address,
            total: 0,
            status: OrderStatus::Cooking,
            created_at: Utc::now(),
            picked_at: None,
            details,
        })
    }

    /// Resolves the customer, the restaurant and every meal, then freezes the prices.
    ///
    /// The lookups are awaited inside the order actor's loop, so transitions of other
    /// orders queue behind a placement until it finishes.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let customer = ctx
            .customers
            .get(self.customer_id)
            .await?
            .ok_or(OrderError::CustomerNotFound(self.customer_id))?;
        if !customer.can_order() {
            return Err(OrderError::IncompleteCustomerProfile(customer.id));
        }

        ctx.restaurants
            .get(self.restaurant_id)
            .await?
            .ok_or(OrderError::RestaurantNotFound(self.restaurant_id))?;

        let mut sub_totals = Vec::with_capacity(self.details.len());
        for detail in &self.details {
            let mismatch = OrderError::CatalogMismatch {
                restaurant_id: self.restaurant_id,
                meal_id: detail.meal_id,
            };
            let meal = ctx.meals.get(detail.meal_id).await?.ok_or(mismatch.clone())?;
            if meal.restaurant_id != self.restaurant_id {
                return Err(mismatch);
            }
            let sub_total = meal
                .price
                .checked_mul(u64::from(detail.quantity))
                .ok_or(OrderError::TotalOverflow)?;
            sub_totals.push(sub_total);
        }

        let total = sub_totals
            .iter()
            .try_fold(0u64, |acc, s| acc.checked_add(*s))
            .ok_or(OrderError::TotalOverflow)?;

        for (detail, sub_total) in self.details.iter_mut().zip(sub_totals) {
            detail.sub_total = sub_total;
        }
        self.total = total;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match update {}
    }

    /// Order details restrict deletion, and every order has at least one.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(OrderError::ReferentialIntegrityViolation(format!(
            "{} has {} order details",
            self.id,
            self.details.len()
        )))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::KitchenReady => {
                self.advance(OrderEvent::KitchenReady)?;
            }
            OrderAction::AssignDriver { driver_id, at } => {
                self.advance(OrderEvent::DriverAssigned)?;
                self.driver_id = Some(driver_id);
                self.picked_at.get_or_insert(at);
            }
            OrderAction::Delivered => {
                self.advance(OrderEvent::Delivered)?;
            }
            OrderAction::ClearDriver(driver_id) => self.clear_driver(driver_id)?,
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, LineItem, MealId, RestaurantId};
    use actor_framework::mock::create_mock_client;
    use chrono::TimeZone;

    /// Clients nobody answers; transitions never consult them.
    fn idle_context() -> OrderContext {
        OrderContext {
            customers: CustomerClient::new(create_mock_client(1).0),
            restaurants: RestaurantClient::new(create_mock_client(1).0),
            meals: MealClient::new(create_mock_client(1).0),
        }
    }

    fn cart(line_items: Vec<LineItem>) -> OrderCreate {
        OrderCreate {
            customer_id: CustomerId(1),
            restaurant_id: RestaurantId(1),
            address: "123 Main St".to_string(),
            line_items,
        }
    }

    fn cooking_order() -> Order {
        Order::from_create_params(OrderId(1), cart(vec![LineItem::new(MealId(1), 1)])).unwrap()
    }

    #[test]
    fn test_cart_checks() {
        assert_eq!(
            Order::from_create_params(OrderId(1), cart(vec![])).unwrap_err(),
            OrderError::EmptyOrder
        );
        assert_eq!(
            Order::from_create_params(
                OrderId(1),
                cart(vec![LineItem::new(MealId(1), 2), LineItem::new(MealId(2), 0)])
            )
            .unwrap_err(),
            OrderError::InvalidQuantity { meal_id: MealId(2) }
        );

        let mut blank = cart(vec![LineItem::new(MealId(1), 1)]);
        blank.address = "   ".to_string();
        assert_eq!(
            Order::from_create_params(OrderId(1), blank).unwrap_err(),
            OrderError::BlankAddress
        );
    }

    #[test]
    fn test_new_order_starts_cooking_without_driver() {
        let order = Order::from_create_params(
            OrderId(3),
            cart(vec![LineItem::new(MealId(1), 2), LineItem::new(MealId(2), 1)]),
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Cooking);
        assert_eq!(order.driver_id, None);
        assert_eq!(order.picked_at, None);
        let lines: Vec<_> = order.details.iter().map(|d| d.to_string()).collect();
        assert_eq!(lines, ["order_3/1", "order_3/2"]);
    }

    #[test]
    fn test_failed_transition_leaves_order_unchanged() {
        let mut order = cooking_order();
        let before = order.clone();
        let err = order.advance(OrderEvent::Delivered).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidTransition {
                order_id: OrderId(1),
                from: OrderStatus::Cooking,
                event: OrderEvent::Delivered,
            }
        );
        assert_eq!(order, before);
    }

    #[tokio::test]
    async fn test_assign_sets_driver_and_pickup_once() {
        let ctx = idle_context();
        let mut order = cooking_order();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let err = order
            .handle_action(OrderAction::AssignDriver { driver_id: DriverId(7), at }, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
        assert_eq!(order.driver_id, None);

        order.handle_action(OrderAction::KitchenReady, &ctx).await.unwrap();
        let picked = order
            .handle_action(OrderAction::AssignDriver { driver_id: DriverId(7), at }, &ctx)
            .await
            .unwrap();
        assert_eq!(picked.status, OrderStatus::OnTheWay);
        assert_eq!(picked.driver_id, Some(DriverId(7)));
        assert_eq!(picked.picked_at, Some(at));

        let delivered = order.handle_action(OrderAction::Delivered, &ctx).await.unwrap();
        assert_eq!(delivered.picked_at, Some(at));
        assert_eq!(delivered.driver_id, Some(DriverId(7)));
    }

    #[test]
    fn test_clear_driver_only_after_delivery() {
        let mut order = cooking_order();
        order.status = OrderStatus::OnTheWay;
        order.driver_id = Some(DriverId(2));
        assert!(matches!(
            order.clear_driver(DriverId(2)),
            Err(OrderError::ReferentialIntegrityViolation(_))
        ));

        order.status = OrderStatus::Delivered;
        order.clear_driver(DriverId(3)).unwrap();
        assert_eq!(order.driver_id, Some(DriverId(2)));
        order.clear_driver(DriverId(2)).unwrap();
        assert_eq!(order.driver_id, None);
    }
}
