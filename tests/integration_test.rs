mod common;

use common::*;
use delivery_core::catalog_actor::CatalogError;
use delivery_core::config::Config;
use delivery_core::dispatch::AssignOutcome;
use delivery_core::error::DeliveryError;
use delivery_core::lifecycle::DeliverySystem;
use delivery_core::model::*;
use delivery_core::notify::ChannelNotifier;
use delivery_core::order_actor::{OrderError, OrderEvent};
use std::sync::Arc;

#[tokio::test]
async fn test_order_total_matches_its_lines() {
    let system = DeliverySystem::new();
    let restaurant_id = restaurant(&system, "R").await;
    let meal_a = meal(&system, restaurant_id, 500).await;
    let meal_b = meal(&system, restaurant_id, 300).await;
    let customer_id = customer(&system).await;

    let placed = system
        .place_order(cart(
            customer_id,
            restaurant_id,
            vec![LineItem::new(meal_a, 2), LineItem::new(meal_b, 1)],
        ))
        .await
        .unwrap();
    assert_eq!(placed.total, 1300);

    let order = system.order(placed.order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Cooking);
    assert_eq!(order.details.len(), 2);
    assert_eq!(order.details[0].sub_total, 1000);
    assert_eq!(order.details[1].sub_total, 300);

    // later price changes do not reach placed orders
    system
        .update_meal(
            meal_a,
            MealUpdate {
                price: Some(650),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(system.meal_price(meal_a).await.unwrap(), 650);
    let order = system.order(placed.order_id).await.unwrap();
    assert_eq!(order.total, 1300);
    assert_eq!(order.details_total(), order.total);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ready_order_waits_for_a_driver() {
    let system = DeliverySystem::new();
    let (restaurant_id, meal_id, customer_id) = storefront(&system, 500).await;
    let driver_x = system
        .register_driver(DriverCreate {
            account: AccountRef::new("acct-x"),
            avatar: String::new(),
            car_model: "Civic".to_string(),
            plate_number: "X-1".to_string(),
        })
        .await
        .unwrap();

    let placed = system
        .place_order(cart(customer_id, restaurant_id, vec![LineItem::new(meal_id, 1)]))
        .await
        .unwrap();

    let outcome = system.mark_kitchen_ready(placed.order_id).await.unwrap();
    assert_eq!(outcome, AssignOutcome::NoDriverAvailable);
    let order = system.order(placed.order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Ready);
    assert_eq!(order.driver_id, None);
    assert_eq!(order.picked_at, None);

    system.register_driver_availability(driver_x, true).await.unwrap();
    let outcome = system.try_assign(placed.order_id).await.unwrap();
    assert_eq!(outcome.driver_id(), Some(driver_x));

    let order = system.order(placed.order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::OnTheWay);
    assert_eq!(order.driver_id, Some(driver_x));
    assert!(order.picked_at.is_some());
    assert_eq!(
        system.current_order_for_driver(driver_x).await.unwrap().map(|o| o.id),
        Some(placed.order_id)
    );
    assert!(system.available_drivers().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delivered_before_cooking_finishes_is_rejected() {
    let system = DeliverySystem::new();
    let (restaurant_id, meal_id, customer_id) = storefront(&system, 500).await;
    let placed = system
        .place_order(cart(customer_id, restaurant_id, vec![LineItem::new(meal_id, 1)]))
        .await
        .unwrap();

    let err = system.mark_delivered(placed.order_id).await.unwrap_err();
    assert_eq!(
        err,
        DeliveryError::Order(OrderError::InvalidTransition {
            order_id: placed.order_id,
            from: OrderStatus::Cooking,
            event: OrderEvent::Delivered,
        })
    );
    assert_eq!(
        system.order(placed.order_id).await.unwrap().status,
        OrderStatus::Cooking
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_full_lifecycle_notifies_each_status_once() {
    let (notifier, mut changes) = ChannelNotifier::new(16);
    let system = DeliverySystem::with_config(&Config::default(), Arc::new(notifier)).unwrap();
    let (restaurant_id, meal_id, customer_id) = storefront(&system, 500).await;
    let driver_id = driver_on_duty(&system, "D-1").await;

    let placed = system
        .place_order(cart(customer_id, restaurant_id, vec![LineItem::new(meal_id, 3)]))
        .await
        .unwrap();
    let outcome = system.mark_kitchen_ready(placed.order_id).await.unwrap();
    let AssignOutcome::Assigned { picked_at, .. } = outcome else {
        panic!("expected an assignment, got {outcome:?}");
    };

    let delivered = system.mark_delivered(placed.order_id).await.unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(delivered.driver_id, Some(driver_id));
    assert_eq!(delivered.picked_at, Some(picked_at));

    // driver is free again and keeps its duty flag
    let driver = system.driver(driver_id).await.unwrap().unwrap();
    assert!(driver.is_available());
    assert_eq!(system.current_order_for_driver(driver_id).await.unwrap(), None);

    // placement is silent
    let mut seen = Vec::new();
    while let Ok(change) = changes.try_recv() {
        assert_eq!(change.order_id, placed.order_id);
        seen.push(change.status);
    }
    assert_eq!(
        seen,
        [OrderStatus::Ready, OrderStatus::OnTheWay, OrderStatus::Delivered]
    );

    // replays change nothing
    assert!(system.mark_delivered(placed.order_id).await.is_err());
    assert!(system.mark_kitchen_ready(placed.order_id).await.is_err());
    assert!(changes.try_recv().is_err());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_referenced_meal_is_restricted_and_idle_restaurant_cascades() {
    let system = DeliverySystem::new();
    let (busy_restaurant, ordered_meal, customer_id) = storefront(&system, 500).await;
    system
        .place_order(cart(
            customer_id,
            busy_restaurant,
            vec![LineItem::new(ordered_meal, 1)],
        ))
        .await
        .unwrap();

    let err = system.delete_meal(ordered_meal).await.unwrap_err();
    assert!(matches!(
        err,
        DeliveryError::ReferentialIntegrityViolation { entity: "meal", .. }
    ));
    assert!(system.meal_price(ordered_meal).await.is_ok());
    assert!(matches!(
        system.delete_restaurant(busy_restaurant).await,
        Err(DeliveryError::ReferentialIntegrityViolation { entity: "restaurant", .. })
    ));

    let idle_restaurant = restaurant(&system, "Idle").await;
    let idle_meal = meal(&system, idle_restaurant, 800).await;
    system.delete_restaurant(idle_restaurant).await.unwrap();
    assert_eq!(system.restaurant(idle_restaurant).await.unwrap(), None);
    assert_eq!(
        system.meal_price(idle_meal).await.unwrap_err(),
        DeliveryError::Catalog(CatalogError::MealNotFound(idle_meal))
    );
    assert!(system.menu(idle_restaurant).await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_customer_and_order_deletes() {
    let system = DeliverySystem::new();
    let (restaurant_id, meal_id, customer_id) = storefront(&system, 500).await;
    let placed = system
        .place_order(cart(customer_id, restaurant_id, vec![LineItem::new(meal_id, 2)]))
        .await
        .unwrap();

    assert!(matches!(
        system.delete_customer(customer_id).await,
        Err(DeliveryError::ReferentialIntegrityViolation { entity: "customer", .. })
    ));
    let err = system.delete_order(placed.order_id).await.unwrap_err();
    assert_eq!(
        err,
        DeliveryError::ReferentialIntegrityViolation {
            entity: "order",
            id: placed.order_id.to_string(),
            dependents: "1 order detail".to_string(),
        }
    );

    let newcomer = system
        .register_customer(CustomerCreate {
            account: AccountRef::new("acct-new"),
            avatar: String::new(),
            phone: None,
            address: None,
        })
        .await
        .unwrap();
    system.delete_customer(newcomer).await.unwrap();
    assert_eq!(system.customer(newcomer).await.unwrap(), None);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_driver_delete_is_restricted_while_delivering() {
    let system = DeliverySystem::new();
    let (restaurant_id, meal_id, customer_id) = storefront(&system, 500).await;
    let driver_id = driver_on_duty(&system, "D-9").await;
    let placed = system
        .place_order(cart(customer_id, restaurant_id, vec![LineItem::new(meal_id, 1)]))
        .await
        .unwrap();
    system.mark_kitchen_ready(placed.order_id).await.unwrap();

    let err = system.delete_driver(driver_id).await.unwrap_err();
    assert!(matches!(
        err,
        DeliveryError::ReferentialIntegrityViolation { entity: "driver", .. }
    ));
    assert!(system.driver(driver_id).await.unwrap().is_some());

    system.mark_delivered(placed.order_id).await.unwrap();
    system.delete_driver(driver_id).await.unwrap();
    assert_eq!(system.driver(driver_id).await.unwrap(), None);

    let order = system.order(placed.order_id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);
    assert_eq!(order.driver_id, None);
    assert!(order.picked_at.is_some());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_placement_needs_a_complete_profile_and_known_restaurant() {
    let system = DeliverySystem::new();
    let (restaurant_id, meal_id, _) = storefront(&system, 500).await;
    let customer_id = system
        .register_customer(CustomerCreate {
            account: AccountRef::new("acct-bare"),
            avatar: String::new(),
            phone: None,
            address: None,
        })
        .await
        .unwrap();

    let err = system
        .place_order(cart(customer_id, restaurant_id, vec![LineItem::new(meal_id, 1)]))
        .await
        .unwrap_err();
    assert_eq!(
        err.as_order_error(),
        Some(&OrderError::IncompleteCustomerProfile(customer_id))
    );

    system
        .update_customer(
            customer_id,
            CustomerUpdate {
                phone: Some("555-0123".to_string()),
                address: Some("8 Oak Ave".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(system
        .place_order(cart(customer_id, restaurant_id, vec![LineItem::new(meal_id, 1)]))
        .await
        .is_ok());

    let err = system
        .place_order(cart(customer_id, RestaurantId(404), vec![LineItem::new(meal_id, 1)]))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DeliveryError::Order(OrderError::RestaurantNotFound(RestaurantId(404)))
    );

    let err = system
        .add_meal(MealCreate {
            restaurant_id: RestaurantId(404),
            name: "Ghost".to_string(),
            short_description: String::new(),
            image: String::new(),
            price: 100,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DeliveryError::Catalog(CatalogError::RestaurantNotFound(RestaurantId(404)))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_sweep_assigns_oldest_ready_orders_first() {
    let system = DeliverySystem::new();
    let (restaurant_id, meal_id, customer_id) = storefront(&system, 500).await;

    let mut order_ids = Vec::new();
    for _ in 0..3 {
        let placed = system
            .place_order(cart(customer_id, restaurant_id, vec![LineItem::new(meal_id, 1)]))
            .await
            .unwrap();
        system.mark_kitchen_ready(placed.order_id).await.unwrap();
        order_ids.push(placed.order_id);
    }

    let first = driver_on_duty(&system, "D-1").await;
    let second = driver_on_duty(&system, "D-2").await;

    let outcomes = system.dispatch_ready_orders().await.unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], (order_ids[0], outcomes[0].1));
    assert_eq!(outcomes[0].1.driver_id(), Some(first));
    assert_eq!(outcomes[1].1.driver_id(), Some(second));
    assert_eq!(outcomes[2], (order_ids[2], AssignOutcome::NoDriverAvailable));

    let ready: Vec<_> = system
        .ready_orders()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ready, [order_ids[2]]);
    assert_eq!(system.orders_for_customer(customer_id).await.unwrap().len(), 3);
    assert_eq!(system.orders_for_restaurant(restaurant_id).await.unwrap().len(), 3);
    assert_eq!(system.orders_for_driver(first).await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_profile_updates_and_config() {
    let system = DeliverySystem::with_config(
        &Config::from_json(r#"{"channel_capacity": 4}"#).unwrap(),
        Arc::new(delivery_core::notify::TracingNotifier),
    )
    .unwrap();
    let restaurant_id = restaurant(&system, "Old Name").await;
    let renamed = system
        .update_restaurant(
            restaurant_id,
            RestaurantUpdate {
                name: Some("New Name".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.to_string(), "New Name");

    let driver_id = driver_on_duty(&system, "D-7").await;
    let moved = system
        .update_driver_location(driver_id, "5th and Pine")
        .await
        .unwrap();
    assert_eq!(moved.location, "5th and Pine");
    let updated = system
        .update_driver(
            driver_id,
            DriverUpdate {
                plate_number: Some("D-8".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.plate_number, "D-8");
    assert!(updated.on_duty);

    assert!(matches!(
        DeliverySystem::with_config(
            &Config {
                channel_capacity: 0,
                ..Config::default()
            },
            Arc::new(delivery_core::notify::TracingNotifier),
        ),
        Err(DeliveryError::InvalidConfig(_))
    ));

    system.shutdown().await.unwrap();
}
