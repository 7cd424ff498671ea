use actor_framework::tracing::setup_tracing;
use delivery_core::config::Config;
use delivery_core::dispatch::AssignOutcome;
use delivery_core::error::DeliveryError;
use delivery_core::lifecycle::DeliverySystem;
use delivery_core::model::*;
use delivery_core::notify::TracingNotifier;
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), DeliveryError> {
    // DELIVERY_CONFIG may hold a JSON document; otherwise defaults apply
    let config = match std::env::var("DELIVERY_CONFIG") {
        Ok(json) => Config::from_json(&json)?,
        Err(_) => Config::default(),
    };
    setup_tracing(&config.log_filter);

    info!("Starting delivery core demo");
    let system = DeliverySystem::with_config(&config, Arc::new(TracingNotifier))?;

    let (restaurant_id, meal_a, meal_b) = async {
        let restaurant_id = system
            .register_restaurant(RestaurantCreate {
                account: AccountRef::new("acct-restaurant-1"),
                name: "Casa Verde".to_string(),
                phone: "555-0100".to_string(),
                address: "1 Market St".to_string(),
                logo: "logos/casa-verde.png".to_string(),
            })
            .await?;
        let meal_a = system
            .add_meal(MealCreate {
                restaurant_id,
                name: "Burrito".to_string(),
                short_description: "Rice, beans, salsa".to_string(),
                image: "meals/burrito.png".to_string(),
                price: 500,
            })
            .await?;
        let meal_b = system
            .add_meal(MealCreate {
                restaurant_id,
                name: "Horchata".to_string(),
                short_description: "Cinnamon rice drink".to_string(),
                image: "meals/horchata.png".to_string(),
                price: 300,
            })
            .await?;
        Ok::<_, DeliveryError>((restaurant_id, meal_a, meal_b))
    }
    .instrument(tracing::info_span!("catalog_setup"))
    .await?;

    let customer_id = system
        .register_customer(CustomerCreate {
            account: AccountRef::new("acct-customer-1"),
            avatar: String::new(),
            phone: Some("555-0199".to_string()),
            address: Some("123 Main St".to_string()),
        })
        .await?;
    let driver_id = system
        .register_driver(DriverCreate {
            account: AccountRef::new("acct-driver-1"),
            avatar: String::new(),
            car_model: "Corolla".to_string(),
            plate_number: "DLV-001".to_string(),
        })
        .await?;

    let span = tracing::info_span!("order_processing");
    async {
        let placed = system
            .place_order(OrderCreate {
                customer_id,
                restaurant_id,
                address: "123 Main St".to_string(),
                line_items: vec![LineItem::new(meal_a, 2), LineItem::new(meal_b, 1)],
            })
            .await?;
        info!(order_id = %placed.order_id, total = placed.total, "Order placed");

        // nobody is on duty yet
        let outcome = system.mark_kitchen_ready(placed.order_id).await?;
        info!(?outcome, "Kitchen ready");

        system.register_driver_availability(driver_id, true).await?;
        for (order_id, outcome) in system.dispatch_ready_orders().await? {
            if let AssignOutcome::Assigned { driver_id, picked_at } = outcome {
                info!(%order_id, %driver_id, %picked_at, "Picked up");
            }
        }

        let delivered = system.mark_delivered(placed.order_id).await?;
        info!(order_id = %delivered.id, status = %delivered.status, "Order finished");
        Ok::<_, DeliveryError>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
