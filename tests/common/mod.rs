#![allow(dead_code)]

use delivery_core::lifecycle::DeliverySystem;
use delivery_core::model::*;

pub async fn restaurant(system: &DeliverySystem, name: &str) -> RestaurantId {
    system
        .register_restaurant(RestaurantCreate {
            account: AccountRef::new(format!("acct-{name}")),
            name: name.to_string(),
            phone: "555-0100".to_string(),
            address: "1 Market St".to_string(),
            logo: String::new(),
        })
        .await
        .unwrap()
}

pub async fn meal(system: &DeliverySystem, restaurant_id: RestaurantId, price: u64) -> MealId {
    system
        .add_meal(MealCreate {
            restaurant_id,
            name: format!("Meal at {price}"),
            short_description: String::new(),
            image: String::new(),
            price,
        })
        .await
        .unwrap()
}

pub async fn customer(system: &DeliverySystem) -> CustomerId {
    system
        .register_customer(CustomerCreate {
            account: AccountRef::new("acct-customer"),
            avatar: String::new(),
            phone: Some("555-0199".to_string()),
            address: Some("123 Main St".to_string()),
        })
        .await
        .unwrap()
}

/// Registers a driver and puts it on duty.
pub async fn driver_on_duty(system: &DeliverySystem, plate: &str) -> DriverId {
    let id = system
        .register_driver(DriverCreate {
            account: AccountRef::new(format!("acct-{plate}")),
            avatar: String::new(),
            car_model: "Corolla".to_string(),
            plate_number: plate.to_string(),
        })
        .await
        .unwrap();
    system.register_driver_availability(id, true).await.unwrap();
    id
}

pub fn cart(
    customer_id: CustomerId,
    restaurant_id: RestaurantId,
    line_items: Vec<LineItem>,
) -> OrderCreate {
    OrderCreate {
        customer_id,
        restaurant_id,
        address: "123 Main St".to_string(),
        line_items,
    }
}

/// A restaurant with one meal at `price` and a customer, ready to order.
pub async fn storefront(system: &DeliverySystem, price: u64) -> (RestaurantId, MealId, CustomerId) {
    let restaurant_id = restaurant(system, "Casa Verde").await;
    let meal_id = meal(system, restaurant_id, price).await;
    let customer_id = customer(system).await;
    (restaurant_id, meal_id, customer_id)
}
