use tracing::debug;

use super::Repository;
use crate::models::user::{NewUser, UserRole};

pub const DEMO_DESTINATIONS: [&str; 5] = [
    "Workshop No. 1",
    "Workshop No. 2",
    "Office Building",
    "Warehouse",
    "Drilling Site",
];

/// Demo accounts, one per role. All share the password `pass`.
pub fn demo_users() -> Vec<NewUser> {
    let mut driver = NewUser::new("driver1", "pass", UserRole::Driver, "Ivan Petrov");
    driver.car = Some("Toyota Land Cruiser".into());
    driver.car_number = Some("A123BC".into());

    let mut passenger = NewUser::new("passenger1", "pass", UserRole::Passenger, "Alexey Sidorov");
    passenger.department = Some("Geology".into());

    let dispatcher = NewUser::new("dispatcher", "pass", UserRole::Dispatcher, "Maria Ivanova");

    vec![driver, passenger, dispatcher]
}

pub fn load_demo_data(store: &dyn Repository) {
    for user in demo_users() {
        let user = store.insert_user(user);
        debug!(user_id = user.id, role = %user.role, "seeded user");
    }
    for destination in DEMO_DESTINATIONS {
        store.push_destination(destination.to_string());
    }
}
