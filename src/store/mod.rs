//! Access to the user, trip, and destination collections.
//!
//! Handlers and services only see [`Repository`]; the in-memory backend is one
//! implementation of it.

pub mod memory;
pub mod seed;

use crate::{
    error::AppError,
    models::{
        trip::{NewTrip, Trip, TripId},
        user::{NewUser, User, UserId, UserPatch},
    },
};

pub use memory::InMemoryStore;

/// Callback applied to a trip inside [`Repository::modify_trip`].
pub type TripEdit<'a> = dyn FnMut(&mut Trip) -> Result<(), AppError> + Send + 'a;

/// Every method is atomic with respect to the others.
pub trait Repository: Send + Sync + 'static {
    /// First user whose username and password both match exactly.
    fn find_user_by_credentials(&self, username: &str, password: &str) -> Option<User>;

    fn list_users(&self) -> Vec<User>;

    fn insert_user(&self, new_user: NewUser) -> User;

    /// Fails with [`AppError::NotFound`] if `id` is unknown.
    fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, AppError>;

    /// All trips in insertion order.
    fn list_trips(&self) -> Vec<Trip>;

    /// Stores a new `pending` trip for `passenger_id`, snapshotting the
    /// passenger's name. Fails with [`AppError::UnknownUser`] if the passenger
    /// does not exist.
    fn insert_trip(&self, passenger_id: UserId, draft: NewTrip) -> Result<Trip, AppError>;

    /// Runs `edit` against a copy of the trip and commits the copy only if
    /// `edit` succeeds.
    fn modify_trip(&self, id: TripId, edit: &mut TripEdit<'_>) -> Result<Trip, AppError>;

    fn list_destinations(&self) -> Vec<String>;

    /// Appends a destination and returns the whole list.
    fn push_destination(&self, name: String) -> Vec<String>;
}
