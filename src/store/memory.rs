use parking_lot::RwLock;

use super::{Repository, TripEdit};
use crate::{
    error::AppError,
    models::{
        trip::{NewTrip, Trip, TripId},
        user::{NewUser, User, UserId, UserPatch},
    },
};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    trips: Vec<Trip>,
    destinations: Vec<String>,
}

/// Process-local store. Ids are assigned as `len + 1`; nothing is ever
/// removed, so they stay unique.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destinations<I, S>(destinations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        store
            .inner
            .write()
            .destinations
            .extend(destinations.into_iter().map(Into::into));
        store
    }
}

fn next_id(len: usize) -> u64 {
    len as u64 + 1
}

impl Repository for InMemoryStore {
    fn find_user_by_credentials(&self, username: &str, password: &str) -> Option<User> {
        self.inner
            .read()
            .users
            .iter()
            .find(|user| user.has_credentials(username, password))
            .cloned()
    }

    fn list_users(&self) -> Vec<User> {
        self.inner.read().users.clone()
    }

    fn insert_user(&self, new_user: NewUser) -> User {
        let mut inner = self.inner.write();
        let user = new_user.into_user(next_id(inner.users.len()));
        inner.users.push(user.clone());
        user
    }

    fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, AppError> {
        let mut inner = self.inner.write();
        let user = inner
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(AppError::NotFound("user"))?;
        patch.apply(user);
        Ok(user.clone())
    }

    fn list_trips(&self) -> Vec<Trip> {
        self.inner.read().trips.clone()
    }

    fn insert_trip(&self, passenger_id: UserId, draft: NewTrip) -> Result<Trip, AppError> {
        let mut inner = self.inner.write();
        let passenger_name = inner
            .users
            .iter()
            .find(|user| user.id == passenger_id)
            .map(|user| user.name.clone())
            .ok_or(AppError::UnknownUser(passenger_id))?;
        let trip = draft.into_trip(next_id(inner.trips.len()), passenger_id, passenger_name);
        inner.trips.push(trip.clone());
        Ok(trip)
    }

    fn modify_trip(&self, id: TripId, edit: &mut TripEdit<'_>) -> Result<Trip, AppError> {
        let mut inner = self.inner.write();
        let slot = inner
            .trips
            .iter_mut()
            .find(|trip| trip.id == id)
            .ok_or(AppError::NotFound("trip"))?;
        let mut draft = slot.clone();
        edit(&mut draft)?;
        *slot = draft.clone();
        Ok(draft)
    }

    fn list_destinations(&self) -> Vec<String> {
        self.inner.read().destinations.clone()
    }

    fn push_destination(&self, name: String) -> Vec<String> {
        let mut inner = self.inner.write();
        inner.destinations.push(name);
        inner.destinations.clone()
    }
}
