use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::{
    config::DriverStatusPolicy,
    error::AppError,
    models::{
        decode_body,
        trip::{NewTrip, Trip, TripId, TripPatch, TripStatus},
        user::{User, UserRole},
    },
    store::Repository,
};

/// Roles allowed to request a trip.
pub const CREATOR_ROLES: &[UserRole] = &[UserRole::Passenger, UserRole::Dispatcher];
pub const CREATE_FORBIDDEN: &str = "only passengers and dispatchers can create trips";

/// Trip creation, role-scoped listing and the per-role update rules.
#[derive(Clone)]
pub struct TripService {
    store: Arc<dyn Repository>,
    driver_status: DriverStatusPolicy,
}

impl TripService {
    pub fn new(store: Arc<dyn Repository>, driver_status: DriverStatusPolicy) -> Self {
        Self {
            store,
            driver_status,
        }
    }

    pub fn list_for(&self, caller: &User) -> Vec<Trip> {
        self.store
            .list_trips()
            .into_iter()
            .filter(|trip| visible_to(trip, caller))
            .collect()
    }

    pub fn create(&self, caller: &User, draft: NewTrip) -> Result<Trip, AppError> {
        caller.require_role(CREATOR_ROLES, CREATE_FORBIDDEN)?;
        let passenger_id = draft.effective_passenger(caller.id);
        let trip = self.store.insert_trip(passenger_id, draft)?;
        info!(
            trip_id = trip.id,
            passenger_id,
            created_by = caller.id,
            "trip created"
        );
        Ok(trip)
    }

    pub fn update(&self, caller: &User, id: TripId, patch: &TripPatch) -> Result<Trip, AppError> {
        self.modify(caller, id, || Ok(patch.clone()))
    }

    /// Like [`TripService::update`], but `body` is only decoded once the trip
    /// exists and the caller may change it, so unknown trips and foreign
    /// callers get 404/403 whatever they sent.
    pub fn update_from_body(
        &self,
        caller: &User,
        id: TripId,
        body: &Value,
    ) -> Result<Trip, AppError> {
        self.modify(caller, id, || decode_body(body))
    }

    fn modify<F>(&self, caller: &User, id: TripId, mut patch: F) -> Result<Trip, AppError>
    where
        F: FnMut() -> Result<TripPatch, AppError> + Send,
    {
        let policy = self.driver_status;
        let trip = self.store.modify_trip(id, &mut |trip: &mut Trip| {
            let scope = UpdateScope::for_caller(trip, caller)?;
            scope.apply(trip, &patch()?, policy)
        })?;
        info!(
            trip_id = trip.id,
            caller_id = caller.id,
            role = %caller.role,
            status = %trip.status,
            "trip updated"
        );
        Ok(trip)
    }
}

pub fn visible_to(trip: &Trip, caller: &User) -> bool {
    match caller.role {
        UserRole::Driver => trip.driver_id == Some(caller.id),
        UserRole::Passenger => trip.passenger_id == caller.id,
        UserRole::Dispatcher => true,
    }
}

/// What a caller may change on one particular trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScope {
    /// Dispatchers overwrite any supplied field.
    AnyField,
    /// The trip's own passenger may file a delay reason, which also forces
    /// the status to `delayed`.
    DelayReason,
    /// The trip's assigned driver may change the status.
    Status,
}

impl UpdateScope {
    pub fn for_caller(trip: &Trip, caller: &User) -> Result<Self, AppError> {
        match caller.role {
            UserRole::Dispatcher => Ok(Self::AnyField),
            UserRole::Passenger if trip.passenger_id == caller.id => Ok(Self::DelayReason),
            UserRole::Driver if trip.driver_id == Some(caller.id) => Ok(Self::Status),
            _ => Err(AppError::Forbidden("not allowed to modify this trip")),
        }
    }

    /// Applies the part of `patch` covered by this scope. Empty values count
    /// as not supplied.
    pub fn apply(
        self,
        trip: &mut Trip,
        patch: &TripPatch,
        driver_status: DriverStatusPolicy,
    ) -> Result<(), AppError> {
        match self {
            Self::AnyField => patch.merge_into(trip),
            Self::DelayReason => {
                if let Some(reason) = patch.delay_reason_text() {
                    trip.delay_reason = Some(reason.to_string());
                    trip.status = TripStatus::delayed();
                }
            }
            Self::Status => {
                if let Some(status) = patch.status_text() {
                    check_driver_status(status, driver_status)?;
                    trip.status = TripStatus::new(status);
                }
            }
        }
        Ok(())
    }
}

fn check_driver_status(status: &str, policy: DriverStatusPolicy) -> Result<(), AppError> {
    match policy {
        DriverStatusPolicy::Permissive => Ok(()),
        DriverStatusPolicy::ForwardOnly
            if status == TripStatus::IN_PROGRESS || status == TripStatus::COMPLETED =>
        {
            Ok(())
        }
        DriverStatusPolicy::ForwardOnly => Err(AppError::BadRequest(format!(
            "drivers may only set status to {} or {}, got {status}",
            TripStatus::IN_PROGRESS,
            TripStatus::COMPLETED
        ))),
    }
}
