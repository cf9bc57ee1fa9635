use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::UserId;

pub type TripId = u64;

/// Free-form trip status. The well-known values are exposed as constructors,
/// but any string a permitted caller writes is stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripStatus(String);

impl TripStatus {
    pub const PENDING: &'static str = "pending";
    pub const ASSIGNED: &'static str = "assigned";
    pub const IN_PROGRESS: &'static str = "in_progress";
    pub const COMPLETED: &'static str = "completed";
    pub const CANCELED: &'static str = "canceled";
    pub const DELAYED: &'static str = "delayed";

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn pending() -> Self {
        Self::new(Self::PENDING)
    }

    pub fn delayed() -> Self {
        Self::new(Self::DELAYED)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for TripStatus {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub passenger_id: UserId,
    /// Copied from the passenger record when the trip is created.
    pub passenger_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<UserId>,
    pub from: String,
    pub to: String,
    pub scheduled_time: String,
    pub status: TripStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of a trip creation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_id: Option<UserId>,
}

impl NewTrip {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            ..Self::default()
        }
    }

    /// Passenger the trip is for: the explicit id if one was given, else `caller`.
    pub fn effective_passenger(&self, caller: UserId) -> UserId {
        self.passenger_id.filter(|id| *id != 0).unwrap_or(caller)
    }

    pub fn into_trip(self, id: TripId, passenger_id: UserId, passenger_name: String) -> Trip {
        let now = Utc::now();
        let scheduled_time = self
            .scheduled_time
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));
        Trip {
            id,
            passenger_id,
            passenger_name,
            driver_id: None,
            from: self.from,
            to: self.to,
            scheduled_time,
            status: TripStatus::pending(),
            delay_reason: None,
            created_at: now,
        }
    }
}

/// Field changes requested on an existing trip. Which of them take effect
/// depends on the caller; see `services::trips`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub driver_id: Option<Option<UserId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub delay_reason: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TripPatch {
    /// Overwrites every supplied field. The trip id is never touched.
    pub fn merge_into(&self, trip: &mut Trip) {
        if let Some(passenger_id) = self.passenger_id {
            trip.passenger_id = passenger_id;
        }
        if let Some(passenger_name) = &self.passenger_name {
            trip.passenger_name.clone_from(passenger_name);
        }
        if let Some(driver_id) = self.driver_id {
            trip.driver_id = driver_id;
        }
        if let Some(from) = &self.from {
            trip.from.clone_from(from);
        }
        if let Some(to) = &self.to {
            trip.to.clone_from(to);
        }
        if let Some(scheduled_time) = &self.scheduled_time {
            trip.scheduled_time.clone_from(scheduled_time);
        }
        if let Some(status) = &self.status {
            trip.status = TripStatus::new(status.as_str());
        }
        if let Some(delay_reason) = &self.delay_reason {
            trip.delay_reason.clone_from(delay_reason);
        }
        if let Some(created_at) = self.created_at {
            trip.created_at = created_at;
        }
    }

    /// Non-empty delay reason, if one was supplied.
    pub fn delay_reason_text(&self) -> Option<&str> {
        self.delay_reason
            .as_ref()
            .and_then(Option::as_deref)
            .filter(|reason| !reason.is_empty())
    }

    /// Non-empty status, if one was supplied.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_deref().filter(|status| !status.is_empty())
    }
}
