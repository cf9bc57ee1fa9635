use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{
        decode_body,
        trip::{NewTrip, Trip, TripId},
    },
    services::trips::{CREATE_FORBIDDEN, CREATOR_ROLES},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/:id", put(update_trip))
}

async fn list_trips(State(state): State<AppState>, current: CurrentUser) -> Json<Vec<Trip>> {
    Json(state.trips.list_for(current.user()))
}

async fn create_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let caller = current.require_role(CREATOR_ROLES, CREATE_FORBIDDEN)?;
    let draft: NewTrip = decode_body(&body)?;
    let trip = state.trips.create(caller, draft)?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<TripId>,
    Json(body): Json<Value>,
) -> Result<Json<Trip>, AppError> {
    let trip = state
        .trips
        .update_from_body(current.user(), trip_id, &body)?;
    Ok(Json(trip))
}
