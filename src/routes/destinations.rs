use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::{auth::CurrentUser, error::AppError, models::decode_body, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/destinations", get(list_destinations).post(add_destination))
}

async fn list_destinations(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Json<Vec<String>> {
    Json(state.store.list_destinations())
}

#[derive(Deserialize)]
struct DestinationForm {
    name: String,
}

async fn add_destination(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Vec<String>>), AppError> {
    current.require_dispatcher()?;
    let form: DestinationForm = decode_body(&body)?;
    info!(destination = %form.name, "destination added");
    let all = state.store.push_destination(form.name);
    Ok((StatusCode::CREATED, Json(all)))
}
