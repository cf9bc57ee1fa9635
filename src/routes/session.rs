use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

use crate::{
    auth::{self, Credentials},
    error::AppError,
    models::user::User,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Returns the full user record, password included. The client keeps it and
/// replays the credentials on every later request.
async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<User>, AppError> {
    let user = auth::authenticate(state.store.as_ref(), &credentials)?;
    info!(user_id = user.id, role = %user.role, "login");
    Ok(Json(user))
}
