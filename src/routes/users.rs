use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{
        decode_body,
        user::{NewUser, User, UserId, UserPatch},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", put(update_user))
}

async fn list_users(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<User>>, AppError> {
    current.require_dispatcher()?;
    Ok(Json(state.store.list_users()))
}

async fn create_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let dispatcher = current.require_dispatcher()?;
    let new_user: NewUser = decode_body(&body)?;
    let user = state.store.insert_user(new_user);
    info!(user_id = user.id, role = %user.role, created_by = dispatcher.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(user_id): Path<UserId>,
    Json(body): Json<Value>,
) -> Result<Json<User>, AppError> {
    let dispatcher = current.require_dispatcher()?;
    let patch: UserPatch = decode_body(&body)?;
    let user = state.store.update_user(user_id, patch)?;
    info!(user_id = user.id, updated_by = dispatcher.id, "user updated");
    Ok(Json(user))
}
