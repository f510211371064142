use appshelf_core::{LoginOutcome, Navigation};
use appshelf_schema::Session;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/status", get(status))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<LoginOutcome>) {
    let outcome = state.ctx.write().await.login(&req.username, &req.password);
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(outcome))
}

async fn logout(State(state): State<AppState>) -> Json<Navigation> {
    Json(state.ctx.write().await.logout())
}

async fn status(State(state): State<AppState>) -> Json<Session> {
    Json(state.ctx.read().await.session())
}
