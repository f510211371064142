//! Catalog management endpoints. Every handler takes [`AdminSession`], so a
//! logged-out caller gets `401` with a redirect to the login page.

use appshelf_core::{AdminError, DeleteOutcome, ItemForm, Navigation, ADMIN_ITEMS_PATH};
use appshelf_schema::CatalogItem;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{unauthorized, AdminSession};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/items", get(list_items).post(create_item))
        .route("/items/new", get(new_item_form))
        .route(
            "/items/{id}",
            get(edit_item_form).put(update_item).delete(delete_item),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Serialize)]
pub struct UpdateResponse {
    pub updated: bool,
    pub redirect_to: &'static str,
}

fn admin_error(error: AdminError) -> Response {
    match error {
        AdminError::Unauthorized => unauthorized(),
        AdminError::Invalid(errors) => (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response(),
        AdminError::Core(e) => {
            tracing::error!("catalog operation failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn dashboard(_admin: AdminSession, State(state): State<AppState>) -> Response {
    match state.ctx.read().await.dashboard() {
        Some(view) => Json(view).into_response(),
        None => unauthorized(),
    }
}

async fn list_items(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogItem>>, Response> {
    let ctx = state.ctx.read().await;
    let items = ctx.manage_items().map_err(admin_error)?;
    Ok(Json(items.to_vec()))
}

async fn new_item_form(_admin: AdminSession, State(state): State<AppState>) -> Json<Navigation> {
    let path = format!("{ADMIN_ITEMS_PATH}/new");
    Json(state.ctx.write().await.navigate(&path, &Default::default()))
}

async fn edit_item_form(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Navigation> {
    let path = format!("{ADMIN_ITEMS_PATH}/edit/{id}");
    Json(state.ctx.write().await.navigate(&path, &Default::default()))
}

async fn create_item(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(form): Json<ItemForm>,
) -> Result<(StatusCode, Json<CatalogItem>), Response> {
    let item = state
        .ctx
        .write()
        .await
        .create_item(&form)
        .map_err(admin_error)?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ItemForm>,
) -> Result<Json<UpdateResponse>, Response> {
    let updated = state
        .ctx
        .write()
        .await
        .edit_item(&id, &form)
        .map_err(admin_error)?;
    Ok(Json(UpdateResponse {
        updated,
        redirect_to: ADMIN_ITEMS_PATH,
    }))
}

async fn delete_item(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Response, Response> {
    let outcome = state
        .ctx
        .write()
        .await
        .delete_item(&id, params.confirm)
        .map_err(admin_error)?;
    let status = match outcome {
        DeleteOutcome::ConfirmationRequired { .. } => StatusCode::CONFLICT,
        DeleteOutcome::Deleted { .. } | DeleteOutcome::NotFound { .. } => StatusCode::OK,
    };
    Ok((status, Json(outcome)).into_response())
}
