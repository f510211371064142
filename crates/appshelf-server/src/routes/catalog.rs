use appshelf_core::{Navigation, View, HOME_PATH};
use appshelf_schema::CatalogItem;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::ListingParams;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigateParams {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(flatten)]
    pub listing: ListingParams,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/navigate", get(navigate))
        .route("/catalog", get(list_catalog))
        .route("/items/{id}", get(get_item))
}

async fn navigate(
    State(state): State<AppState>,
    Query(params): Query<NavigateParams>,
) -> Result<Json<Navigation>, Response> {
    let listing = params.listing.to_query()?;
    let path = params.path.as_deref().unwrap_or(HOME_PATH);
    let nav = state.ctx.write().await.navigate(path, &listing);
    Ok(Json(nav))
}

async fn list_catalog(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Vec<CatalogItem>>, Response> {
    let query = params.to_query()?;
    Ok(Json(state.ctx.read().await.browse(&query)))
}

async fn get_item(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.ctx.read().await.item(&id) {
        Some(item) => Json(item.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(View::NotFound {
                back_to: HOME_PATH.to_string(),
            }),
        )
            .into_response(),
    }
}
