pub mod admin;
pub mod auth;
pub mod catalog;

use appshelf_core::{CatalogQuery, LOGIN_PATH};
use appshelf_schema::{CategoryFilter, SortOption};
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Deserialize;

use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(catalog::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}

/// Listing options shared by `/catalog` and `/navigate`.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
}

impl ListingParams {
    pub fn to_query(&self) -> Result<CatalogQuery, Response> {
        let category = match self.category.as_deref() {
            Some(raw) => raw
                .parse::<CategoryFilter>()
                .map_err(|e| bad_request(e.to_string()))?,
            None => CategoryFilter::All,
        };
        let sort = match self.sort.as_deref() {
            Some(raw) => raw
                .parse::<SortOption>()
                .map_err(|e| bad_request(e.to_string()))?,
            None => SortOption::default(),
        };
        Ok(CatalogQuery {
            category,
            search: self.q.clone().unwrap_or_default(),
            sort,
        })
    }
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

pub fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "admin session required",
            "redirect_to": LOGIN_PATH,
        })),
    )
        .into_response()
}

/// Extractor that only succeeds while the administrator is logged in.
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Response;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.ctx.read().await.is_logged_in() {
            Ok(AdminSession)
        } else {
            Err(unauthorized())
        }
    }
}
