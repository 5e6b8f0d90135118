//! HTTP handlers: thin axum wrappers over the service layer.

pub mod assets;
pub mod kits;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::routing::{get, post};
use axum::Router;

use crate::error::ApiError;
use crate::services::{AssetService, BrandService, IntelligenceService, ServiceDeps};

/// Shared application state: one service per route family.
#[derive(Clone)]
pub struct AppState {
    pub brand: BrandService,
    pub assets: AssetService,
    pub intelligence: IntelligenceService,
}

impl AppState {
    pub fn new(deps: ServiceDeps) -> Self {
        Self {
            brand: BrandService::new(deps.clone()),
            assets: AssetService::new(deps.clone()),
            intelligence: IntelligenceService::new(deps),
        }
    }
}

/// Owner identity from the `x-owner-id` header.
///
/// Authentication proper lives in front of this service; the header is
/// the resolved principal. Missing or blank → 401.
pub struct OwnerId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("x-owner-id")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| OwnerId(value.to_string()))
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/kits", post(kits::create_kit).get(kits::list_kits))
        .route(
            "/api/kits/:id",
            get(kits::get_kit).patch(kits::patch_kit).delete(kits::delete_kit),
        )
        .route("/api/kits/:id/core", post(kits::generate_core))
        .route("/api/kits/:id/voice", post(kits::generate_voice))
        .route("/api/kits/:id/assets", post(assets::post_assets))
        .route(
            "/api/kits/:id/campaigns/:campaign_id/intelligence",
            post(assets::post_intelligence),
        )
        .with_state(state)
}

/// Parse a path id, mapping failure to the uniform error body.
pub(crate) fn parse_id(id: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(id).map_err(|_| ApiError::BadRequest("Invalid id".to_string()))
}
