//! Kit lifecycle, brand core, and voice endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value as JsonValue};

use crate::error::ApiError;
use crate::handlers::{parse_id, AppState, OwnerId};
use crate::services::brand_service::BrandService;

pub async fn create_kit(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Json(body): Json<JsonValue>,
) -> Result<Json<JsonValue>, ApiError> {
    let request = BrandService::read_create_request(&body)?;
    let record = state.brand.create_kit(&owner, request).await?;
    Ok(Json(json!({ "ok": true, "id": record.id })))
}

pub async fn list_kits(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
) -> Result<Json<JsonValue>, ApiError> {
    let kits = state.brand.list_kits(&owner).await?;
    Ok(Json(json!({ "ok": true, "kits": kits })))
}

pub async fn get_kit(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<String>,
) -> Result<Json<JsonValue>, ApiError> {
    let id = parse_id(&id)?;
    let record = state.brand.get_kit(id, &owner).await?;
    Ok(Json(json!({ "ok": true, "kit": record })))
}

pub async fn patch_kit(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> Result<Json<JsonValue>, ApiError> {
    let id = parse_id(&id)?;
    state.brand.patch_kit(id, &owner, &body).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn delete_kit(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<String>,
) -> Result<Json<JsonValue>, ApiError> {
    let id = parse_id(&id)?;
    state.brand.delete_kit(id, &owner).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn generate_core(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<String>,
) -> Result<Json<JsonValue>, ApiError> {
    let id = parse_id(&id)?;
    state.brand.generate_core(id, &owner).await?;
    Ok(Json(json!({ "ok": true })))
}

pub async fn generate_voice(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<String>,
) -> Result<Json<JsonValue>, ApiError> {
    let id = parse_id(&id)?;
    state.brand.generate_voice(id, &owner).await?;
    Ok(Json(json!({ "ok": true })))
}
