//! Asset and campaign-intelligence endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value as JsonValue};

use crate::error::ApiError;
use crate::handlers::{parse_id, AppState, OwnerId};

pub async fn post_assets(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> Result<Json<JsonValue>, ApiError> {
    let id = parse_id(&id)?;
    let outcome = state.assets.handle(id, &owner, &body).await?;
    Ok(Json(json!({
        "ok": true,
        "campaignId": outcome.campaign_id,
        "itemId": outcome.item_id,
    })))
}

pub async fn post_intelligence(
    State(state): State<AppState>,
    OwnerId(owner): OwnerId,
    Path((id, campaign_id)): Path<(String, String)>,
    Json(body): Json<JsonValue>,
) -> Result<Json<JsonValue>, ApiError> {
    let id = parse_id(&id)?;
    if campaign_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing params".to_string()));
    }
    state
        .intelligence
        .handle(id, &owner, campaign_id.trim(), &body)
        .await?;
    Ok(Json(json!({ "ok": true })))
}
