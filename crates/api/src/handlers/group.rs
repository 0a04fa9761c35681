//! Group lifecycle: creation, join (password check), lookup, settings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use groupwatch_db::models::Group;
use groupwatch_db::repositories::GroupRepo;

use crate::auth::password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /api/groups`.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub password: String,
}

/// Request body for `POST /api/groups/{id}/join`.
#[derive(Debug, Deserialize)]
pub struct JoinGroupRequest {
    pub password: String,
}

/// Request body for `PUT /api/groups/{id}/settings`.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub catalog_settings: serde_json::Value,
}

/// Session payload handed to web clients after create/join; carries the
/// URL to install the group's Stremio addon.
#[derive(Debug, Serialize)]
pub struct GroupSession {
    pub group_id: String,
    pub name: String,
    pub addon_url: String,
}

/// Generate a short group id: the first 8 hex chars of a UUID v4.
fn new_group_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..8].to_string()
}

fn session_for(state: &AppState, group: &Group) -> GroupSession {
    GroupSession {
        group_id: group.id.clone(),
        name: group.name.clone(),
        addon_url: format!("{}/{}/manifest.json", state.config.public_url, group.id),
    }
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> AppResult<impl IntoResponse> {
    let name = req.name.trim();
    if name.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Group name and password are required".to_string(),
        ));
    }

    let password_hash = password::hash_password(&req.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let group = GroupRepo::create(&state.pool, &new_group_id(), name, &password_hash).await?;
    tracing::info!(group_id = %group.id, name = %group.name, "Group created");

    Ok((StatusCode::CREATED, Json(session_for(&state, &group))))
}

/// POST /api/groups/{group_id}/join
pub async fn join_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(req): Json<JoinGroupRequest>,
) -> AppResult<Json<GroupSession>> {
    let group = GroupRepo::find_by_id(&state.pool, &group_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group not found: {group_id}")))?;

    let matches = password::verify_password(&req.password, &group.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !matches {
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    tracing::info!(group_id = %group.id, "Group joined");
    Ok(Json(session_for(&state, &group)))
}

/// GET /api/groups/{group_id}
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> AppResult<Json<Group>> {
    let group = GroupRepo::find_by_id(&state.pool, &group_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group not found: {group_id}")))?;
    Ok(Json(group))
}

/// PUT /api/groups/{group_id}/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(req): Json<UpdateSettingsRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if !req.catalog_settings.is_object() {
        return Err(AppError::BadRequest(
            "catalog_settings must be a JSON object".to_string(),
        ));
    }

    let updated =
        GroupRepo::update_catalog_settings(&state.pool, &group_id, &req.catalog_settings).await?;
    if updated == 0 {
        return Err(AppError::NotFound(format!("Group not found: {group_id}")));
    }

    tracing::info!(group_id = %group_id, "Catalog settings updated");
    Ok(Json(serde_json::json!({ "success": true })))
}
