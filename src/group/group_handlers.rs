use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, Result},
    group::group_dto::{DeleteGroupQuery, ViewerQuery},
    group::group_models::GroupDocument,
    group::group_visibility::Viewer,
    state::AppState,
};

/// Create or overwrite a group document
#[utoipa::path(
    put,
    path = "/api/groups/{group_id}",
    tag = "groups",
    params(
        ("group_id" = String, Path, description = "Group identifier")
    ),
    request_body = GroupDocument,
    responses(
        (status = 200, description = "Group stored", body = GroupDocument),
        (status = 400, description = "Validation errors"),
        (status = 500, description = "Storage unavailable")
    )
)]
pub async fn save_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse> {
    let document = state.group_service.save(&group_id, &payload).await?;

    Ok((StatusCode::OK, Json(document)))
}

/// Get a group document, filtered for the requesting member
#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    tag = "groups",
    params(
        ("group_id" = String, Path, description = "Group identifier"),
        ViewerQuery
    ),
    responses(
        (status = 200, description = "Group retrieved", body = GroupDocument),
        (status = 404, description = "Group not found")
    )
)]
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Query(params): Query<ViewerQuery>,
) -> Result<impl IntoResponse> {
    params.validate()?;

    let viewer = match params.member.as_deref() {
        Some(member) if member.trim().is_empty() => {
            return Err(AppError::BadRequest("member cannot be empty".to_string()));
        }
        Some(member) => Viewer::Member(member),
        None => Viewer::Observer,
    };

    let document = state
        .group_service
        .get(&group_id, viewer)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

    Ok((StatusCode::OK, Json(document)))
}

/// Delete a group (creator only)
#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}",
    tag = "groups",
    params(
        ("group_id" = String, Path, description = "Group identifier"),
        DeleteGroupQuery
    ),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 403, description = "Forbidden - Only creator can delete"),
        (status = 404, description = "Group not found")
    )
)]
pub async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Query(params): Query<DeleteGroupQuery>,
) -> Result<impl IntoResponse> {
    params.validate()?;

    state.group_service.delete(&group_id, &params.member).await?;

    Ok(StatusCode::NO_CONTENT)
}
