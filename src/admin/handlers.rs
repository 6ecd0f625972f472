use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    admin::dto::{AdminLoginRequest, AdminSessionResponse},
    error::{AppError, Result},
    group::group_models::{GroupDocument, GroupSummary},
    group::group_visibility::Viewer,
    middleware::AdminSession,
    state::AppState,
};

/// Observer login
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Session issued", body = AdminSessionResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Observer access not configured")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let (token, expires_at) = state.admin_service.login(&payload.password)?;

    Ok((StatusCode::OK, Json(AdminSessionResponse { token, expires_at })))
}

/// Observer logout
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    tag = "admin",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    AdminSession(token): AdminSession,
) -> Result<impl IntoResponse> {
    state.admin_service.logout(&token);

    Ok(StatusCode::NO_CONTENT)
}

/// List all groups with their last-modified timestamps
#[utoipa::path(
    get,
    path = "/api/admin/groups",
    tag = "admin",
    responses(
        (status = 200, description = "Groups listed", body = Vec<GroupSummary>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_all_groups(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let groups = state.group_service.list_groups().await?;

    Ok((StatusCode::OK, Json(groups)))
}

/// Get a group document without visibility filtering
#[utoipa::path(
    get,
    path = "/api/admin/groups/{group_id}",
    tag = "admin",
    params(
        ("group_id" = String, Path, description = "Group identifier")
    ),
    responses(
        (status = 200, description = "Raw group document", body = GroupDocument),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Group not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_group_document(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<impl IntoResponse> {
    let document = state
        .group_service
        .get(&group_id, Viewer::Observer)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

    Ok((StatusCode::OK, Json(document)))
}
