use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use shared::protocol::{CreatePermissionRequest, PermissionResponse, UpdatePermissionRequest};

use crate::application::commands::{
    check_permission, check_write_permission, create_permission, delete_permission,
    list_permissions_by_snippet, list_permissions_by_user, update_permission,
};
use crate::domain::entities::Permission;
use crate::domain::value_objects::{SnippetId, UserId};
use crate::infrastructure::driving::http::error::validation_failed;
use crate::infrastructure::AppState;

/// Query string of the two check endpoints; parameters are camelCase on the
/// wire.
#[derive(Deserialize)]
pub struct PermissionCheckQuery {
    #[serde(rename = "snippetId")]
    pub snippet_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

pub fn permission_routes() -> Router<AppState> {
    Router::new()
        .route("/api/permissions", post(create_permission))
        .route("/api/permissions/check", get(check_permission))
        .route("/api/permissions/write-check", get(check_write_permission))
        .route("/api/permissions/snippet/:snippet_id", get(get_permissions_by_snippet))
        .route("/api/permissions/user/:user_id", get(get_permissions_by_user))
        .route(
            "/api/permissions/snippet/:snippet_id/user/:user_id",
            put(update_permission).delete(delete_permission),
        )
}

async fn create_permission(
    State(state): State<AppState>,
    payload: Result<Json<CreatePermissionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return validation_failed(rejection.body_text()),
    };
    tracing::info!(
        "Creating permission for snippet {} and user {}",
        request.snippet_id,
        request.user_id
    );
    match create_permission::execute(&*state.permission_repo, request).await {
        Ok(permission) => {
            (StatusCode::CREATED, Json(to_response(permission))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn check_permission(
    State(state): State<AppState>,
    Query(query): Query<PermissionCheckQuery>,
) -> impl IntoResponse {
    let snippet_id = SnippetId::new(query.snippet_id);
    let user_id = UserId::new(query.user_id);
    match check_permission::execute(&*state.permission_repo, &snippet_id, &user_id).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn check_write_permission(
    State(state): State<AppState>,
    Query(query): Query<PermissionCheckQuery>,
) -> impl IntoResponse {
    let snippet_id = SnippetId::new(query.snippet_id);
    let user_id = UserId::new(query.user_id);
    match check_write_permission::execute(&*state.permission_repo, &snippet_id, &user_id).await {
        Ok(has_write) => (StatusCode::OK, Json(has_write)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn get_permissions_by_snippet(
    State(state): State<AppState>,
    Path(snippet_id): Path<String>,
) -> impl IntoResponse {
    let snippet_id = SnippetId::new(snippet_id);
    match list_permissions_by_snippet::execute(&*state.permission_repo, &snippet_id).await {
        Ok(permissions) => {
            let body: Vec<PermissionResponse> =
                permissions.into_iter().map(to_response).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn get_permissions_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    let user_id = UserId::new(user_id);
    match list_permissions_by_user::execute(&*state.permission_repo, &user_id).await {
        Ok(permissions) => {
            let body: Vec<PermissionResponse> =
                permissions.into_iter().map(to_response).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn update_permission(
    State(state): State<AppState>,
    Path((snippet_id, user_id)): Path<(String, String)>,
    payload: Result<Json<UpdatePermissionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return validation_failed(rejection.body_text()),
    };
    let snippet_id = SnippetId::new(snippet_id);
    let user_id = UserId::new(user_id);
    tracing::info!(
        "Updating permission for snippet {snippet_id} and user {user_id} to role {}",
        request.role.as_str()
    );
    match update_permission::execute(&*state.permission_repo, &snippet_id, &user_id, request.role)
        .await
    {
        Ok(permission) => (StatusCode::OK, Json(to_response(permission))).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn delete_permission(
    State(state): State<AppState>,
    Path((snippet_id, user_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let snippet_id = SnippetId::new(snippet_id);
    let user_id = UserId::new(user_id);
    match delete_permission::execute(&*state.permission_repo, &snippet_id, &user_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

fn to_response(permission: Permission) -> PermissionResponse {
    PermissionResponse {
        id: permission.id.to_string(),
        snippet_id: permission.snippet_id.to_string(),
        user_id: permission.user_id.to_string(),
        role: permission.role,
        created_at: permission.created_at,
        updated_at: permission.updated_at,
    }
}
