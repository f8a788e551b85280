//! User handlers.
//!
//! Thin delegates to [`crate::services::UserService`]; status codes are the
//! only thing decided here.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::{Pageable, UserId, ValidEmail, ValidatedJson};
use crate::api::AppState;
use crate::domain::{User, UserDto};
use crate::errors::{AppResult, ErrorResponse};
use crate::types::{Created, NoContent, PaginationParams};

/// Create user routes
///
/// The single-segment route serves `{id}` for PUT/DELETE and `{email}` for GET.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route(
            "/:key",
            get(get_user_with_email).put(modify_user).delete(remove_user),
        )
}

/// Create a new user; a duplicate email is rejected
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = UserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation error or duplicate email", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserDto>,
) -> AppResult<Created<User>> {
    tracing::debug!("User creation started: {}", payload);
    let user = state.user_service.create_user(payload).await?;
    tracing::debug!(user_id = ?user.id, "User creation end successfully");

    Ok(Created(user))
}

/// Modify an existing user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UserDto,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation error or duplicate email", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn modify_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidatedJson(payload): ValidatedJson<UserDto>,
) -> AppResult<Json<User>> {
    tracing::debug!("User with id: {} modification started", id);
    let user = state.user_service.modify_user(payload, id).await?;
    tracing::debug!("User with id: {} modification end successfully", id);

    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn remove_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<NoContent> {
    tracing::debug!("User with id: {} deletion started", id);
    state.user_service.remove_user(id).await?;
    tracing::debug!("User with id: {} deletion end successfully", id);

    Ok(NoContent)
}

/// List users one page at a time
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of users", body = Vec<User>),
        (status = 400, description = "Invalid page specification", body = ErrorResponse)
    )
)]
pub async fn get_users(
    State(state): State<AppState>,
    Pageable(page): Pageable,
) -> AppResult<Json<Vec<User>>> {
    tracing::debug!(?page, "Getting user list with pagination started");
    let users = state.user_service.get_user_list(page).await?;
    tracing::debug!(count = users.len(), "Getting user list with pagination end successfully");

    Ok(Json(users))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/api/v1/users/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "User email address")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Invalid email format", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user_with_email(
    State(state): State<AppState>,
    ValidEmail(email): ValidEmail,
) -> AppResult<Json<User>> {
    tracing::debug!("Getting user with email: {} started", email);
    let user = state.user_service.get_user(&email).await?;
    tracing::debug!("Getting user with email: {} end successfully", email);

    Ok(Json(user))
}
