//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::{User, UserDto};
use crate::errors::ErrorResponse;

/// OpenAPI documentation for the User Registry API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registry API",
        version = "0.1.0",
        description = "CRUD operations over users, backed by a relational store",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        user_handler::create_user,
        user_handler::modify_user,
        user_handler::remove_user,
        user_handler::get_users,
        user_handler::get_user_with_email,
    ),
    components(
        schemas(User, UserDto, ErrorResponse)
    ),
    tags(
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;
