//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API. The generated document is served by Swagger UI in debug
//! builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::posts::{
    CreateGroupPostRequest, CreatePostRequest, GroupPostResponse, GroupPostSummaryResponse,
    PostResponse,
};
use crate::inbound::http::users::{
    CreateUserRequest, UpdateUserRequest, UpdateUserSettingsRequest, UserDetailResponse,
    UserResponse, UserSettingResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Postline API",
        description = "CRUD interface for users, user settings, posts, and group posts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::update_user_settings,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::create_group_post,
        crate::inbound::http::posts::list_group_posts,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserRequest,
        UpdateUserRequest,
        UpdateUserSettingsRequest,
        UserResponse,
        UserSettingResponse,
        UserDetailResponse,
        CreatePostRequest,
        CreateGroupPostRequest,
        PostResponse,
        GroupPostResponse,
        GroupPostSummaryResponse,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "posts", description = "Operations related to posts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
