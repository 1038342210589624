//! Post API handlers.
//!
//! ```text
//! POST /posts {"userId":1,"title":"hello","description":"first post"}
//! POST /posts/group {"userIds":[1,2],"title":"team update","description":"weekly"}
//! GET /posts/group
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, GroupPost, GroupPostWithMembers, NewGroupPost, NewPost, Post, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;

/// Request body for `POST /posts`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Author id; attached server-side to the stored post.
    pub user_id: i32,
    pub title: String,
    pub description: String,
}

/// Request body for `POST /posts/group`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupPostRequest {
    /// Participating user ids; duplicates produce duplicate memberships.
    pub user_ids: Vec<i32>,
    pub title: String,
    pub description: String,
}

/// Response payload for a single-author post.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(value: Post) -> Self {
        Self {
            id: value.id.get(),
            user_id: value.author_id.get(),
            title: value.title,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

/// Response payload for a freshly created group post (no members loaded).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupPostSummaryResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<GroupPost> for GroupPostSummaryResponse {
    fn from(value: GroupPost) -> Self {
        Self {
            id: value.id.get(),
            title: value.title,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

/// Response payload for a group post with memberships resolved to users.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupPostResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub users: Vec<UserResponse>,
}

impl From<GroupPostWithMembers> for GroupPostResponse {
    fn from(value: GroupPostWithMembers) -> Self {
        Self {
            id: value.post.id.get(),
            title: value.post.title,
            description: value.post.description,
            created_at: value.post.created_at,
            users: value.members.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// Create a single-author post.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Created post", body = PostResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<web::Json<PostResponse>> {
    let CreatePostRequest {
        user_id,
        title,
        description,
    } = payload.into_inner();

    let post = state
        .posts_command
        .create_post(UserId::new(user_id), NewPost { title, description })
        .await?;
    Ok(web::Json(PostResponse::from(post)))
}

/// Create a group post with one membership per supplied user id.
#[utoipa::path(
    post,
    path = "/posts/group",
    request_body = CreateGroupPostRequest,
    responses(
        (status = 200, description = "Created group post", body = GroupPostSummaryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createGroupPost"
)]
#[post("/posts/group")]
pub async fn create_group_post(
    state: web::Data<HttpState>,
    payload: web::Json<CreateGroupPostRequest>,
) -> ApiResult<web::Json<GroupPostSummaryResponse>> {
    let CreateGroupPostRequest {
        user_ids,
        title,
        description,
    } = payload.into_inner();

    let authors = user_ids.into_iter().map(UserId::new).collect();
    let group = state
        .posts_command
        .create_group_post(authors, NewGroupPost { title, description })
        .await?;
    Ok(web::Json(GroupPostSummaryResponse::from(group)))
}

/// List all group posts with memberships resolved to full user records.
#[utoipa::path(
    get,
    path = "/posts/group",
    responses(
        (status = 200, description = "Group posts", body = [GroupPostResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listGroupPosts"
)]
#[get("/posts/group")]
pub async fn list_group_posts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<GroupPostResponse>>> {
    let groups = state.posts_query.list_group_posts().await?;
    Ok(web::Json(
        groups.into_iter().map(GroupPostResponse::from).collect(),
    ))
}
