//! User API handlers.
//!
//! ```text
//! GET /users
//! GET /users/{id}
//! POST /users {"username":"ada","displayName":"Ada Lovelace"}
//! PATCH /users/{id} {"username":"ada_l"}
//! DELETE /users/{id}
//! PATCH /users/{id}/settings {"smsEnabled":false}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, NewUser, SettingsChanges, User, UserChanges, UserProfile, UserSettings, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::posts::PostResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{map_username_error, parse_user_id};

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: Option<String>,
}

/// Request body for `PATCH /users/{id}`; absent fields are left unchanged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub display_name: Option<String>,
}

/// Request body for `PATCH /users/{id}/settings`; absent fields are left
/// unchanged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserSettingsRequest {
    pub sms_enabled: Option<bool>,
    pub notifications_on: Option<bool>,
}

/// Response payload for a bare user record.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id.get(),
            username: value.username.into(),
            display_name: value.display_name,
            created_at: value.created_at,
        }
    }
}

/// Response payload for a user's settings flags.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingResponse {
    pub sms_enabled: bool,
    pub notifications_on: bool,
}

impl From<UserSettings> for UserSettingResponse {
    fn from(value: UserSettings) -> Self {
        Self {
            sms_enabled: value.sms_enabled,
            notifications_on: value.notifications_on,
        }
    }
}

/// Response payload for a user with settings and posts attached.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    pub id: i32,
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_setting: Option<UserSettingResponse>,
    pub posts: Vec<PostResponse>,
}

impl From<UserProfile> for UserDetailResponse {
    fn from(value: UserProfile) -> Self {
        let UserProfile {
            user,
            settings,
            posts,
        } = value;
        Self {
            id: user.id.get(),
            username: user.username.into(),
            display_name: user.display_name,
            created_at: user.created_at,
            user_setting: settings.map(UserSettingResponse::from),
            posts: posts.into_iter().map(PostResponse::from).collect(),
        }
    }
}

fn parse_create_user(payload: CreateUserRequest) -> Result<NewUser, Error> {
    let username = Username::new(payload.username).map_err(map_username_error)?;
    Ok(NewUser {
        username,
        display_name: payload.display_name,
    })
}

fn parse_update_user(payload: UpdateUserRequest) -> Result<UserChanges, Error> {
    let username = payload
        .username
        .map(Username::new)
        .transpose()
        .map_err(map_username_error)?;
    Ok(UserChanges {
        username,
        display_name: payload.display_name,
    })
}

/// List all users with their settings and posts.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserDetailResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserDetailResponse>>> {
    let profiles = state.users_query.list_users().await?;
    Ok(web::Json(
        profiles.into_iter().map(UserDetailResponse::from).collect(),
    ))
}

/// Fetch one user by id.
///
/// A missing id yields a JSON `null` body with a 200 status, not a 404.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User, or null when absent", body = UserDetailResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserById"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<UserDetailResponse>>> {
    let id = parse_user_id(&path)?;
    let profile = state.users_query.get_user(id).await?;
    Ok(web::Json(profile.map(UserDetailResponse::from)))
}

/// Create a user together with its default settings record.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Created user", body = UserDetailResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<UserDetailResponse>> {
    let new_user = parse_create_user(payload.into_inner())?;
    let profile = state.users_command.create_user(new_user).await?;
    Ok(web::Json(UserDetailResponse::from(profile)))
}

/// Apply a partial update to a user.
#[utoipa::path(
    patch,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request or username taken", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUserById"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let changes = parse_update_user(payload.into_inner())?;
    let user = state.users_command.update_user(id, changes).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Delete a user by id, returning the record's prior state.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted user", body = UserResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUserById"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let user = state.users_command.delete_user(id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Apply a partial update to a user's settings.
#[utoipa::path(
    patch,
    path = "/users/{id}/settings",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserSettingsRequest,
    responses(
        (status = 200, description = "Settings updated"),
        (status = 400, description = "Invalid request or missing settings row", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUserSettings"
)]
#[patch("/users/{id}/settings")]
pub async fn update_user_settings(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserSettingsRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    let UpdateUserSettingsRequest {
        sms_enabled,
        notifications_on,
    } = payload.into_inner();

    state
        .users_command
        .update_user_settings(
            id,
            SettingsChanges {
                sms_enabled,
                notifications_on,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPostRepository, MockUserRepository};
    use crate::domain::user::UserId;
    use crate::domain::{PostService, UserService};
    use actix_web::{App, http::StatusCode, test as actix_test};
    use serde_json::Value;
    use std::sync::Arc;

    fn state_with_user_repo(repo: MockUserRepository) -> web::Data<HttpState> {
        let users = Arc::new(UserService::new(Arc::new(repo)));
        let posts = Arc::new(PostService::new(Arc::new(MockPostRepository::new())));
        web::Data::new(HttpState::new(users.clone(), users, posts.clone(), posts))
    }

    fn make_profile(id: i32, username: &str) -> UserProfile {
        UserProfile {
            user: User {
                id: UserId::new(id),
                username: Username::new(username).expect("valid username"),
                display_name: Some("Ada Lovelace".into()),
                created_at: Utc::now(),
            },
            settings: Some(UserSettings::defaults_for_new_user()),
            posts: Vec::new(),
        }
    }

    fn test_app(
        repo: MockUserRepository,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state_with_user_repo(repo))
            .service(list_users)
            .service(get_user)
            .service(create_user)
            .service(update_user)
            .service(delete_user)
            .service(update_user_settings)
    }

    #[actix_web::test]
    async fn list_users_returns_camel_case_json() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .times(1)
            .return_once(|| Ok(vec![make_profile(1, "ada")]));

        let app = actix_test::init_service(test_app(repo)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users").to_request(),
        )
        .await;
        assert!(response.status().is_success());

        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        let first = &value.as_array().expect("array")[0];
        assert_eq!(
            first.get("displayName").and_then(Value::as_str),
            Some("Ada Lovelace")
        );
        assert!(first.get("display_name").is_none());
        let setting = first.get("userSetting").expect("settings included");
        assert_eq!(setting.get("smsEnabled").and_then(Value::as_bool), Some(true));
        assert_eq!(
            setting.get("notificationsOn").and_then(Value::as_bool),
            Some(false)
        );
    }

    #[actix_web::test]
    async fn get_user_returns_null_for_missing_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let app = actix_test::init_service(test_app(repo)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users/42").to_request(),
        )
        .await;
        assert!(response.status().is_success());

        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert!(value.is_null());
    }

    #[actix_web::test]
    async fn get_user_rejects_non_integer_id() {
        let repo = MockUserRepository::new();

        let app = actix_test::init_service(test_app(repo)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/users/not-a-number")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        assert_eq!(
            value.pointer("/details/code").and_then(Value::as_str),
            Some("invalid_id")
        );
    }

    #[actix_web::test]
    async fn create_user_returns_default_settings() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|new_user| new_user.username.as_ref() == "ada")
            .times(1)
            .return_once(|new_user| Ok(make_profile(1, new_user.username.as_ref())));

        let app = actix_test::init_service(test_app(repo)).await;
        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(&CreateUserRequest {
                username: "ada".into(),
                display_name: None,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(
            value.pointer("/userSetting/smsEnabled").and_then(Value::as_bool),
            Some(true)
        );
        assert_eq!(
            value
                .pointer("/userSetting/notificationsOn")
                .and_then(Value::as_bool),
            Some(false)
        );
    }

    #[actix_web::test]
    async fn create_user_rejects_invalid_username() {
        let repo = MockUserRepository::new();

        let app = actix_test::init_service(test_app(repo)).await;
        let request = actix_test::TestRequest::post()
            .uri("/users")
            .set_json(&CreateUserRequest {
                username: "not a handle!".into(),
                display_name: None,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(
            value.pointer("/details/field").and_then(Value::as_str),
            Some("username")
        );
    }

    #[actix_web::test]
    async fn update_user_reports_conflict_as_bad_request() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(make_profile(1, "ada"))));
        repo.expect_find_by_username().times(1).return_once(|_| {
            Ok(Some(User {
                id: UserId::new(2),
                username: Username::new("grace").expect("valid username"),
                display_name: None,
                created_at: Utc::now(),
            }))
        });

        let app = actix_test::init_service(test_app(repo)).await;
        let request = actix_test::TestRequest::patch()
            .uri("/users/1")
            .set_json(&UpdateUserRequest {
                username: Some("grace".into()),
                display_name: None,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("json");
        assert_eq!(value.get("code").and_then(Value::as_str), Some("conflict"));
    }

    #[actix_web::test]
    async fn delete_user_maps_missing_id_to_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().times(1).return_once(|_| Ok(None));

        let app = actix_test::init_service(test_app(repo)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/users/404")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_settings_returns_empty_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(Some(make_profile(1, "ada"))));
        repo.expect_update_settings()
            .withf(|_, changes| {
                changes.sms_enabled == Some(false) && changes.notifications_on.is_none()
            })
            .times(1)
            .return_once(|_, _| Ok(true));

        let app = actix_test::init_service(test_app(repo)).await;
        let request = actix_test::TestRequest::patch()
            .uri("/users/1/settings")
            .set_json(&UpdateUserSettingsRequest {
                sms_enabled: Some(false),
                notifications_on: None,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert!(response.status().is_success());

        let body = actix_test::read_body(response).await;
        assert!(body.is_empty());
    }
}
