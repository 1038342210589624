//! Shared route registration.
//!
//! Both the production server and the integration tests register the API
//! surface through this function so the two can never drift apart.

use actix_web::web;

use crate::inbound::http::{posts, users};

/// Register every API route on the given service config.
///
/// Expects an [`HttpState`](crate::inbound::http::state::HttpState) to be
/// attached as app data by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(users::update_user_settings)
        .service(posts::create_post)
        .service(posts::create_group_post)
        .service(posts::list_group_posts);
}
