//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the domain's driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PostsCommand, PostsQuery, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub posts_query: Arc<dyn PostsQuery>,
    pub posts_command: Arc<dyn PostsCommand>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        users_query: Arc<dyn UsersQuery>,
        users_command: Arc<dyn UsersCommand>,
        posts_query: Arc<dyn PostsQuery>,
        posts_command: Arc<dyn PostsCommand>,
    ) -> Self {
        Self {
            users_query,
            users_command,
            posts_query,
            posts_command,
        }
    }
}
