//! Domain ports: traits the HTTP layer drives and the adapters implement.

pub mod post_repository;
pub mod posts_command;
pub mod posts_query;
pub mod user_repository;
pub mod users_command;
pub mod users_query;

pub use post_repository::{PostRepository, PostRepositoryError};
pub use posts_command::PostsCommand;
pub use posts_query::PostsQuery;
pub use user_repository::{UserRepository, UserRepositoryError};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;

#[cfg(test)]
pub use post_repository::MockPostRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
