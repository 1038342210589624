//! In-memory repository stand-ins for end-to-end API tests.
//!
//! These implement the domain's driven ports over a shared in-process store,
//! mirroring the storage-level behaviour the real adapters rely on: unique
//! usernames, foreign keys on post authorship, and delete cascades.

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::Utc;

use postline::domain::ports::{
    PostRepository, PostRepositoryError, UserRepository, UserRepositoryError,
};
use postline::domain::{
    GroupPost, GroupPostId, GroupPostWithMembers, NewGroupPost, NewPost, NewUser, Post, PostId,
    PostService, SettingsChanges, User, UserChanges, UserId, UserProfile, UserService,
    UserSettings,
};
use postline::inbound::http::state::HttpState;

#[derive(Default)]
struct Store {
    users: Vec<(User, Option<UserSettings>)>,
    posts: Vec<Post>,
    group_posts: Vec<GroupPost>,
    memberships: Vec<(i32, i32)>,
    next_id: i32,
}

impl Store {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn user_exists(&self, id: i32) -> bool {
        self.users.iter().any(|(user, _)| user.id.get() == id)
    }

    fn profile(&self, user: &User, settings: Option<UserSettings>) -> UserProfile {
        UserProfile {
            user: user.clone(),
            settings,
            posts: self
                .posts
                .iter()
                .filter(|post| post.author_id == user.id)
                .cloned()
                .collect(),
        }
    }
}

/// Shared handle to the in-memory store.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

/// In-memory `UserRepository` with storage-constraint emulation.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: SharedStore,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<UserProfile>, UserRepositoryError> {
        let store = self.store.inner.lock().expect("store lock");
        Ok(store
            .users
            .iter()
            .map(|(user, settings)| store.profile(user, *settings))
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserProfile>, UserRepositoryError> {
        let store = self.store.inner.lock().expect("store lock");
        Ok(store
            .users
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, settings)| store.profile(user, *settings)))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let store = self.store.inner.lock().expect("store lock");
        Ok(store
            .users
            .iter()
            .find(|(user, _)| user.username.as_ref() == username)
            .map(|(user, _)| user.clone()))
    }

    async fn create(&self, new_user: NewUser) -> Result<UserProfile, UserRepositoryError> {
        let mut store = self.store.inner.lock().expect("store lock");
        if store
            .users
            .iter()
            .any(|(user, _)| user.username == new_user.username)
        {
            return Err(UserRepositoryError::query("unique constraint violated"));
        }

        let id = store.allocate_id();
        let user = User {
            id: UserId::new(id),
            username: new_user.username,
            display_name: new_user.display_name,
            created_at: Utc::now(),
        };
        let settings = UserSettings::defaults_for_new_user();
        store.users.push((user.clone(), Some(settings)));
        Ok(store.profile(&user, Some(settings)))
    }

    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut store = self.store.inner.lock().expect("store lock");
        if let Some(new_username) = &changes.username {
            if store
                .users
                .iter()
                .any(|(user, _)| user.username == *new_username && user.id != id)
            {
                return Err(UserRepositoryError::query("unique constraint violated"));
            }
        }

        let Some((user, _)) = store.users.iter_mut().find(|(user, _)| user.id == id) else {
            return Ok(None);
        };
        if let Some(username) = changes.username {
            user.username = username;
        }
        if let Some(display_name) = changes.display_name {
            user.display_name = Some(display_name);
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut store = self.store.inner.lock().expect("store lock");
        let Some(position) = store.users.iter().position(|(user, _)| user.id == id) else {
            return Ok(None);
        };
        let (user, _) = store.users.remove(position);
        // Cascade like the real schema.
        store.posts.retain(|post| post.author_id != id);
        store.memberships.retain(|(_, user_id)| *user_id != id.get());
        Ok(Some(user))
    }

    async fn update_settings(
        &self,
        id: UserId,
        changes: SettingsChanges,
    ) -> Result<bool, UserRepositoryError> {
        let mut store = self.store.inner.lock().expect("store lock");
        let Some((_, settings)) = store.users.iter_mut().find(|(user, _)| user.id == id) else {
            return Ok(false);
        };
        let Some(settings) = settings.as_mut() else {
            return Ok(false);
        };
        if let Some(sms_enabled) = changes.sms_enabled {
            settings.sms_enabled = sms_enabled;
        }
        if let Some(notifications_on) = changes.notifications_on {
            settings.notifications_on = notifications_on;
        }
        Ok(true)
    }
}

/// In-memory `PostRepository` with foreign key emulation.
#[derive(Clone)]
pub struct InMemoryPostRepository {
    store: SharedStore,
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(
        &self,
        author: UserId,
        new_post: NewPost,
    ) -> Result<Post, PostRepositoryError> {
        let mut store = self.store.inner.lock().expect("store lock");
        if !store.user_exists(author.get()) {
            return Err(PostRepositoryError::query(
                "foreign key constraint violated",
            ));
        }

        let id = store.allocate_id();
        let post = Post {
            id: PostId::new(id),
            author_id: author,
            title: new_post.title,
            description: new_post.description,
            created_at: Utc::now(),
        };
        store.posts.push(post.clone());
        Ok(post)
    }

    async fn create_group_post(
        &self,
        authors: Vec<UserId>,
        new_post: NewGroupPost,
    ) -> Result<GroupPost, PostRepositoryError> {
        let mut store = self.store.inner.lock().expect("store lock");
        if authors.iter().any(|author| !store.user_exists(author.get())) {
            return Err(PostRepositoryError::query(
                "foreign key constraint violated",
            ));
        }

        let id = store.allocate_id();
        let group = GroupPost {
            id: GroupPostId::new(id),
            title: new_post.title,
            description: new_post.description,
            created_at: Utc::now(),
        };
        store.group_posts.push(group.clone());
        for author in authors {
            store.memberships.push((id, author.get()));
        }
        Ok(group)
    }

    async fn list_group_posts(&self) -> Result<Vec<GroupPostWithMembers>, PostRepositoryError> {
        let store = self.store.inner.lock().expect("store lock");
        Ok(store
            .group_posts
            .iter()
            .map(|group| {
                let members = store
                    .memberships
                    .iter()
                    .filter(|(group_id, _)| *group_id == group.id.get())
                    .filter_map(|(_, user_id)| {
                        store
                            .users
                            .iter()
                            .find(|(user, _)| user.id.get() == *user_id)
                            .map(|(user, _)| user.clone())
                    })
                    .collect();
                GroupPostWithMembers {
                    post: group.clone(),
                    members,
                }
            })
            .collect())
    }
}

/// Build handler state over fresh in-memory repositories.
pub fn in_memory_state() -> web::Data<HttpState> {
    let store = SharedStore::default();
    let users = Arc::new(UserService::new(Arc::new(InMemoryUserRepository {
        store: store.clone(),
    })));
    let posts = Arc::new(PostService::new(Arc::new(InMemoryPostRepository {
        store,
    })));
    web::Data::new(HttpState::new(users.clone(), users, posts.clone(), posts))
}
