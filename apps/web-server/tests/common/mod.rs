//! Shared setup for the HTTP tests: in-memory state with two users, one
//! group and a post by the first user.

#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test;
use yatube_core::Paginator;
use yatube_core::domain::{Group, NewGroup, NewPost, NewUser, Post, User};
use yatube_infra::auth::JwtConfig;
use yatube_shared::dto::{AuthorResponse, GroupResponse, PageResponse, PostResponse};
use yatube_shared::{PageContext, RenderedPage};

use web_server::AppState;

pub struct Seed {
    pub state: AppState,
    pub author: User,
    pub other: User,
    pub group: Group,
    pub post: Post,
}

impl Seed {
    pub async fn new() -> Self {
        let state = AppState::in_memory(Paginator::default(), JwtConfig::default());

        let author = create_user(&state, "auth").await;
        let other = create_user(&state, "not_author").await;
        let group = state
            .groups
            .create(NewGroup {
                title: "Test group".to_string(),
                slug: "test_slug".to_string(),
                description: "Test description".to_string(),
            })
            .await
            .unwrap();
        let post = state
            .posts
            .create(NewPost::new(
                "Test post text".to_string(),
                author.id,
                Some(group.id),
            ))
            .await
            .unwrap();

        Self {
            state,
            author,
            other,
            group,
            post,
        }
    }

    /// Add `count` more posts by the author in the seeded group.
    pub async fn add_posts(&self, count: usize) {
        for i in 0..count {
            self.state
                .posts
                .create(NewPost::new(
                    format!("Extra post {i}"),
                    self.author.id,
                    Some(self.group.id),
                ))
                .await
                .unwrap();
        }
    }

    pub fn token(&self, user: &User) -> String {
        self.state
            .token_service
            .generate_token(user.id, &user.username)
            .unwrap()
    }

    /// `Authorization` header value for `user`.
    pub fn bearer(&self, user: &User) -> (header::HeaderName, String) {
        (header::AUTHORIZATION, format!("Bearer {}", self.token(user)))
    }
}

async fn create_user(state: &AppState, username: &str) -> User {
    state
        .users
        .create(NewUser::new(username.to_string(), "unusable".to_string()))
        .await
        .unwrap()
}

pub fn location<B>(resp: &ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub fn template<B>(resp: &ServiceResponse<B>) -> &str {
    resp.headers()
        .get("X-Template")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn rendered<B: MessageBody>(resp: ServiceResponse<B>) -> RenderedPage {
    test::read_body_json(resp).await
}

/// Unwrap a post list context: (page_obj, group, author, post_count).
pub fn post_list(
    context: PageContext,
) -> (
    PageResponse<PostResponse>,
    Option<GroupResponse>,
    Option<AuthorResponse>,
    Option<u64>,
) {
    match context {
        PageContext::PostList {
            page_obj,
            group,
            author,
            post_count,
        } => (page_obj, group, author, post_count),
        other => panic!("expected a post list context, got {other:?}"),
    }
}
