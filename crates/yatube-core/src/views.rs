//! Per-route results: what a page shows, which template shows it, and
//! where a request is sent instead when it may not see the page.

use crate::domain::{Author, Group, Post};
use crate::forms::PostForm;
use crate::pagination::Page;

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

/// Authentication state of a single request. Anonymous when `identity` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    identity: Option<Identity>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    pub fn authenticated(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            identity: Some(Identity {
                user_id,
                username: username.into(),
            }),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Fixed template identifier of each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Index,
    GroupList,
    Profile,
    PostDetail,
    CreatePost,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Index => "posts/index.html",
            Template::GroupList => "posts/group_list.html",
            Template::Profile => "posts/profile.html",
            Template::PostDetail => "posts/post_detail.html",
            Template::CreatePost => "posts/create_post.html",
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post together with the entities it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub post: Post,
    pub author: Author,
    pub group: Option<Group>,
}

/// What a paginated post list is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Index,
    Group(Group),
    Profile { author: Author, post_count: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    PostList {
        listing: Listing,
        page: Page<PostCard>,
    },
    PostDetail {
        post: PostCard,
        author_post_count: u64,
    },
    PostForm {
        form: PostForm,
        /// Id of the post being edited; `None` when creating.
        editing: Option<i64>,
    },
}

impl View {
    pub fn template(&self) -> Template {
        match self {
            View::PostList { listing, .. } => match listing {
                Listing::Index => Template::Index,
                Listing::Group(_) => Template::GroupList,
                Listing::Profile { .. } => Template::Profile,
            },
            View::PostDetail { .. } => Template::PostDetail,
            View::PostForm { .. } => Template::CreatePost,
        }
    }
}

/// Where a request is sent instead of being shown a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    Login,
    PostDetail(i64),
    Profile(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(View),
    Redirect(Redirect),
}
