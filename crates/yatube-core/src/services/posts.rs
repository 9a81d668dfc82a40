use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Author, Group, NewPost, Post, PostFilter};
use crate::error::DomainError;
use crate::forms::{PostForm, PostFormInput};
use crate::pagination::Paginator;
use crate::ports::{GroupRepository, PostRepository, UserRepository};
use crate::views::{AuthContext, Listing, Outcome, PostCard, Redirect, View};

/// Serves the post pages: listings, detail, and the create/edit forms.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    paginator: Paginator,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        paginator: Paginator,
    ) -> Self {
        Self {
            posts,
            groups,
            users,
            paginator,
        }
    }

    /// All posts, newest first.
    pub async fn index(&self, page: Option<&str>) -> Result<View, DomainError> {
        self.post_list(Listing::Index, PostFilter::All, page).await
    }

    /// Posts of the group with `slug`.
    pub async fn group_posts(&self, slug: &str, page: Option<&str>) -> Result<View, DomainError> {
        let group = self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("group", slug))?;

        let filter = PostFilter::Group(group.id);
        self.post_list(Listing::Group(group), filter, page).await
    }

    /// Posts written by `username`.
    pub async fn profile(&self, username: &str, page: Option<&str>) -> Result<View, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let filter = PostFilter::Author(user.id);
        let post_count = self.posts.count(filter).await?;
        let listing = Listing::Profile {
            author: Author::from(&user),
            post_count,
        };
        self.post_list(listing, filter, page).await
    }

    pub async fn post_detail(&self, id: i64) -> Result<View, DomainError> {
        let post = self.find_post(id).await?;
        let author_post_count = self.posts.count(PostFilter::Author(post.author_id)).await?;
        let refs = self.references(std::slice::from_ref(&post)).await?;
        let post = refs.card(post)?;

        Ok(View::PostDetail {
            post,
            author_post_count,
        })
    }

    pub async fn create_form(&self, auth: &AuthContext) -> Result<Outcome, DomainError> {
        if !auth.is_authenticated() {
            return Ok(Outcome::Redirect(Redirect::Login));
        }

        let groups = self.groups.list().await?;
        Ok(Outcome::Render(View::PostForm {
            form: PostForm::blank(&groups),
            editing: None,
        }))
    }

    pub async fn create_post(
        &self,
        auth: &AuthContext,
        input: PostFormInput,
    ) -> Result<Outcome, DomainError> {
        let Some(identity) = auth.identity() else {
            return Ok(Outcome::Redirect(Redirect::Login));
        };

        let groups = self.groups.list().await?;
        let cleaned = match PostForm::bind(input, &groups) {
            Ok(cleaned) => cleaned,
            Err(form) => {
                tracing::debug!(user_id = identity.user_id, "Rejected post form");
                return Ok(Outcome::Render(View::PostForm {
                    form,
                    editing: None,
                }));
            }
        };

        let post = self
            .posts
            .create(NewPost::new(cleaned.text, identity.user_id, cleaned.group_id))
            .await?;
        tracing::info!(post_id = post.id, user_id = identity.user_id, "Post created");

        Ok(Outcome::Redirect(Redirect::Profile(identity.username.clone())))
    }

    pub async fn edit_form(&self, auth: &AuthContext, id: i64) -> Result<Outcome, DomainError> {
        let post = match self.editable_post(auth, id).await? {
            Ok(post) => post,
            Err(redirect) => return Ok(Outcome::Redirect(redirect)),
        };

        let groups = self.groups.list().await?;
        Ok(Outcome::Render(View::PostForm {
            form: PostForm::for_post(&post, &groups),
            editing: Some(post.id),
        }))
    }

    pub async fn edit_post(
        &self,
        auth: &AuthContext,
        id: i64,
        input: PostFormInput,
    ) -> Result<Outcome, DomainError> {
        let mut post = match self.editable_post(auth, id).await? {
            Ok(post) => post,
            Err(redirect) => return Ok(Outcome::Redirect(redirect)),
        };

        let groups = self.groups.list().await?;
        let cleaned = match PostForm::bind(input, &groups) {
            Ok(cleaned) => cleaned,
            Err(form) => {
                return Ok(Outcome::Render(View::PostForm {
                    form,
                    editing: Some(post.id),
                }));
            }
        };

        post.text = cleaned.text;
        post.group_id = cleaned.group_id;
        let post = self.posts.update(post).await?;
        tracing::info!(post_id = post.id, "Post updated");

        Ok(Outcome::Redirect(Redirect::PostDetail(post.id)))
    }

    /// Resolve a post its caller may edit. Guests go to the login page,
    /// anyone but the author goes back to the post.
    async fn editable_post(
        &self,
        auth: &AuthContext,
        id: i64,
    ) -> Result<Result<Post, Redirect>, DomainError> {
        let Some(identity) = auth.identity() else {
            return Ok(Err(Redirect::Login));
        };

        let post = self.find_post(id).await?;
        if !post.is_authored_by(identity.user_id) {
            tracing::debug!(
                post_id = id,
                user_id = identity.user_id,
                "Edit refused, not the author"
            );
            return Ok(Err(Redirect::PostDetail(id)));
        }

        Ok(Ok(post))
    }

    async fn find_post(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    async fn post_list(
        &self,
        listing: Listing,
        filter: PostFilter,
        page: Option<&str>,
    ) -> Result<View, DomainError> {
        let count = usize::try_from(self.posts.count(filter).await?).unwrap_or(usize::MAX);
        let window = self.paginator.window(page, count);
        let posts = self
            .posts
            .list(filter, window.offset, window.limit)
            .await?;
        let page = self.paginator.page_in_window(posts, window, count);

        let refs = self.references(page.items()).await?;
        let page = page.try_map(|post| refs.card(post))?;

        tracing::debug!(
            number = page.number(),
            num_pages = page.num_pages(),
            items = page.len(),
            "Serving post list"
        );
        Ok(View::PostList { listing, page })
    }

    /// Load the authors and groups referenced by `posts`.
    async fn references(&self, posts: &[Post]) -> Result<References, DomainError> {
        let mut refs = References::default();

        for post in posts {
            if !refs.authors.contains_key(&post.author_id) {
                let user = self
                    .users
                    .find_by_id(post.author_id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("user", post.author_id))?;
                refs.authors.insert(user.id, Author::from(&user));
            }

            if let Some(group_id) = post.group_id {
                if !refs.groups.contains_key(&group_id) {
                    if let Some(group) = self.groups.find_by_id(group_id).await? {
                        refs.groups.insert(group_id, group);
                    }
                }
            }
        }

        Ok(refs)
    }
}

#[derive(Default)]
struct References {
    authors: HashMap<i64, Author>,
    groups: HashMap<i64, Group>,
}

impl References {
    fn card(&self, post: Post) -> Result<PostCard, DomainError> {
        let author = self
            .authors
            .get(&post.author_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("user", post.author_id))?;
        let group = post.group_id.and_then(|id| self.groups.get(&id).cloned());

        Ok(PostCard {
            post,
            author,
            group,
        })
    }
}
