//! Domain entities - the core business objects.

mod group;
mod post;
mod user;

pub use group::{GROUP_SLUG_MAX_LENGTH, GROUP_TITLE_MAX_LENGTH, Group, NewGroup};
pub use post::{NewPost, Post, PostFilter};
pub use user::{
    Author, NewUser, PASSWORD_MIN_LENGTH, USERNAME_MAX_LENGTH, User, is_valid_username,
};
