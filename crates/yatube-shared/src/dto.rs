//! Data Transfer Objects - request/response types for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: AuthorResponse,
}

/// Public information about a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub text: String,
    pub author: AuthorResponse,
    pub group: Option<GroupResponse>,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub object_list: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub per_page: usize,
    pub has_next: bool,
    pub has_previous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page_number: Option<usize>,
    pub start_index: usize,
    pub end_index: usize,
}

impl<T> PageResponse<T> {
    pub fn len(&self) -> usize {
        self.object_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_list.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Char,
    Choice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceResponse {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldResponse {
    pub name: String,
    pub kind: FieldKind,
    pub label: String,
    pub help_text: String,
    pub required: bool,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceResponse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormResponse {
    pub fields: Vec<FieldResponse>,
}

impl FormResponse {
    pub fn field(&self, name: &str) -> Option<&FieldResponse> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Template context of a rendered page, one variant per kind of page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContext {
    PostList {
        page_obj: PageResponse<PostResponse>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group: Option<GroupResponse>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<AuthorResponse>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        post_count: Option<u64>,
    },
    PostDetail {
        post: PostResponse,
        author_post_count: u64,
    },
    PostForm {
        form: FormResponse,
        is_edit: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        post_id: Option<i64>,
    },
}

/// A page as handed to the template engine: which template, and with what.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedPage {
    pub template: String,
    pub context: PageContext,
}
