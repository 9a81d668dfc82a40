//! The post create/edit form.
//!
//! The form has two fields: `text`, a required plain character field, and
//! `group`, an optional single choice among the existing groups.

use crate::domain::{Group, Post};

pub const TEXT_FIELD: &str = "text";
pub const GROUP_FIELD: &str = "group";

const REQUIRED_MESSAGE: &str = "This field is required.";
const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// What kind of input a field accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Char,
    /// Exactly one of `choices`, or nothing if the field is optional.
    Choice { choices: Vec<Choice> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub help_text: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    /// Current value: initial data for a fresh form, submitted data for a bound one.
    pub value: Option<String>,
    pub errors: Vec<String>,
}

impl FormField {
    pub fn is_char(&self) -> bool {
        matches!(self.kind, FieldKind::Char)
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice { .. })
    }
}

/// Raw submitted values, as they arrive from an HTML form.
#[derive(Debug, Clone, Default)]
pub struct PostFormInput {
    pub text: Option<String>,
    pub group: Option<String>,
}

/// Data that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedPost {
    pub text: String,
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    fields: Vec<FormField>,
}

impl PostForm {
    /// An empty form offering `groups` as choices.
    pub fn blank(groups: &[Group]) -> Self {
        Self::with_values(groups, None, None)
    }

    /// A form pre-populated with an existing post.
    pub fn for_post(post: &Post, groups: &[Group]) -> Self {
        Self::with_values(
            groups,
            Some(post.text.clone()),
            post.group_id.map(|id| id.to_string()),
        )
    }

    fn with_values(groups: &[Group], text: Option<String>, group: Option<String>) -> Self {
        let choices = groups
            .iter()
            .map(|g| Choice {
                value: g.id.to_string(),
                label: g.title.clone(),
            })
            .collect();

        Self {
            fields: vec![
                FormField {
                    name: TEXT_FIELD,
                    label: "Post text",
                    help_text: "Text of the new post",
                    required: true,
                    kind: FieldKind::Char,
                    value: text,
                    errors: Vec::new(),
                },
                FormField {
                    name: GROUP_FIELD,
                    label: "Group",
                    help_text: "Group the post will belong to",
                    required: false,
                    kind: FieldKind::Choice { choices },
                    value: group,
                    errors: Vec::new(),
                },
            ],
        }
    }

    /// Validate submitted data against the available `groups`.
    ///
    /// On failure the returned form carries the submitted values and the
    /// per-field errors, ready to be shown again.
    pub fn bind(input: PostFormInput, groups: &[Group]) -> Result<CleanedPost, PostForm> {
        let mut form = Self::with_values(groups, input.text.clone(), input.group.clone());

        let text = input.text.as_deref().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            form.add_error(TEXT_FIELD, REQUIRED_MESSAGE);
        }

        let group_id = match input.group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let found = raw
                    .parse::<i64>()
                    .ok()
                    .filter(|id| groups.iter().any(|g| g.id == *id));
                if found.is_none() {
                    form.add_error(GROUP_FIELD, INVALID_CHOICE_MESSAGE);
                }
                found
            }
        };

        if form.has_errors() {
            return Err(form);
        }

        Ok(CleanedPost {
            text: text.to_string(),
            group_id,
        })
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| !f.errors.is_empty())
    }

    fn add_error(&mut self, name: &str, message: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.errors.push(message.to_string());
        }
    }
}
