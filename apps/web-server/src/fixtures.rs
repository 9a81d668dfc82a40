//! Startup fixtures: accounts and groups loaded from a JSON file.
//!
//! ```json
//! {
//!   "users": [{ "username": "leo", "password": "change-me-123" }],
//!   "groups": [{ "title": "Cats", "slug": "cats", "description": "All about cats" }]
//! }
//! ```
//!
//! Entries that already exist (same username or slug) are left untouched, so
//! the same file can be loaded on every start.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;
use yatube_core::domain::{
    GROUP_TITLE_MAX_LENGTH, NewGroup, NewUser, PASSWORD_MIN_LENGTH, is_valid_username,
};

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub users: Vec<FixtureUser>,
    #[serde(default)]
    pub groups: Vec<NewGroup>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureUser {
    pub username: String,
    pub password: String,
}

/// How many fixture entries were actually inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub users: usize,
    pub groups: usize,
}

impl Fixtures {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixtures from {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing fixtures in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let fixtures: Self = serde_json::from_str(raw)?;
        fixtures.validate()?;
        Ok(fixtures)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for user in &self.users {
            if !is_valid_username(&user.username) {
                bail!("invalid username {:?}", user.username);
            }
            if user.password.chars().count() < PASSWORD_MIN_LENGTH {
                bail!("password of {:?} is too short", user.username);
            }
        }
        for group in &self.groups {
            if !group.has_valid_slug() {
                bail!("invalid group slug {:?}", group.slug);
            }
            if !group.has_valid_title() {
                bail!(
                    "group title of {:?} must be 1 to {GROUP_TITLE_MAX_LENGTH} characters",
                    group.slug
                );
            }
        }
        Ok(())
    }

    /// Insert the missing users and groups.
    pub async fn load(self, state: &AppState) -> anyhow::Result<LoadSummary> {
        let mut summary = LoadSummary::default();

        for user in self.users {
            if state.users.find_by_username(&user.username).await?.is_some() {
                tracing::debug!(username = %user.username, "Fixture user already exists");
                continue;
            }
            let password_hash = state.password_service.hash(&user.password)?;
            state
                .users
                .create(NewUser::new(user.username, password_hash))
                .await?;
            summary.users += 1;
        }

        for group in self.groups {
            if state.groups.find_by_slug(&group.slug).await?.is_some() {
                tracing::debug!(slug = %group.slug, "Fixture group already exists");
                continue;
            }
            state.groups.create(group).await?;
            summary.groups += 1;
        }

        tracing::info!(
            users = summary.users,
            groups = summary.groups,
            "Fixtures loaded"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yatube_core::Paginator;
    use yatube_infra::auth::JwtConfig;

    const FIXTURES: &str = r#"{
        "users": [{ "username": "leo", "password": "long-enough" }],
        "groups": [{ "title": "Cats", "slug": "cats", "description": "All about cats" }]
    }"#;

    #[actix_rt::test]
    async fn test_load_is_idempotent() {
        let state = AppState::in_memory(Paginator::default(), JwtConfig::default());

        let first = Fixtures::from_json(FIXTURES).unwrap().load(&state).await.unwrap();
        let second = Fixtures::from_json(FIXTURES).unwrap().load(&state).await.unwrap();

        assert_eq!(first, LoadSummary { users: 1, groups: 1 });
        assert_eq!(second, LoadSummary::default());

        let leo = state.users.find_by_username("leo").await.unwrap().unwrap();
        assert!(state.password_service.verify("long-enough", &leo.password_hash).unwrap());
        assert_eq!(state.groups.list().await.unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_bad_entries() {
        assert!(Fixtures::from_json(r#"{"groups": [{"title": "x", "slug": "bad slug", "description": ""}]}"#).is_err());
        assert!(Fixtures::from_json(r#"{"users": [{"username": "leo", "password": "short"}]}"#).is_err());

        let long_slug = format!(r#"{{"groups": [{{"title": "x", "slug": "{}", "description": ""}}]}}"#, "s".repeat(51));
        assert!(Fixtures::from_json(&long_slug).is_err());
        let long_title = format!(r#"{{"groups": [{{"title": "{}", "slug": "cats", "description": ""}}]}}"#, "t".repeat(201));
        assert!(Fixtures::from_json(&long_title).is_err());
        assert!(Fixtures::from_json("{}").unwrap().users.is_empty());
    }
}
