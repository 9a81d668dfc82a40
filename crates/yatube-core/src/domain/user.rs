use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - represents a user in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Usernames are 1 to 150 letters, digits and `@.+-_`.
pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (1..=USERNAME_MAX_LENGTH).contains(&len)
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
}

/// A user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Public projection of a user, safe to hand to page contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(is_valid_username("leo"));
        assert!(is_valid_username("jane.doe+test@site_1-a"));
        assert!(is_valid_username("пользователь"));
        assert!(is_valid_username(&"a".repeat(150)));

        assert!(!is_valid_username(""));
        assert!(!is_valid_username("with space"));
        assert!(!is_valid_username("slash/name"));
        assert!(!is_valid_username(&"a".repeat(151)));
    }
}
