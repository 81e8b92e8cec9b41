//! User entity - an account that owns videos and subscribes to channels

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Minimum username length
pub const USERNAME_MIN: usize = 2;
/// Maximum username length
pub const USERNAME_MAX: usize = 32;

/// User entity
///
/// A user doubles as a channel: other users subscribe to it and its public
/// fields are joined into video, comment, and subscription listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, email: String, full_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            full_name,
            avatar_url: None,
            cover_image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate and normalize a username: trimmed, lowercased, 2-32 chars,
    /// alphanumeric plus `_` and `-`
    pub fn normalize_username(raw: &str) -> Result<String, DomainError> {
        let username = raw.trim().to_lowercase();
        let len = username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
            return Err(DomainError::InvalidUsername(format!(
                "must be {USERNAME_MIN}-{USERNAME_MAX} characters"
            )));
        }
        if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(DomainError::InvalidUsername(
                "only letters, digits, '_' and '-' are allowed".to_string(),
            ));
        }
        Ok(username)
    }

    /// Update the display name
    pub fn set_full_name(&mut self, full_name: String) {
        self.full_name = full_name;
        self.updated_at = Utc::now();
    }

    /// Replace the avatar image reference
    pub fn set_avatar_url(&mut self, url: Option<String>) {
        self.avatar_url = url;
        self.updated_at = Utc::now();
    }

    /// Replace the cover image reference
    pub fn set_cover_image_url(&mut self, url: Option<String>) {
        self.cover_image_url = url;
        self.updated_at = Utc::now();
    }
}

/// Public owner fields joined into listings (comments, videos, likes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerCard {
    pub id: Snowflake,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for OwnerCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Public channel fields joined into subscription listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCard {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub subscribed_at: DateTime<Utc>,
}

/// A channel profile as seen by a viewer: public fields plus aggregated
/// subscription facts computed on read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelProfile {
    pub id: Snowflake,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub subscriber_count: i64,
    pub subscribed_to_count: i64,
    pub is_subscribed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_username() {
        assert_eq!(User::normalize_username("  Alice_01 ").unwrap(), "alice_01");
        assert_eq!(User::normalize_username("a-b").unwrap(), "a-b");
    }

    #[test]
    fn test_normalize_username_rejects_bad_input() {
        assert!(User::normalize_username("x").is_err());
        assert!(User::normalize_username(&"a".repeat(33)).is_err());
        assert!(User::normalize_username("has space").is_err());
        assert!(User::normalize_username("naïve").is_err());
    }

    #[test]
    fn test_owner_card_from_user() {
        let mut user = User::new(
            Snowflake::new(7),
            "creator".to_string(),
            "c@example.com".to_string(),
            "The Creator".to_string(),
        );
        user.set_avatar_url(Some("/media/avatars/a.png".to_string()));

        let card = OwnerCard::from(&user);
        assert_eq!(card.id, Snowflake::new(7));
        assert_eq!(card.username, "creator");
        assert_eq!(card.avatar_url.as_deref(), Some("/media/avatars/a.png"));
    }

    #[test]
    fn test_setters_touch_updated_at() {
        let mut user = User::new(
            Snowflake::new(1),
            "u".repeat(3),
            "u@example.com".to_string(),
            "U".to_string(),
        );
        let before = user.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        user.set_full_name("New Name".to_string());
        assert!(user.updated_at > before);
        assert_eq!(user.full_name, "New Name");
    }
}
