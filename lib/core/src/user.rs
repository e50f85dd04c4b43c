use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use neighborly_utils::errors::AppError;

#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    #[default]
    Resident,
    Moderator,
    Admin,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub display_name: String,
    pub role: UserRole,
    pub badge_url: Option<String>,
    pub badge: Option<String>,
    pub is_verified: bool,
}

/// Author information copied into posts and comments at creation time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSnapshot {
    pub name: String,
    pub role: UserRole,
    pub badge_url: Option<String>,
    pub badge: Option<String>,
}

impl User {
    pub fn author_snapshot(&self) -> AuthorSnapshot {
        AuthorSnapshot {
            name: self.display_name.clone(),
            role: self.role,
            badge_url: self.badge_url.clone(),
            badge: self.badge.clone(),
        }
    }

    pub fn check_is_verified(&self) -> Result<(), AppError> {
        match self.is_verified {
            true => Ok(()),
            false => Err(AppError::NotVerified),
        }
    }
}

/// Identity of the user making the current request, as forwarded by the authentication proxy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrentUserId(pub Option<String>);

#[cfg(feature = "ssr")]
pub mod ssr {
    use leptos::prelude::use_context;
    use neighborly_utils::errors::AppError;
    use crate::store::ssr::get_content_store;
    use crate::user::{CurrentUserId, User};

    pub fn get_current_user_id() -> Option<String> {
        use_context::<CurrentUserId>().and_then(|current_user_id| current_user_id.0)
    }

    pub fn get_current_user() -> Result<Option<User>, AppError> {
        match get_current_user_id() {
            Some(user_id) => get_content_store()?.get_user(&user_id),
            None => Ok(None),
        }
    }

    /// Returns the current user, failing if it is not authenticated or not verified.
    pub fn check_user() -> Result<User, AppError> {
        let user = get_current_user()?.ok_or(AppError::NotAuthenticated)?;
        user.check_is_verified()?;
        Ok(user)
    }

    /// Returns the current user if it is allowed to act as `user_id`.
    pub fn check_user_is(user_id: &str) -> Result<User, AppError> {
        let user = check_user()?;
        match user.user_id == user_id {
            true => Ok(user),
            false => Err(AppError::InsufficientPrivileges),
        }
    }
}

#[server]
pub async fn get_user() -> Result<Option<User>, AppError> {
    ssr::get_current_user()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use neighborly_utils::errors::AppError;
    use crate::user::{User, UserRole};

    #[test]
    fn test_author_snapshot() {
        let user = User {
            user_id: String::from("user-1"),
            display_name: String::from("Alice"),
            role: UserRole::Moderator,
            badge_url: Some(String::from("/badges/helper.svg")),
            badge: Some(String::from("Helper")),
            is_verified: true,
        };
        let author = user.author_snapshot();
        assert_eq!(author.name, user.display_name);
        assert_eq!(author.role, UserRole::Moderator);
        assert_eq!(author.badge_url, user.badge_url);
        assert_eq!(author.badge, user.badge);
    }

    #[test]
    fn test_check_is_verified() {
        let mut user = User::default();
        assert_eq!(user.check_is_verified(), Err(AppError::NotVerified));
        user.is_verified = true;
        assert_eq!(user.check_is_verified(), Ok(()));
    }

    #[test]
    fn test_user_role_strings() {
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!(UserRole::from_str("moderator"), Ok(UserRole::Moderator));
        assert!(UserRole::from_str("mayor").is_err());
    }
}
