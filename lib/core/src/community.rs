use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use neighborly_utils::errors::AppError;

#[cfg(feature = "ssr")]
use {
    crate::store::ssr::get_content_store,
    crate::user::ssr::check_user,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Community {
    pub community_id: String,
    pub name: String,
    pub geographic_tag: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub community_id: String,
    pub user_id: String,
    pub status: MembershipStatus,
    pub join_timestamp: chrono::DateTime<chrono::Utc>,
}

impl Membership {
    pub fn grants_access(&self) -> bool {
        self.status == MembershipStatus::Approved
    }
}

#[cfg(feature = "ssr")]
pub mod ssr {
    use neighborly_utils::errors::AppError;
    use crate::store::ssr::get_content_store;
    use crate::user::User;

    /// Fails unless `user` is an approved member of the community.
    pub fn check_membership(user: &User, community_id: &str) -> Result<(), AppError> {
        let store = get_content_store()?;
        match store.get_membership(community_id, &user.user_id)? {
            Some(membership) if membership.grants_access() => Ok(()),
            _ => Err(AppError::NotMember(community_id.to_string())),
        }
    }
}

#[server]
pub async fn get_community(community_id: String) -> Result<Option<Community>, AppError> {
    check_user()?;
    get_content_store()?.get_community(&community_id)
}

#[server]
pub async fn get_membership(community_id: String, user_id: String) -> Result<Option<Membership>, AppError> {
    let user = check_user()?;
    if user.user_id != user_id {
        return Err(AppError::InsufficientPrivileges);
    }
    get_content_store()?.get_membership(&community_id, &user_id)
}
