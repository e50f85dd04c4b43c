use std::collections::BTreeSet;

use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use serde::{Deserialize, Serialize};

use neighborly_utils::errors::AppError;

use crate::post::Post;
use crate::service::ContentService;

#[cfg(feature = "ssr")]
use {
    crate::community::ssr::check_membership,
    crate::store::ssr::get_content_store,
    crate::user::ssr::{check_user, check_user_is},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub user_id: String,
    pub enabled: bool,
    #[serde(default)]
    pub muted_categories: BTreeSet<String>,
}

impl NotificationPreferences {
    /// Default preferences: notifications enabled, no muted category.
    pub fn new(user_id: &str) -> Self {
        NotificationPreferences {
            user_id: user_id.to_string(),
            enabled: true,
            muted_categories: BTreeSet::new(),
        }
    }

    pub fn is_muted(&self, category_tag: &str) -> bool {
        self.muted_categories.contains(&category_tag.to_ascii_lowercase())
    }

    pub fn set_muted(&mut self, category_tag: &str, is_muted: bool) {
        let category_tag = category_tag.to_ascii_lowercase();
        match is_muted {
            true => { self.muted_categories.insert(category_tag); },
            false => { self.muted_categories.remove(&category_tag); },
        }
    }
}

/// Emergency posts reach every member regardless of their preferences.
pub fn should_notify(preferences: &NotificationPreferences, post: &Post) -> bool {
    post.is_emergency || (preferences.enabled && !preferences.is_muted(&post.category_tag))
}

/// Returns the ids of the members to notify of `post`, never including its author.
pub fn select_recipients(preferences: &[NotificationPreferences], post: &Post) -> Vec<String> {
    preferences
        .iter()
        .filter(|preferences| preferences.user_id != post.author_id && should_notify(preferences, post))
        .map(|preferences| preferences.user_id.clone())
        .collect()
}

/// Rejects `recipients` unless every one of them is a member that should be notified of `post`.
pub fn check_recipients(preferences: &[NotificationPreferences], post: &Post, recipients: &[String]) -> Result<(), AppError> {
    let allowed_recipients = select_recipients(preferences, post);
    match recipients.iter().find(|recipient| !allowed_recipients.contains(recipient)) {
        Some(recipient) => Err(AppError::invalid(format!("Cannot notify {recipient} of post {}.", post.post_id))),
        None => Ok(()),
    }
}

/// Notifies the community of a new post and returns the number of recipients. Failures are logged, not propagated.
pub async fn dispatch_notifications(service: &dyn ContentService, post: &Post) -> usize {
    let preferences = match service.get_community_notification_preferences(&post.community_id).await {
        Ok(preferences) => preferences,
        Err(e) => {
            log::error!("Failed to get notification preferences of community {}: {e}", post.community_id);
            return 0;
        }
    };
    let recipients = select_recipients(&preferences, post);
    if recipients.is_empty() {
        return 0;
    }
    match service.send_notifications(&post.post_id, &recipients).await {
        Ok(()) => recipients.len(),
        Err(e) => {
            log::error!("Failed to send notifications for post {}: {e}", post.post_id);
            0
        }
    }
}

#[server]
pub async fn get_notification_preferences(user_id: String) -> Result<NotificationPreferences, AppError> {
    check_user_is(&user_id)?;
    get_content_store()?.get_notification_preferences(&user_id)
}

#[server(input = Json)]
pub async fn set_notification_preferences(preferences: NotificationPreferences) -> Result<(), AppError> {
    check_user_is(&preferences.user_id)?;
    get_content_store()?.set_notification_preferences(preferences)
}

#[server]
pub async fn get_community_notification_preferences(community_id: String) -> Result<Vec<NotificationPreferences>, AppError> {
    let user = check_user()?;
    check_membership(&user, &community_id)?;
    get_content_store()?.get_community_notification_preferences(&community_id)
}

#[server(input = Json)]
pub async fn send_notifications(post_id: String, recipients: Vec<String>) -> Result<(), AppError> {
    let user = check_user()?;
    let store = get_content_store()?;
    match store.find_post(&post_id)? {
        Some(post) if post.author_id == user.user_id => {
            let preferences = store.get_community_notification_preferences(&post.community_id)?;
            check_recipients(&preferences, &post, &recipients)?;
            store.send_notifications(&post_id, &recipients)
        },
        Some(_) => Err(AppError::InsufficientPrivileges),
        None => Err(AppError::NotFound),
    }
}
