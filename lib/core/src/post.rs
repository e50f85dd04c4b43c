use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use validator::Validate;

use neighborly_utils::checks::{check_category_tag, check_media_urls, check_post_title};
use neighborly_utils::constants::{EMERGENCY_CATEGORY, MAX_CONTENT_LENGTH, MAX_GEOGRAPHIC_TAG_LENGTH};
use neighborly_utils::errors::AppError;

use crate::notification::dispatch_notifications;
use crate::service::ContentService;
use crate::user::{AuthorSnapshot, User};

#[cfg(feature = "ssr")]
use {
    crate::community::ssr::check_membership,
    crate::store::ssr::get_content_store,
    crate::user::ssr::{check_user, check_user_is},
};

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Active,
    Pinned,
    Archived,
}

/// Denormalized counters maintained by the content service.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct PostStats {
    pub upvotes: u32,
    pub downvotes: u32,
    pub comment_count: u32,
}

impl PostStats {
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    pub author_id: String,
    pub community_id: String,
    pub title: String,
    pub content: String,
    pub category_tag: String,
    pub geographic_tag: String,
    pub media_urls: Vec<String>,
    pub stats: PostStats,
    pub author: AuthorSnapshot,
    pub status: ContentStatus,
    pub is_emergency: bool,
    pub create_timestamp: chrono::DateTime<chrono::Utc>,
}

impl Post {
    pub fn is_pinned(&self) -> bool {
        self.status == ContentStatus::Pinned
    }

    pub fn is_archived(&self) -> bool {
        self.status == ContentStatus::Archived
    }
}

/// User input of the post creation form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Validate, Serialize, Deserialize)]
pub struct PostForm {
    #[validate(custom(function = "check_post_title"))]
    pub title: String,
    #[validate(length(max = MAX_CONTENT_LENGTH))]
    pub content: String,
    #[validate(custom(function = "check_category_tag"))]
    pub category_tag: String,
    #[validate(length(max = MAX_GEOGRAPHIC_TAG_LENGTH))]
    pub geographic_tag: String,
    #[validate(custom(function = "check_media_urls"))]
    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// A post as sent to the content service for creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub author_id: String,
    pub community_id: String,
    pub title: String,
    pub content: String,
    pub category_tag: String,
    pub geographic_tag: String,
    pub media_urls: Vec<String>,
    pub author: AuthorSnapshot,
    pub is_emergency: bool,
}

/// # Returns whether the given category marks an emergency alert
///
/// ```
/// use neighborly_core::post::is_emergency_category;
///
/// assert!(is_emergency_category("emergency"));
/// assert!(is_emergency_category("Emergency"));
/// assert!(!is_emergency_category("general"));
/// assert!(!is_emergency_category("emergency-drill"));
/// ```
pub fn is_emergency_category(category_tag: &str) -> bool {
    category_tag.eq_ignore_ascii_case(EMERGENCY_CATEGORY)
}

impl NewPost {
    pub fn from_form(form: PostForm, author: &User, community_id: &str) -> Self {
        let is_emergency = is_emergency_category(&form.category_tag);
        NewPost {
            author_id: author.user_id.clone(),
            community_id: community_id.to_string(),
            title: form.title.trim().to_string(),
            content: form.content,
            category_tag: form.category_tag,
            geographic_tag: form.geographic_tag,
            media_urls: form.media_urls,
            author: author.author_snapshot(),
            is_emergency,
        }
    }

    /// Returns the user input this post was built from, to validate it again on the server.
    pub fn to_form(&self) -> PostForm {
        PostForm {
            title: self.title.clone(),
            content: self.content.clone(),
            category_tag: self.category_tag.clone(),
            geographic_tag: self.geographic_tag.clone(),
            media_urls: self.media_urls.clone(),
        }
    }
}

/// Validates `form`, creates the post and notifies the community. Notification failures do not fail the publication.
pub async fn publish_post(
    service: &dyn ContentService,
    author: &User,
    community_id: &str,
    form: PostForm,
) -> Result<Post, AppError> {
    form.validate()?;
    let post = service.create_post(NewPost::from_form(form, author, community_id)).await?;
    log::info!("Published post {} in community {community_id}, emergency: {}", post.post_id, post.is_emergency);
    let notified_count = dispatch_notifications(service, &post).await;
    log::debug!("Notified {notified_count} members of post {}", post.post_id);
    Ok(post)
}

#[server]
pub async fn get_post_by_id(community_id: String, post_id: String) -> Result<Option<Post>, AppError> {
    let user = check_user()?;
    check_membership(&user, &community_id)?;
    get_content_store()?.get_post_by_id(&community_id, &post_id)
}

#[server]
pub async fn get_community_posts(community_id: String) -> Result<Vec<Post>, AppError> {
    let user = check_user()?;
    check_membership(&user, &community_id)?;
    get_content_store()?.get_community_posts(&community_id)
}

#[server(input = Json)]
pub async fn create_post(new_post: NewPost) -> Result<Post, AppError> {
    let mut new_post = new_post;
    let user = check_user_is(&new_post.author_id)?;
    check_membership(&user, &new_post.community_id)?;
    new_post.author = user.author_snapshot();
    get_content_store()?.create_post(new_post)
}

#[server(input = Json)]
pub async fn publish_community_post(community_id: String, form: PostForm) -> Result<Post, AppError> {
    let user = check_user()?;
    check_membership(&user, &community_id)?;
    let store = get_content_store()?;
    publish_post(store.as_ref(), &user, &community_id, form).await
}
