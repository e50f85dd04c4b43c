use std::collections::HashMap;

use async_trait::async_trait;

use neighborly_utils::errors::AppError;

use crate::comment::{Comment, NewComment};
use crate::community::{Community, Membership};
use crate::notification::NotificationPreferences;
use crate::post::{NewPost, Post};
use crate::ranking::VoteValue;

/// Document store and callable functions holding the platform's content.
#[async_trait]
pub trait ContentService: Send + Sync {
    async fn get_community(&self, community_id: &str) -> Result<Option<Community>, AppError>;

    async fn get_membership(&self, community_id: &str, user_id: &str) -> Result<Option<Membership>, AppError>;

    async fn get_community_posts(&self, community_id: &str) -> Result<Vec<Post>, AppError>;

    async fn get_post_by_id(&self, community_id: &str, post_id: &str) -> Result<Option<Post>, AppError>;

    async fn create_post(&self, new_post: NewPost) -> Result<Post, AppError>;

    /// Returns the comment tree of a post, top-level comments and replies ordered oldest first.
    async fn get_post_comments(&self, community_id: &str, post_id: &str) -> Result<Vec<Comment>, AppError>;

    async fn create_comment(&self, new_comment: NewComment) -> Result<(), AppError>;

    /// Records `vote` as clicked by the user; clicking the stored vote again clears it. Returns the post with its updated stats.
    async fn vote_on_post(&self, post_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Post, AppError>;

    /// Same as [`ContentService::vote_on_post`] for a comment.
    async fn vote_on_comment(&self, comment_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Comment, AppError>;

    /// Returns the stored votes of a user, ids without vote are absent.
    async fn get_user_votes_for_posts(&self, user_id: &str, post_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError>;

    async fn get_user_votes_for_comments(&self, user_id: &str, comment_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError>;

    async fn get_notification_preferences(&self, user_id: &str) -> Result<NotificationPreferences, AppError>;

    async fn set_notification_preferences(&self, preferences: NotificationPreferences) -> Result<(), AppError>;

    /// Returns the notification preferences of every member of the community.
    async fn get_community_notification_preferences(&self, community_id: &str) -> Result<Vec<NotificationPreferences>, AppError>;

    async fn send_notifications(&self, post_id: &str, recipients: &[String]) -> Result<(), AppError>;
}

/// Content service calling the server functions, used by the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerContentService;

#[async_trait]
impl ContentService for ServerContentService {
    async fn get_community(&self, community_id: &str) -> Result<Option<Community>, AppError> {
        crate::community::get_community(community_id.to_string()).await
    }

    async fn get_membership(&self, community_id: &str, user_id: &str) -> Result<Option<Membership>, AppError> {
        crate::community::get_membership(community_id.to_string(), user_id.to_string()).await
    }

    async fn get_community_posts(&self, community_id: &str) -> Result<Vec<Post>, AppError> {
        crate::post::get_community_posts(community_id.to_string()).await
    }

    async fn get_post_by_id(&self, community_id: &str, post_id: &str) -> Result<Option<Post>, AppError> {
        crate::post::get_post_by_id(community_id.to_string(), post_id.to_string()).await
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post, AppError> {
        crate::post::create_post(new_post).await
    }

    async fn get_post_comments(&self, community_id: &str, post_id: &str) -> Result<Vec<Comment>, AppError> {
        crate::comment::get_post_comments(community_id.to_string(), post_id.to_string()).await
    }

    async fn create_comment(&self, new_comment: NewComment) -> Result<(), AppError> {
        crate::comment::create_comment(new_comment).await
    }

    async fn vote_on_post(&self, post_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Post, AppError> {
        crate::ranking::vote_on_post(post_id.to_string(), user_id.to_string(), community_id.to_string(), vote).await
    }

    async fn vote_on_comment(&self, comment_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Comment, AppError> {
        crate::ranking::vote_on_comment(comment_id.to_string(), user_id.to_string(), community_id.to_string(), vote).await
    }

    async fn get_user_votes_for_posts(&self, user_id: &str, post_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError> {
        crate::ranking::get_user_votes_for_posts(user_id.to_string(), post_ids.to_vec()).await
    }

    async fn get_user_votes_for_comments(&self, user_id: &str, comment_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError> {
        crate::ranking::get_user_votes_for_comments(user_id.to_string(), comment_ids.to_vec()).await
    }

    async fn get_notification_preferences(&self, user_id: &str) -> Result<NotificationPreferences, AppError> {
        crate::notification::get_notification_preferences(user_id.to_string()).await
    }

    async fn set_notification_preferences(&self, preferences: NotificationPreferences) -> Result<(), AppError> {
        crate::notification::set_notification_preferences(preferences).await
    }

    async fn get_community_notification_preferences(&self, community_id: &str) -> Result<Vec<NotificationPreferences>, AppError> {
        crate::notification::get_community_notification_preferences(community_id.to_string()).await
    }

    async fn send_notifications(&self, post_id: &str, recipients: &[String]) -> Result<(), AppError> {
        crate::notification::send_notifications(post_id.to_string(), recipients.to_vec()).await
    }
}
