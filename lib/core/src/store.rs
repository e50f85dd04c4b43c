use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use neighborly_utils::checks::check_string_length;
use neighborly_utils::constants::MAX_COMMENT_LENGTH;
use neighborly_utils::errors::AppError;

use crate::comment::{Comment, CommentStats, NewComment};
use crate::community::{Community, Membership, MembershipStatus};
use crate::notification::NotificationPreferences;
use crate::post::{is_emergency_category, ContentStatus, NewPost, Post, PostStats};
use crate::ranking::{apply_vote, get_vote_deltas, VoteValue};
use crate::service::ContentService;
use crate::user::{User, UserRole};

/// Initial content of an [`InMemoryContentStore`]. Comments are listed flat and linked through `parent_comment_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSeed {
    pub users: Vec<User>,
    pub communities: Vec<Community>,
    pub memberships: Vec<Membership>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub notification_preferences: Vec<NotificationPreferences>,
}

/// Notification recorded by [`InMemoryContentStore::send_notifications`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentNotification {
    pub post_id: String,
    pub recipient_id: String,
    pub timestamp: chrono::DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreData {
    users: Vec<User>,
    communities: Vec<Community>,
    memberships: Vec<Membership>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    post_votes: HashMap<(String, String), VoteValue>,
    comment_votes: HashMap<(String, String), VoteValue>,
    notification_preferences: HashMap<String, NotificationPreferences>,
    sent_notifications: Vec<SentNotification>,
    id_counter: u64,
}

impl StoreData {
    fn next_id(&mut self, prefix: &str) -> String {
        loop {
            self.id_counter += 1;
            let id = format!("{prefix}-{}", self.id_counter);
            if !self.posts.iter().any(|post| post.post_id == id) && !self.comments.iter().any(|comment| comment.comment_id == id) {
                return id;
            }
        }
    }

    fn find_post_mut(&mut self, community_id: &str, post_id: &str) -> Result<&mut Post, AppError> {
        self.posts
            .iter_mut()
            .find(|post| post.post_id == post_id && post.community_id == community_id)
            .ok_or(AppError::NotFound)
    }
}

/// Content service keeping everything in memory, behind a single lock taken for the whole duration of each operation.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    data: RwLock<StoreData>,
}

fn apply_delta(count: u32, delta: i64) -> u32 {
    (count as i64 + delta).max(0) as u32
}

/// Builds the reply tree of `parent_id` from flat comments, oldest first at every level.
fn build_comment_tree(comments: &[Comment], parent_id: Option<&str>) -> Vec<Comment> {
    let mut children: Vec<Comment> = comments
        .iter()
        .filter(|comment| comment.parent_comment_id.as_deref() == parent_id)
        .map(|comment| Comment {
            replies: build_comment_tree(comments, Some(&comment.comment_id)),
            ..comment.clone()
        })
        .collect();
    children.sort_by_key(|comment| comment.create_timestamp);
    children
}

impl InMemoryContentStore {
    pub fn new(seed: StoreSeed) -> Self {
        let comments = seed.comments.into_iter().map(|comment| Comment { replies: Vec::new(), ..comment }).collect();
        let notification_preferences = seed.notification_preferences
            .into_iter()
            .map(|preferences| (preferences.user_id.clone(), preferences))
            .collect();
        InMemoryContentStore {
            data: RwLock::new(StoreData {
                users: seed.users,
                communities: seed.communities,
                memberships: seed.memberships,
                posts: seed.posts,
                comments,
                notification_preferences,
                ..Default::default()
            }),
        }
    }

    pub fn from_json(seed_json: &str) -> Result<Self, AppError> {
        let seed: StoreSeed = serde_json::from_str(seed_json).map_err(|e| AppError::StoreError(e.to_string()))?;
        Ok(Self::new(seed))
    }

    pub fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        let data = self.data.read()?;
        Ok(data.users.iter().find(|user| user.user_id == user_id).cloned())
    }

    pub fn get_community(&self, community_id: &str) -> Result<Option<Community>, AppError> {
        let data = self.data.read()?;
        Ok(data.communities.iter().find(|community| community.community_id == community_id).cloned())
    }

    pub fn get_membership(&self, community_id: &str, user_id: &str) -> Result<Option<Membership>, AppError> {
        let data = self.data.read()?;
        Ok(data.memberships
            .iter()
            .find(|membership| membership.community_id == community_id && membership.user_id == user_id)
            .cloned())
    }

    /// Returns the posts of a community, newest first.
    pub fn get_community_posts(&self, community_id: &str) -> Result<Vec<Post>, AppError> {
        let data = self.data.read()?;
        let mut posts: Vec<Post> = data.posts.iter().filter(|post| post.community_id == community_id).cloned().collect();
        posts.sort_by(|l, r| r.create_timestamp.cmp(&l.create_timestamp));
        Ok(posts)
    }

    pub fn get_post_by_id(&self, community_id: &str, post_id: &str) -> Result<Option<Post>, AppError> {
        let data = self.data.read()?;
        Ok(data.posts.iter().find(|post| post.post_id == post_id && post.community_id == community_id).cloned())
    }

    pub fn find_post(&self, post_id: &str) -> Result<Option<Post>, AppError> {
        let data = self.data.read()?;
        Ok(data.posts.iter().find(|post| post.post_id == post_id).cloned())
    }

    /// Creates a post from `new_post` once its fields are valid. The emergency flag follows the category.
    pub fn create_post(&self, new_post: NewPost) -> Result<Post, AppError> {
        new_post.to_form().validate()?;
        let mut data = self.data.write()?;
        if !data.communities.iter().any(|community| community.community_id == new_post.community_id) {
            return Err(AppError::NotFound);
        }
        let post = Post {
            post_id: data.next_id("post"),
            author_id: new_post.author_id,
            community_id: new_post.community_id,
            title: new_post.title,
            content: new_post.content,
            category_tag: new_post.category_tag.clone(),
            geographic_tag: new_post.geographic_tag,
            media_urls: new_post.media_urls,
            stats: PostStats::default(),
            author: new_post.author,
            status: ContentStatus::Active,
            is_emergency: is_emergency_category(&new_post.category_tag),
            create_timestamp: Utc::now(),
        };
        log::debug!("Create post {} in community {}", post.post_id, post.community_id);
        data.posts.push(post.clone());
        Ok(post)
    }

    pub fn get_post_comments(&self, community_id: &str, post_id: &str) -> Result<Vec<Comment>, AppError> {
        let data = self.data.read()?;
        if !data.posts.iter().any(|post| post.post_id == post_id && post.community_id == community_id) {
            return Err(AppError::NotFound);
        }
        let post_comments: Vec<Comment> = data.comments.iter().filter(|comment| comment.post_id == post_id).cloned().collect();
        Ok(build_comment_tree(&post_comments, None))
    }

    pub fn create_comment(&self, new_comment: NewComment) -> Result<(), AppError> {
        check_string_length(new_comment.content.trim(), "Comment", MAX_COMMENT_LENGTH as usize, false)?;
        let mut data = self.data.write()?;
        data.find_post_mut(&new_comment.community_id, &new_comment.post_id)?;
        if let Some(parent_comment_id) = &new_comment.parent_comment_id {
            if !data.comments.iter().any(|comment| &comment.comment_id == parent_comment_id && comment.post_id == new_comment.post_id) {
                return Err(AppError::invalid(format!("Cannot reply to unknown comment {parent_comment_id}.")));
            }
        }
        let comment = Comment {
            comment_id: data.next_id("comment"),
            post_id: new_comment.post_id,
            author_id: new_comment.author_id,
            parent_comment_id: new_comment.parent_comment_id,
            content: new_comment.content.trim().to_string(),
            author: new_comment.author,
            stats: CommentStats::default(),
            status: ContentStatus::Active,
            create_timestamp: Utc::now(),
            replies: Vec::new(),
        };
        log::debug!("Create comment {} on post {}", comment.comment_id, comment.post_id);
        let post = data.find_post_mut(&new_comment.community_id, &comment.post_id)?;
        post.stats.comment_count += 1;
        data.comments.push(comment);
        Ok(())
    }

    pub fn vote_on_post(&self, post_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Post, AppError> {
        let mut data = self.data.write()?;
        data.find_post_mut(community_id, post_id)?;
        let key = (user_id.to_string(), post_id.to_string());
        let previous_vote = data.post_votes.get(&key).copied().unwrap_or_default();
        let next_vote = apply_vote(previous_vote, vote);
        match next_vote {
            VoteValue::None => data.post_votes.remove(&key),
            _ => data.post_votes.insert(key, next_vote),
        };
        let (up_delta, down_delta) = get_vote_deltas(next_vote, previous_vote);
        let post = data.find_post_mut(community_id, post_id)?;
        post.stats.upvotes = apply_delta(post.stats.upvotes, up_delta);
        post.stats.downvotes = apply_delta(post.stats.downvotes, down_delta);
        Ok(post.clone())
    }

    pub fn vote_on_comment(&self, comment_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Comment, AppError> {
        let mut data = self.data.write()?;
        let post_id = data.comments
            .iter()
            .find(|comment| comment.comment_id == comment_id)
            .map(|comment| comment.post_id.clone())
            .ok_or(AppError::NotFound)?;
        data.find_post_mut(community_id, &post_id)?;
        let key = (user_id.to_string(), comment_id.to_string());
        let previous_vote = data.comment_votes.get(&key).copied().unwrap_or_default();
        let next_vote = apply_vote(previous_vote, vote);
        match next_vote {
            VoteValue::None => data.comment_votes.remove(&key),
            _ => data.comment_votes.insert(key, next_vote),
        };
        let (up_delta, down_delta) = get_vote_deltas(next_vote, previous_vote);
        let comment = data.comments
            .iter_mut()
            .find(|comment| comment.comment_id == comment_id)
            .ok_or(AppError::NotFound)?;
        comment.stats.upvotes = apply_delta(comment.stats.upvotes, up_delta);
        comment.stats.downvotes = apply_delta(comment.stats.downvotes, down_delta);
        Ok(comment.clone())
    }

    pub fn get_user_votes_for_posts(&self, user_id: &str, post_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError> {
        let data = self.data.read()?;
        Ok(post_ids
            .iter()
            .filter_map(|post_id| {
                data.post_votes.get(&(user_id.to_string(), post_id.clone())).map(|vote| (post_id.clone(), *vote))
            })
            .collect())
    }

    pub fn get_user_votes_for_comments(&self, user_id: &str, comment_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError> {
        let data = self.data.read()?;
        Ok(comment_ids
            .iter()
            .filter_map(|comment_id| {
                data.comment_votes.get(&(user_id.to_string(), comment_id.clone())).map(|vote| (comment_id.clone(), *vote))
            })
            .collect())
    }

    pub fn get_notification_preferences(&self, user_id: &str) -> Result<NotificationPreferences, AppError> {
        let data = self.data.read()?;
        Ok(data.notification_preferences
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| NotificationPreferences::new(user_id)))
    }

    pub fn set_notification_preferences(&self, preferences: NotificationPreferences) -> Result<(), AppError> {
        let mut data = self.data.write()?;
        log::debug!("Set notification preferences of user {}", preferences.user_id);
        data.notification_preferences.insert(preferences.user_id.clone(), preferences);
        Ok(())
    }

    /// Returns the preferences of every approved member, defaults for members who never saved any.
    pub fn get_community_notification_preferences(&self, community_id: &str) -> Result<Vec<NotificationPreferences>, AppError> {
        let data = self.data.read()?;
        Ok(data.memberships
            .iter()
            .filter(|membership| membership.community_id == community_id && membership.grants_access())
            .map(|membership| {
                data.notification_preferences
                    .get(&membership.user_id)
                    .cloned()
                    .unwrap_or_else(|| NotificationPreferences::new(&membership.user_id))
            })
            .collect())
    }

    pub fn send_notifications(&self, post_id: &str, recipients: &[String]) -> Result<(), AppError> {
        let mut data = self.data.write()?;
        let timestamp = Utc::now();
        for recipient_id in recipients {
            log::info!("Notify user {recipient_id} of post {post_id}");
            data.sent_notifications.push(SentNotification {
                post_id: post_id.to_string(),
                recipient_id: recipient_id.clone(),
                timestamp,
            });
        }
        Ok(())
    }

    pub fn sent_notifications(&self) -> Result<Vec<SentNotification>, AppError> {
        Ok(self.data.read()?.sent_notifications.clone())
    }

    /// Small neighborhood used when no seed file is configured.
    pub fn demo() -> Self {
        let now = Utc::now();
        let community_id = String::from("maple-street");
        let user = |user_id: &str, display_name: &str, role: UserRole, is_verified: bool| User {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
            role,
            badge_url: None,
            badge: None,
            is_verified,
        };
        let users = vec![
            User { badge: Some(String::from("Block captain")), ..user("alice", "Alice", UserRole::Moderator, true) },
            user("bob", "Bob", UserRole::Resident, true),
            user("carol", "Carol", UserRole::Resident, false),
            user("dave", "Dave", UserRole::Resident, true),
        ];
        let membership = |user_id: &str, status: MembershipStatus| Membership {
            community_id: community_id.clone(),
            user_id: user_id.to_string(),
            status,
            join_timestamp: now - Duration::days(30),
        };
        let memberships = vec![
            membership("alice", MembershipStatus::Approved),
            membership("bob", MembershipStatus::Approved),
            membership("carol", MembershipStatus::Approved),
            membership("dave", MembershipStatus::Pending),
        ];
        let post = |post_id: &str, author: &User, title: &str, category_tag: &str, status: ContentStatus, hours_old: i64, comment_count: u32| Post {
            post_id: post_id.to_string(),
            author_id: author.user_id.clone(),
            community_id: community_id.clone(),
            title: title.to_string(),
            content: format!("{title}. Reply below if you can help."),
            category_tag: category_tag.to_string(),
            geographic_tag: String::from("Maple Street"),
            media_urls: Vec::new(),
            stats: PostStats { upvotes: 10, downvotes: 1, comment_count },
            author: author.author_snapshot(),
            status,
            is_emergency: crate::post::is_emergency_category(category_tag),
            create_timestamp: now - Duration::hours(hours_old),
        };
        let posts = vec![
            post("welcome", &users[0], "Welcome to Maple Street", "general", ContentStatus::Pinned, 24 * 20, 0),
            post("water-main", &users[0], "Water main break at the corner", "emergency", ContentStatus::Active, 2, 0),
            post("garage-sale", &users[1], "Garage sale on Saturday", "events", ContentStatus::Active, 5, 4),
        ];
        let comment = |comment_id: &str, author: &User, parent_comment_id: Option<&str>, content: &str, minutes_old: i64| Comment {
            comment_id: comment_id.to_string(),
            post_id: String::from("garage-sale"),
            author_id: author.user_id.clone(),
            parent_comment_id: parent_comment_id.map(str::to_string),
            content: content.to_string(),
            author: author.author_snapshot(),
            stats: CommentStats { upvotes: 1, downvotes: 0 },
            status: ContentStatus::Active,
            create_timestamp: now - Duration::minutes(minutes_old),
            replies: Vec::new(),
        };
        let comments = vec![
            comment("sale-1", &users[0], None, "Will there be books?", 200),
            comment("sale-2", &users[1], Some("sale-1"), "Two boxes of them.", 180),
            comment("sale-3", &users[0], Some("sale-2"), "Great, I'll come early.", 170),
            comment("sale-4", &users[2], None, "What time does it start?", 100),
        ];
        InMemoryContentStore::new(StoreSeed {
            communities: vec![Community {
                community_id: community_id.clone(),
                name: String::from("Maple Street"),
                geographic_tag: String::from("Maple Street"),
                description: String::from("Neighbors of Maple Street and around."),
            }],
            users,
            memberships,
            posts,
            comments,
            notification_preferences: Vec::new(),
        })
    }
}

#[async_trait]
impl ContentService for InMemoryContentStore {
    async fn get_community(&self, community_id: &str) -> Result<Option<Community>, AppError> {
        InMemoryContentStore::get_community(self, community_id)
    }

    async fn get_membership(&self, community_id: &str, user_id: &str) -> Result<Option<Membership>, AppError> {
        InMemoryContentStore::get_membership(self, community_id, user_id)
    }

    async fn get_community_posts(&self, community_id: &str) -> Result<Vec<Post>, AppError> {
        InMemoryContentStore::get_community_posts(self, community_id)
    }

    async fn get_post_by_id(&self, community_id: &str, post_id: &str) -> Result<Option<Post>, AppError> {
        InMemoryContentStore::get_post_by_id(self, community_id, post_id)
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post, AppError> {
        InMemoryContentStore::create_post(self, new_post)
    }

    async fn get_post_comments(&self, community_id: &str, post_id: &str) -> Result<Vec<Comment>, AppError> {
        InMemoryContentStore::get_post_comments(self, community_id, post_id)
    }

    async fn create_comment(&self, new_comment: NewComment) -> Result<(), AppError> {
        InMemoryContentStore::create_comment(self, new_comment)
    }

    async fn vote_on_post(&self, post_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Post, AppError> {
        InMemoryContentStore::vote_on_post(self, post_id, user_id, community_id, vote)
    }

    async fn vote_on_comment(&self, comment_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Comment, AppError> {
        InMemoryContentStore::vote_on_comment(self, comment_id, user_id, community_id, vote)
    }

    async fn get_user_votes_for_posts(&self, user_id: &str, post_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError> {
        InMemoryContentStore::get_user_votes_for_posts(self, user_id, post_ids)
    }

    async fn get_user_votes_for_comments(&self, user_id: &str, comment_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError> {
        InMemoryContentStore::get_user_votes_for_comments(self, user_id, comment_ids)
    }

    async fn get_notification_preferences(&self, user_id: &str) -> Result<NotificationPreferences, AppError> {
        InMemoryContentStore::get_notification_preferences(self, user_id)
    }

    async fn set_notification_preferences(&self, preferences: NotificationPreferences) -> Result<(), AppError> {
        InMemoryContentStore::set_notification_preferences(self, preferences)
    }

    async fn get_community_notification_preferences(&self, community_id: &str) -> Result<Vec<NotificationPreferences>, AppError> {
        InMemoryContentStore::get_community_notification_preferences(self, community_id)
    }

    async fn send_notifications(&self, post_id: &str, recipients: &[String]) -> Result<(), AppError> {
        InMemoryContentStore::send_notifications(self, post_id, recipients)
    }
}

#[cfg(feature = "ssr")]
pub mod ssr {
    use std::sync::Arc;
    use leptos::prelude::use_context;
    use neighborly_utils::errors::AppError;
    use crate::store::InMemoryContentStore;

    pub fn get_content_store() -> Result<Arc<InMemoryContentStore>, AppError> {
        use_context::<Arc<InMemoryContentStore>>().ok_or_else(|| AppError::new("Content store missing."))
    }
}
