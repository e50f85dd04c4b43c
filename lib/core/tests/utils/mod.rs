#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use neighborly_core::comment::{Comment, NewComment};
use neighborly_core::community::{Community, Membership};
use neighborly_core::notification::NotificationPreferences;
use neighborly_core::post::{NewPost, Post};
use neighborly_core::ranking::VoteValue;
use neighborly_core::service::ContentService;
use neighborly_core::store::InMemoryContentStore;
use neighborly_core::thread::RequestSequence;
use neighborly_utils::errors::AppError;

/// Content service wrapping an in-memory store, counting calls and failing on demand.
#[derive(Default)]
pub struct InstrumentedService {
    pub store: InMemoryContentStore,
    pub get_post_comments_calls: AtomicUsize,
    pub get_post_by_id_calls: AtomicUsize,
    pub create_comment_calls: AtomicUsize,
    pub vote_calls: AtomicUsize,
    pub send_notifications_calls: AtomicUsize,
    pub fail_create_comment: AtomicBool,
    pub fail_votes: AtomicBool,
    pub fail_membership: AtomicBool,
    pub fail_notifications: AtomicBool,
    /// Issues a newer ticket while the comment tree is being fetched, like a concurrent refresh would.
    pub interleaved_sequence: Mutex<Option<RequestSequence>>,
}

fn injected_failure() -> AppError {
    AppError::CommunicationError(leptos::prelude::ServerFnErrorErr::Request(String::from("injected failure")))
}

impl InstrumentedService {
    pub fn new(store: InMemoryContentStore) -> Self {
        InstrumentedService {
            store,
            ..Default::default()
        }
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn set(flag: &AtomicBool) {
        flag.store(true, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), AppError> {
        match flag.load(Ordering::SeqCst) {
            true => Err(injected_failure()),
            false => Ok(()),
        }
    }
}

#[async_trait]
impl ContentService for InstrumentedService {
    async fn get_community(&self, community_id: &str) -> Result<Option<Community>, AppError> {
        self.store.get_community(community_id)
    }

    async fn get_membership(&self, community_id: &str, user_id: &str) -> Result<Option<Membership>, AppError> {
        Self::check(&self.fail_membership)?;
        self.store.get_membership(community_id, user_id)
    }

    async fn get_community_posts(&self, community_id: &str) -> Result<Vec<Post>, AppError> {
        self.store.get_community_posts(community_id)
    }

    async fn get_post_by_id(&self, community_id: &str, post_id: &str) -> Result<Option<Post>, AppError> {
        self.get_post_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.store.get_post_by_id(community_id, post_id)
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post, AppError> {
        self.store.create_post(new_post)
    }

    async fn get_post_comments(&self, community_id: &str, post_id: &str) -> Result<Vec<Comment>, AppError> {
        self.get_post_comments_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(sequence) = self.interleaved_sequence.lock().expect("Should lock sequence.").take() {
            sequence.issue();
        }
        self.store.get_post_comments(community_id, post_id)
    }

    async fn create_comment(&self, new_comment: NewComment) -> Result<(), AppError> {
        self.create_comment_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_create_comment)?;
        self.store.create_comment(new_comment)
    }

    async fn vote_on_post(&self, post_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Post, AppError> {
        self.vote_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_votes)?;
        self.store.vote_on_post(post_id, user_id, community_id, vote)
    }

    async fn vote_on_comment(&self, comment_id: &str, user_id: &str, community_id: &str, vote: VoteValue) -> Result<Comment, AppError> {
        self.vote_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_votes)?;
        self.store.vote_on_comment(comment_id, user_id, community_id, vote)
    }

    async fn get_user_votes_for_posts(&self, user_id: &str, post_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError> {
        self.store.get_user_votes_for_posts(user_id, post_ids)
    }

    async fn get_user_votes_for_comments(&self, user_id: &str, comment_ids: &[String]) -> Result<HashMap<String, VoteValue>, AppError> {
        self.store.get_user_votes_for_comments(user_id, comment_ids)
    }

    async fn get_notification_preferences(&self, user_id: &str) -> Result<NotificationPreferences, AppError> {
        self.store.get_notification_preferences(user_id)
    }

    async fn set_notification_preferences(&self, preferences: NotificationPreferences) -> Result<(), AppError> {
        self.store.set_notification_preferences(preferences)
    }

    async fn get_community_notification_preferences(&self, community_id: &str) -> Result<Vec<NotificationPreferences>, AppError> {
        self.store.get_community_notification_preferences(community_id)
    }

    async fn send_notifications(&self, post_id: &str, recipients: &[String]) -> Result<(), AppError> {
        self.send_notifications_calls.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_notifications)?;
        self.store.send_notifications(post_id, recipients)
    }
}
