use std::collections::HashMap;

use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use serde::{Deserialize, Serialize};

use neighborly_utils::errors::AppError;

use crate::comment::{Comment, CommentStats};
use crate::post::{Post, PostStats};
use crate::service::ContentService;

#[cfg(feature = "ssr")]
use {
    crate::community::ssr::check_membership,
    crate::store::ssr::get_content_store,
    crate::user::ssr::check_user_is,
};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(i16)]
pub enum VoteValue {
    Up = 1,
    #[default]
    None = 0,
    Down = -1,
}

impl From<i16> for VoteValue {
    fn from(value: i16) -> VoteValue {
        match value {
            1..=i16::MAX => VoteValue::Up,
            0 => VoteValue::None,
            i16::MIN..=-1_i16 => VoteValue::Down,
        }
    }
}

/// Returns the vote resulting from clicking `clicked` while `current` is active.
///
/// Clicking the active vote clears it, clicking any other vote replaces it.
pub fn apply_vote(current: VoteValue, clicked: VoteValue) -> VoteValue {
    match current == clicked {
        true => VoteValue::None,
        false => clicked,
    }
}

/// Returns the (upvote, downvote) counter deltas when a stored vote goes from `previous_vote` to `vote`.
pub fn get_vote_deltas(vote: VoteValue, previous_vote: VoteValue) -> (i64, i64) {
    let count = |value: VoteValue, target: VoteValue| (value == target) as i64;
    (
        count(vote, VoteValue::Up) - count(previous_vote, VoteValue::Up),
        count(vote, VoteValue::Down) - count(previous_vote, VoteValue::Down),
    )
}

/// Vote of the current user on a post or comment, along with the last stats returned by the content service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteState<S> {
    pub vote: VoteValue,
    pub stats: S,
}

impl<S> VoteState<S> {
    pub fn new(vote: VoteValue, stats: S) -> Self {
        Self { vote, stats }
    }

    /// Records a vote accepted by the content service: the returned stats replace the displayed ones.
    pub fn on_vote_resolved(&mut self, clicked: VoteValue, stats: S) {
        self.stats = stats;
        self.vote = apply_vote(self.vote, clicked);
    }

    pub fn is_upvoted(&self) -> bool {
        self.vote == VoteValue::Up
    }

    pub fn is_downvoted(&self) -> bool {
        self.vote == VoteValue::Down
    }
}

/// Casts `clicked` on a post and updates `state` only if the content service accepts it.
pub async fn cast_post_vote(
    service: &dyn ContentService,
    state: &mut VoteState<PostStats>,
    post_id: &str,
    user_id: &str,
    community_id: &str,
    clicked: VoteValue,
) -> Result<Post, AppError> {
    let post = service.vote_on_post(post_id, user_id, community_id, clicked).await?;
    state.on_vote_resolved(clicked, post.stats);
    Ok(post)
}

/// Casts `clicked` on a comment and updates `state` only if the content service accepts it.
pub async fn cast_comment_vote(
    service: &dyn ContentService,
    state: &mut VoteState<CommentStats>,
    comment_id: &str,
    user_id: &str,
    community_id: &str,
    clicked: VoteValue,
) -> Result<Comment, AppError> {
    let comment = service.vote_on_comment(comment_id, user_id, community_id, clicked).await?;
    state.on_vote_resolved(clicked, comment.stats);
    Ok(comment)
}

/// Returns the vote of `user_id` on a single comment, `VoteValue::None` when there is none.
pub async fn fetch_comment_vote(
    service: &dyn ContentService,
    user_id: &str,
    comment_id: &str,
) -> Result<VoteValue, AppError> {
    let votes = service.get_user_votes_for_comments(user_id, &[comment_id.to_string()]).await?;
    Ok(votes.get(comment_id).copied().unwrap_or_default())
}

/// Returns the vote of `user_id` on a single post, `VoteValue::None` when there is none.
pub async fn fetch_post_vote(
    service: &dyn ContentService,
    user_id: &str,
    post_id: &str,
) -> Result<VoteValue, AppError> {
    let votes = service.get_user_votes_for_posts(user_id, &[post_id.to_string()]).await?;
    Ok(votes.get(post_id).copied().unwrap_or_default())
}

#[server]
pub async fn vote_on_post(
    post_id: String,
    user_id: String,
    community_id: String,
    vote: VoteValue,
) -> Result<Post, AppError> {
    log::trace!("Vote {vote:?} on post {post_id}");
    let user = check_user_is(&user_id)?;
    check_membership(&user, &community_id)?;
    get_content_store()?.vote_on_post(&post_id, &user_id, &community_id, vote)
}

#[server]
pub async fn vote_on_comment(
    comment_id: String,
    user_id: String,
    community_id: String,
    vote: VoteValue,
) -> Result<Comment, AppError> {
    log::trace!("Vote {vote:?} on comment {comment_id}");
    let user = check_user_is(&user_id)?;
    check_membership(&user, &community_id)?;
    get_content_store()?.vote_on_comment(&comment_id, &user_id, &community_id, vote)
}

#[server(input = Json)]
pub async fn get_user_votes_for_posts(
    user_id: String,
    post_ids: Vec<String>,
) -> Result<HashMap<String, VoteValue>, AppError> {
    check_user_is(&user_id)?;
    get_content_store()?.get_user_votes_for_posts(&user_id, &post_ids)
}

#[server(input = Json)]
pub async fn get_user_votes_for_comments(
    user_id: String,
    comment_ids: Vec<String>,
) -> Result<HashMap<String, VoteValue>, AppError> {
    check_user_is(&user_id)?;
    get_content_store()?.get_user_votes_for_comments(&user_id, &comment_ids)
}

#[cfg(test)]
mod tests {
    use crate::post::PostStats;
    use crate::ranking::{apply_vote, get_vote_deltas, VoteState, VoteValue};

    #[test]
    fn test_vote_value_from_i16() {
        assert_eq!(VoteValue::from(5), VoteValue::Up);
        assert_eq!(VoteValue::from(1), VoteValue::Up);
        assert_eq!(VoteValue::from(0), VoteValue::None);
        assert_eq!(VoteValue::from(-1), VoteValue::Down);
        assert_eq!(VoteValue::from(i16::MIN), VoteValue::Down);
    }

    #[test]
    fn test_apply_vote() {
        assert_eq!(apply_vote(VoteValue::None, VoteValue::Up), VoteValue::Up);
        assert_eq!(apply_vote(VoteValue::None, VoteValue::Down), VoteValue::Down);
        assert_eq!(apply_vote(VoteValue::Up, VoteValue::Up), VoteValue::None);
        assert_eq!(apply_vote(VoteValue::Down, VoteValue::Down), VoteValue::None);
        assert_eq!(apply_vote(VoteValue::Up, VoteValue::Down), VoteValue::Down);
        assert_eq!(apply_vote(VoteValue::Down, VoteValue::Up), VoteValue::Up);
        assert_eq!(apply_vote(apply_vote(VoteValue::None, VoteValue::Up), VoteValue::Up), VoteValue::None);
    }

    #[test]
    fn test_get_vote_deltas() {
        assert_eq!(get_vote_deltas(VoteValue::Up, VoteValue::None), (1, 0));
        assert_eq!(get_vote_deltas(VoteValue::None, VoteValue::Up), (-1, 0));
        assert_eq!(get_vote_deltas(VoteValue::Down, VoteValue::None), (0, 1));
        assert_eq!(get_vote_deltas(VoteValue::None, VoteValue::Down), (0, -1));
        assert_eq!(get_vote_deltas(VoteValue::Up, VoteValue::Down), (1, -1));
        assert_eq!(get_vote_deltas(VoteValue::Down, VoteValue::Up), (-1, 1));
        assert_eq!(get_vote_deltas(VoteValue::Up, VoteValue::Up), (0, 0));
    }

    #[test]
    fn test_vote_state_on_vote_resolved() {
        let stats = PostStats { upvotes: 10, downvotes: 2, comment_count: 0 };
        let mut state = VoteState::new(VoteValue::None, stats);
        assert!(!state.is_upvoted() && !state.is_downvoted());

        state.on_vote_resolved(VoteValue::Up, PostStats { upvotes: 11, ..stats });
        assert!(state.is_upvoted());
        assert_eq!(state.stats.upvotes, 11);

        state.on_vote_resolved(VoteValue::Down, PostStats { upvotes: 10, downvotes: 3, ..stats });
        assert!(state.is_downvoted());
        assert_eq!(state.stats, PostStats { upvotes: 10, downvotes: 3, comment_count: 0 });

        state.on_vote_resolved(VoteValue::Down, stats);
        assert_eq!(state.vote, VoteValue::None);
        assert_eq!(state.stats, stats);
    }
}
