use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use neighborly_utils::errors::AppError;

use crate::comment::{Comment, NewComment};
use crate::post::Post;
use crate::progress::SubmitProgress;
use crate::service::ContentService;

/// Monotonic ticket counter. Only the newest ticket's response may be applied.
#[derive(Clone, Debug, Default)]
pub struct RequestSequence(Arc<AtomicU64>);

impl RequestSequence {
    pub fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

/// Comment tree and post fetched together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadSnapshot {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// Fetches the comment tree, then the post. Never in parallel.
pub async fn fetch_thread(
    service: &dyn ContentService,
    community_id: &str,
    post_id: &str,
) -> Result<ThreadSnapshot, AppError> {
    let comments = service.get_post_comments(community_id, post_id).await?;
    let post = service.get_post_by_id(community_id, post_id).await?.ok_or(AppError::NotFound)?;
    Ok(ThreadSnapshot { post, comments })
}

/// Fetches the thread under a new ticket. Returns `None` when a newer request was issued meanwhile.
pub async fn load_thread(
    service: &dyn ContentService,
    sequence: &RequestSequence,
    community_id: &str,
    post_id: &str,
) -> Result<Option<ThreadSnapshot>, AppError> {
    let ticket = sequence.issue();
    let snapshot = fetch_thread(service, community_id, post_id).await?;
    match sequence.is_current(ticket) {
        true => Ok(Some(snapshot)),
        false => {
            log::debug!("Discard stale thread snapshot of post {post_id}, ticket {ticket}");
            Ok(None)
        },
    }
}

/// Creates a comment or reply, then reloads the whole thread, reporting each checkpoint to `on_progress`.
pub async fn submit_comment(
    service: &dyn ContentService,
    sequence: &RequestSequence,
    new_comment: NewComment,
    on_progress: &mut (dyn FnMut(SubmitProgress) + Send),
) -> Result<Option<ThreadSnapshot>, AppError> {
    let community_id = new_comment.community_id.clone();
    let post_id = new_comment.post_id.clone();
    on_progress(SubmitProgress::Sending);
    service.create_comment(new_comment).await?;
    on_progress(SubmitProgress::Created);
    on_progress(SubmitProgress::Refreshing);
    let snapshot = load_thread(service, sequence, &community_id, &post_id).await?;
    on_progress(SubmitProgress::Done);
    Ok(snapshot)
}

/// Post and comments displayed on a post page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThreadState {
    pub post: Option<Post>,
    pub comments: Vec<Comment>,
}

impl ThreadState {
    /// Replaces the displayed thread with a fresh snapshot. Stale (`None`) snapshots and errors leave it untouched.
    pub fn apply_refresh(&mut self, result: Result<Option<ThreadSnapshot>, AppError>) -> Result<(), AppError> {
        if let Some(snapshot) = result? {
            self.post = Some(snapshot.post);
            self.comments = snapshot.comments;
        }
        Ok(())
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}
