use leptos::prelude::*;

use neighborly_core::comment::NewComment;
use neighborly_core::progress::{ProgressTracker, SubmitProgress};
use neighborly_core::service::ServerContentService;
use neighborly_core::thread::{submit_comment, RequestSequence, ThreadSnapshot, ThreadState};
use neighborly_core::user::{get_user, User};
use neighborly_utils::errors::AppError;

/// Application-wide state
#[derive(Clone, Copy)]
pub struct GlobalState {
    pub user: LocalResource<Result<Option<User>, AppError>>,
}

impl GlobalState {
    pub fn new() -> Self {
        GlobalState {
            user: LocalResource::new(get_user),
        }
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}

/// State of a community page, provided once the access checks passed
#[derive(Clone, Debug)]
pub struct CommunityState {
    pub community_id: Memo<String>,
    pub user: User,
}

/// State of a post page, shared by every comment of the thread
#[derive(Clone, Copy)]
pub struct ThreadContext {
    pub community_id: Memo<String>,
    pub post_id: Memo<String>,
    pub thread: RwSignal<ThreadState>,
    pub progress: RwSignal<ProgressTracker>,
    pub sequence: StoredValue<RequestSequence>,
}

impl ThreadContext {
    pub fn new(community_id: Memo<String>, post_id: Memo<String>) -> Self {
        ThreadContext {
            community_id,
            post_id,
            thread: RwSignal::new(ThreadState::default()),
            progress: RwSignal::new(ProgressTracker::default()),
            sequence: StoredValue::new(RequestSequence::default()),
        }
    }

    /// Displays a fresh thread snapshot. Stale snapshots are dropped without notifying subscribers.
    pub fn apply_refresh(&self, result: Result<Option<ThreadSnapshot>, AppError>) -> Result<(), AppError> {
        match result? {
            Some(snapshot) => self.thread
                .try_update(|thread| thread.apply_refresh(Ok(Some(snapshot))))
                .unwrap_or(Ok(())),
            None => Ok(()),
        }
    }

    /// Creates `new_comment` then refreshes the thread, reporting progress. `on_result` receives the outcome.
    pub fn spawn_comment_submission(
        self,
        new_comment: NewComment,
        on_result: impl FnOnce(Result<(), AppError>) + 'static,
    ) {
        let progress = self.progress;
        let submission = progress.try_update(|tracker| tracker.start()).unwrap_or_default();
        let set_progress = move |checkpoint: SubmitProgress| {
            progress.maybe_update(|tracker| tracker.set(submission, checkpoint));
        };
        leptos::task::spawn_local(async move {
            let sequence = self.sequence.get_value();
            let result = submit_comment(
                &ServerContentService,
                &sequence,
                new_comment,
                &mut |checkpoint: SubmitProgress| set_progress(checkpoint),
            ).await;
            let result = self.apply_refresh(result);
            match &result {
                Ok(()) => set_timeout(move || set_progress(SubmitProgress::Idle), SubmitProgress::reset_delay()),
                Err(_) => set_progress(SubmitProgress::Idle),
            }
            on_result(result);
        });
    }
}
