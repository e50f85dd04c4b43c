use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use serde::{Deserialize, Serialize};

use neighborly_utils::constants::MAX_REPLY_DEPTH;
use neighborly_utils::errors::AppError;

use crate::expansion::ExpansionSet;
use crate::post::ContentStatus;
use crate::ranking::{VoteState, VoteValue};
use crate::user::{AuthorSnapshot, User};

#[cfg(feature = "ssr")]
use {
    crate::community::ssr::check_membership,
    crate::store::ssr::get_content_store,
    crate::user::ssr::{check_user, check_user_is},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStats {
    pub upvotes: u32,
    pub downvotes: u32,
}

impl CommentStats {
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

/// A comment and, recursively, its replies ordered from oldest to newest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: String,
    pub post_id: String,
    pub author_id: String,
    pub parent_comment_id: Option<String>,
    pub content: String,
    pub author: AuthorSnapshot,
    pub stats: CommentStats,
    pub status: ContentStatus,
    pub create_timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn reply_count(&self) -> usize {
        self.replies.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: String,
    pub community_id: String,
    pub author_id: String,
    pub content: String,
    pub parent_comment_id: Option<String>,
    pub author: AuthorSnapshot,
}

impl NewComment {
    pub fn new(
        author: &User,
        community_id: &str,
        post_id: &str,
        parent_comment_id: Option<&str>,
        content: String,
    ) -> Self {
        NewComment {
            post_id: post_id.to_string(),
            community_id: community_id.to_string(),
            author_id: author.user_id.clone(),
            content,
            parent_comment_id: parent_comment_id.map(str::to_string),
            author: author.author_snapshot(),
        }
    }
}

/// Returns whether a comment at `depth` (0 for top-level comments) offers a reply box.
pub fn can_reply(depth: usize) -> bool {
    depth < MAX_REPLY_DEPTH
}

/// Returns whether the replies of `comment` are rendered.
pub fn shows_replies(comment: &Comment, expansion: &ExpansionSet) -> bool {
    !comment.replies.is_empty() && expansion.is_expanded(&comment.comment_id)
}

/// Returns the comment with the given id, searching replies depth-first.
pub fn find_comment<'a>(comments: &'a [Comment], comment_id: &str) -> Option<&'a Comment> {
    comments.iter().find_map(|comment| match comment.comment_id == comment_id {
        true => Some(comment),
        false => find_comment(&comment.replies, comment_id),
    })
}

/// Toggle displayed under a comment with replies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepliesToggle {
    Show(usize),
    Hide,
}

impl RepliesToggle {
    pub fn for_comment(comment: &Comment, expansion: &ExpansionSet) -> Option<RepliesToggle> {
        match (comment.reply_count(), expansion.is_expanded(&comment.comment_id)) {
            (0, _) => None,
            (_, true) => Some(RepliesToggle::Hide),
            (count, false) => Some(RepliesToggle::Show(count)),
        }
    }

    pub fn label(&self) -> String {
        match self {
            RepliesToggle::Show(count) => format!("Show {count} Replies"),
            RepliesToggle::Hide => String::from("Hide Replies"),
        }
    }
}

/// Text of a compose box and whether its content is being submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub text: String,
    pub is_submitting: bool,
}

impl CommentDraft {
    /// Starts a submission: returns the trimmed content and clears the box, or `None` when
    /// the content is blank or a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<String> {
        if self.is_submitting {
            return None;
        }
        let content = self.text.trim();
        if content.is_empty() {
            return None;
        }
        let content = content.to_string();
        self.text.clear();
        self.is_submitting = true;
        Some(content)
    }

    /// Ends a submission. The cleared text is not restored on failure.
    pub fn finish_submit(&mut self) {
        self.is_submitting = false;
    }
}

/// State owned by each rendered comment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentNodeState {
    pub is_reply_open: bool,
    pub reply_draft: CommentDraft,
    pub vote_state: VoteState<CommentStats>,
    pub reply_error: Option<AppError>,
}

impl CommentNodeState {
    pub fn new(comment: &Comment) -> Self {
        CommentNodeState {
            vote_state: VoteState::new(VoteValue::None, comment.stats),
            ..Default::default()
        }
    }

    pub fn toggle_reply_form(&mut self) {
        self.is_reply_open = !self.is_reply_open;
    }

    /// Applies the outcome of a reply submission: success closes the reply box, failure keeps it open with the error.
    pub fn on_reply_result(&mut self, result: Result<(), AppError>) {
        self.reply_draft.finish_submit();
        match result {
            Ok(()) => {
                self.is_reply_open = false;
                self.reply_error = None;
            },
            Err(e) => {
                log::error!("Failed to submit reply: {e}");
                self.reply_error = Some(e);
            },
        }
    }
}

#[server]
pub async fn get_post_comments(community_id: String, post_id: String) -> Result<Vec<Comment>, AppError> {
    let user = check_user()?;
    check_membership(&user, &community_id)?;
    get_content_store()?.get_post_comments(&community_id, &post_id)
}

#[server(input = Json)]
pub async fn create_comment(new_comment: NewComment) -> Result<(), AppError> {
    log::trace!("Create comment for post {}", new_comment.post_id);
    let user = check_user_is(&new_comment.author_id)?;
    check_membership(&user, &new_comment.community_id)?;
    get_content_store()?.create_comment(new_comment)
}

#[cfg(test)]
mod tests {
    use neighborly_utils::errors::AppError;
    use crate::comment::{can_reply, find_comment, shows_replies, Comment, CommentDraft, CommentNodeState, CommentStats, RepliesToggle};
    use crate::expansion::ExpansionSet;
    use crate::post::ContentStatus;
    use crate::ranking::VoteValue;
    use crate::user::AuthorSnapshot;

    fn create_comment(comment_id: &str, replies: Vec<Comment>) -> Comment {
        Comment {
            comment_id: comment_id.to_string(),
            post_id: String::from("post-1"),
            author_id: String::from("user-1"),
            parent_comment_id: None,
            content: String::from("content"),
            author: AuthorSnapshot::default(),
            stats: CommentStats { upvotes: 2, downvotes: 1 },
            status: ContentStatus::Active,
            create_timestamp: chrono::Utc::now(),
            replies,
        }
    }

    #[test]
    fn test_can_reply() {
        assert!(can_reply(0));
        assert!(can_reply(1));
        assert!(can_reply(2));
        assert!(!can_reply(3));
        assert!(!can_reply(10));
    }

    #[test]
    fn test_shows_replies_and_toggle() {
        let comment = create_comment("c1", vec![create_comment("c2", vec![]), create_comment("c3", vec![])]);
        let leaf = create_comment("c4", vec![]);
        let mut expansion = ExpansionSet::default();

        assert!(!shows_replies(&comment, &expansion));
        assert_eq!(RepliesToggle::for_comment(&comment, &expansion), Some(RepliesToggle::Show(2)));
        assert_eq!(RepliesToggle::Show(2).label(), "Show 2 Replies");

        expansion.toggle("c1");
        assert!(shows_replies(&comment, &expansion));
        assert_eq!(RepliesToggle::for_comment(&comment, &expansion), Some(RepliesToggle::Hide));
        assert_eq!(RepliesToggle::Hide.label(), "Hide Replies");

        expansion.set_expanded("c4", true);
        assert!(!shows_replies(&leaf, &expansion));
        assert_eq!(RepliesToggle::for_comment(&leaf, &expansion), None);
    }

    #[test]
    fn test_find_comment() {
        let comments = vec![
            create_comment("c1", vec![create_comment("c2", vec![create_comment("c3", vec![])])]),
            create_comment("c4", vec![]),
        ];
        assert_eq!(find_comment(&comments, "c1").map(|comment| comment.reply_count()), Some(1));
        assert_eq!(find_comment(&comments, "c3").map(|comment| comment.comment_id.as_str()), Some("c3"));
        assert_eq!(find_comment(&comments, "c4").map(|comment| comment.comment_id.as_str()), Some("c4"));
        assert_eq!(find_comment(&comments, "c5"), None);
    }

    #[test]
    fn test_comment_draft_begin_submit() {
        let mut draft = CommentDraft::default();
        assert_eq!(draft.begin_submit(), None);

        draft.text = String::from("   \n ");
        assert_eq!(draft.begin_submit(), None);
        assert!(!draft.is_submitting);
        assert_eq!(draft.text, "   \n ");

        draft.text = String::from(" Hello neighbors ");
        assert_eq!(draft.begin_submit(), Some(String::from("Hello neighbors")));
        assert!(draft.is_submitting);
        assert!(draft.text.is_empty());

        draft.text = String::from("second");
        assert_eq!(draft.begin_submit(), None);
        assert_eq!(draft.text, "second");

        draft.finish_submit();
        assert_eq!(draft.begin_submit(), Some(String::from("second")));
    }

    #[test]
    fn test_comment_node_state() {
        let comment = create_comment("c1", vec![]);
        let mut state = CommentNodeState::new(&comment);
        assert_eq!(state.vote_state.vote, VoteValue::None);
        assert_eq!(state.vote_state.stats, comment.stats);
        assert!(!state.is_reply_open);

        state.toggle_reply_form();
        assert!(state.is_reply_open);

        state.reply_draft.text = String::from("reply");
        assert!(state.reply_draft.begin_submit().is_some());
        let error = AppError::StoreError(String::from("test"));
        state.on_reply_result(Err(error.clone()));
        assert!(state.is_reply_open);
        assert!(!state.reply_draft.is_submitting);
        assert!(state.reply_draft.text.is_empty());
        assert_eq!(state.reply_error, Some(error));

        state.reply_draft.text = String::from("reply");
        assert!(state.reply_draft.begin_submit().is_some());
        state.on_reply_result(Ok(()));
        assert!(!state.is_reply_open);
        assert_eq!(state.reply_error, None);

        state.toggle_reply_form();
        assert!(state.is_reply_open);
    }
}
