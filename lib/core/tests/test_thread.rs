use neighborly_core::comment::{CommentDraft, CommentNodeState, NewComment};
use neighborly_core::expansion::ExpansionSet;
use neighborly_core::progress::SubmitProgress;
use neighborly_core::thread::{fetch_thread, load_thread, submit_comment, RequestSequence, ThreadState};
use neighborly_utils::errors::AppError;

pub use crate::data_factory::*;
pub use crate::utils::*;

mod data_factory;
mod utils;

async fn load_initial_state(service: &InstrumentedService, sequence: &RequestSequence) -> Result<ThreadState, AppError> {
    let mut thread = ThreadState::default();
    thread.apply_refresh(load_thread(service, sequence, TEST_COMMUNITY_ID, TEST_POST_ID).await)?;
    Ok(thread)
}

#[tokio::test]
async fn test_fetch_thread() -> Result<(), AppError> {
    let service = InstrumentedService::new(create_test_store());
    let snapshot = fetch_thread(&service, TEST_COMMUNITY_ID, TEST_POST_ID).await?;
    assert_eq!(snapshot.post.post_id, TEST_POST_ID);
    assert!(snapshot.comments.is_empty());
    assert_eq!(InstrumentedService::count(&service.get_post_comments_calls), 1);
    assert_eq!(InstrumentedService::count(&service.get_post_by_id_calls), 1);

    assert_eq!(fetch_thread(&service, TEST_COMMUNITY_ID, "unknown").await, Err(AppError::NotFound));
    Ok(())
}

#[tokio::test]
async fn test_submit_comment_refreshes_once() -> Result<(), AppError> {
    let service = InstrumentedService::new(create_test_store());
    let sequence = RequestSequence::default();
    let mut thread = load_initial_state(&service, &sequence).await?;
    assert_eq!(thread.post.as_ref().map(|post| post.stats.comment_count), Some(0));
    let comment_calls = InstrumentedService::count(&service.get_post_comments_calls);
    let post_calls = InstrumentedService::count(&service.get_post_by_id_calls);

    let author = create_test_user(NEIGHBOR_ID, true);
    let mut draft = CommentDraft { text: String::from(" Count me in! "), is_submitting: false };
    let content = draft.begin_submit().expect("Draft should be submitted.");
    assert!(draft.text.is_empty());

    let mut progress_log = vec![SubmitProgress::Started];
    let result = submit_comment(
        &service,
        &sequence,
        NewComment::new(&author, TEST_COMMUNITY_ID, TEST_POST_ID, None, content),
        &mut |progress| progress_log.push(progress),
    ).await;
    draft.finish_submit();
    thread.apply_refresh(result)?;

    assert_eq!(InstrumentedService::count(&service.get_post_comments_calls), comment_calls + 1);
    assert_eq!(InstrumentedService::count(&service.get_post_by_id_calls), post_calls + 1);
    assert_eq!(thread.comment_count(), 1);
    assert_eq!(thread.comments[0].content, "Count me in!");
    assert_eq!(thread.post.as_ref().map(|post| post.stats.comment_count), Some(1));
    let percents: Vec<u8> = progress_log.iter().map(|progress| progress.percent()).collect();
    assert_eq!(percents, vec![10, 40, 70, 90, 100]);
    assert!(!draft.is_submitting);
    Ok(())
}

#[tokio::test]
async fn test_submit_reply_closes_reply_box() -> Result<(), AppError> {
    let service = InstrumentedService::new(create_test_store());
    let sequence = RequestSequence::default();
    let author = create_test_user(AUTHOR_ID, true);
    service.store.create_comment(NewComment::new(&author, TEST_COMMUNITY_ID, TEST_POST_ID, None, String::from("Parent")))?;
    let mut thread = load_initial_state(&service, &sequence).await?;
    let mut expansion = ExpansionSet::default();
    let parent = thread.comments[0].clone();
    expansion.set_expanded(&parent.comment_id, true);

    let mut node_state = CommentNodeState::new(&parent);
    node_state.toggle_reply_form();
    node_state.reply_draft.text = String::from("Reply");
    let content = node_state.reply_draft.begin_submit().expect("Reply should be submitted.");
    let result = submit_comment(
        &service,
        &sequence,
        NewComment::new(&author, TEST_COMMUNITY_ID, TEST_POST_ID, Some(&parent.comment_id), content),
        &mut |_| {},
    ).await;
    node_state.on_reply_result(thread.apply_refresh(result));

    assert!(!node_state.is_reply_open);
    assert_eq!(thread.comments[0].replies.len(), 1);
    assert_eq!(thread.comments[0].replies[0].content, "Reply");
    assert!(expansion.is_expanded(&parent.comment_id));
    Ok(())
}

#[tokio::test]
async fn test_empty_comment_is_not_submitted() -> Result<(), AppError> {
    let service = InstrumentedService::new(create_test_store());
    let sequence = RequestSequence::default();
    let thread = load_initial_state(&service, &sequence).await?;
    let thread_before = thread.clone();

    let mut draft = CommentDraft { text: String::from("   "), is_submitting: false };
    assert_eq!(draft.begin_submit(), None);

    assert_eq!(InstrumentedService::count(&service.create_comment_calls), 0);
    assert_eq!(thread, thread_before);
    assert_eq!(draft.text, "   ");
    Ok(())
}

#[tokio::test]
async fn test_submit_comment_failure_keeps_thread() -> Result<(), AppError> {
    let service = InstrumentedService::new(create_test_store());
    let sequence = RequestSequence::default();
    let mut thread = load_initial_state(&service, &sequence).await?;
    let thread_before = thread.clone();
    let comment_calls = InstrumentedService::count(&service.get_post_comments_calls);
    InstrumentedService::set(&service.fail_create_comment);

    let author = create_test_user(NEIGHBOR_ID, true);
    let mut draft = CommentDraft { text: String::from("Hello"), is_submitting: false };
    let content = draft.begin_submit().expect("Draft should be submitted.");
    let mut progress_log = Vec::new();
    let result = submit_comment(
        &service,
        &sequence,
        NewComment::new(&author, TEST_COMMUNITY_ID, TEST_POST_ID, None, content),
        &mut |progress| progress_log.push(progress),
    ).await;
    draft.finish_submit();

    assert!(thread.apply_refresh(result).is_err());
    assert_eq!(thread, thread_before);
    assert_eq!(thread.post.as_ref().map(|post| post.stats.comment_count), Some(0));
    assert_eq!(InstrumentedService::count(&service.get_post_comments_calls), comment_calls);
    assert_eq!(progress_log, vec![SubmitProgress::Sending]);
    assert!(draft.text.is_empty());
    assert!(!draft.is_submitting);
    Ok(())
}

#[tokio::test]
async fn test_stale_snapshot_is_discarded() -> Result<(), AppError> {
    let service = InstrumentedService::new(create_test_store());
    let sequence = RequestSequence::default();
    let mut thread = load_initial_state(&service, &sequence).await?;
    let thread_before = thread.clone();

    *service.interleaved_sequence.lock().expect("Should lock sequence.") = Some(sequence.clone());
    let author = create_test_user(AUTHOR_ID, true);
    service.store.create_comment(NewComment::new(&author, TEST_COMMUNITY_ID, TEST_POST_ID, None, String::from("Late")))?;

    let result = load_thread(&service, &sequence, TEST_COMMUNITY_ID, TEST_POST_ID).await;
    assert_eq!(result, Ok(None));
    thread.apply_refresh(result)?;
    assert_eq!(thread, thread_before);

    thread.apply_refresh(load_thread(&service, &sequence, TEST_COMMUNITY_ID, TEST_POST_ID).await)?;
    assert_eq!(thread.comment_count(), 1);
    Ok(())
}
