use neighborly_core::comment::{can_reply, shows_replies, NewComment, RepliesToggle};
use neighborly_core::community::Community;
use neighborly_core::expansion::ExpansionSet;
use neighborly_core::store::InMemoryContentStore;
use neighborly_utils::errors::AppError;

pub use crate::data_factory::*;

mod data_factory;

#[tokio::test]
async fn test_create_comment_and_reply() -> Result<(), AppError> {
    let store = create_test_store();
    let author = create_test_user(AUTHOR_ID, true);
    let neighbor = create_test_user(NEIGHBOR_ID, true);

    store.create_comment(NewComment::new(&author, TEST_COMMUNITY_ID, TEST_POST_ID, None, String::from("First")))?;
    let comments = store.get_post_comments(TEST_COMMUNITY_ID, TEST_POST_ID)?;
    assert_eq!(comments.len(), 1);
    let first_comment = &comments[0];
    assert_eq!(first_comment.content, "First");
    assert_eq!(first_comment.author, author.author_snapshot());
    assert_eq!(first_comment.parent_comment_id, None);
    assert!(first_comment.replies.is_empty());

    store.create_comment(NewComment::new(&neighbor, TEST_COMMUNITY_ID, TEST_POST_ID, Some(&first_comment.comment_id), String::from("Reply")))?;
    let comments = store.get_post_comments(TEST_COMMUNITY_ID, TEST_POST_ID)?;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].replies.len(), 1);
    assert_eq!(comments[0].replies[0].content, "Reply");
    assert_eq!(comments[0].replies[0].author_id, NEIGHBOR_ID);
    assert_eq!(comments[0].replies[0].parent_comment_id.as_deref(), Some(first_comment.comment_id.as_str()));

    let post = store.get_post_by_id(TEST_COMMUNITY_ID, TEST_POST_ID)?.expect("Post should exist.");
    assert_eq!(post.stats.comment_count, 2);
    Ok(())
}

#[tokio::test]
async fn test_create_comment_invalid() -> Result<(), AppError> {
    let store = create_test_store();
    let author = create_test_user(AUTHOR_ID, true);

    assert!(matches!(
        store.create_comment(NewComment::new(&author, TEST_COMMUNITY_ID, TEST_POST_ID, None, String::from("  "))),
        Err(AppError::InvalidRequest(_))
    ));
    assert!(matches!(
        store.create_comment(NewComment::new(&author, TEST_COMMUNITY_ID, TEST_POST_ID, Some("unknown"), String::from("Reply"))),
        Err(AppError::InvalidRequest(_))
    ));
    assert_eq!(
        store.create_comment(NewComment::new(&author, TEST_COMMUNITY_ID, "unknown", None, String::from("Hello"))),
        Err(AppError::NotFound)
    );
    assert_eq!(
        store.create_comment(NewComment::new(&author, "other-community", TEST_POST_ID, None, String::from("Hello"))),
        Err(AppError::NotFound)
    );

    assert!(store.get_post_comments(TEST_COMMUNITY_ID, TEST_POST_ID)?.is_empty());
    let post = store.get_post_by_id(TEST_COMMUNITY_ID, TEST_POST_ID)?.expect("Post should exist.");
    assert_eq!(post.stats.comment_count, 0);
    Ok(())
}

#[tokio::test]
async fn test_create_comment_trims_content() -> Result<(), AppError> {
    let store = create_test_store();
    let author = create_test_user(AUTHOR_ID, true);

    store.create_comment(NewComment::new(&author, TEST_COMMUNITY_ID, TEST_POST_ID, None, String::from("  Count me in!\n ")))?;
    let comments = store.get_post_comments(TEST_COMMUNITY_ID, TEST_POST_ID)?;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "Count me in!");
    Ok(())
}

#[tokio::test]
async fn test_get_post_comments_of_other_community() -> Result<(), AppError> {
    let mut seed = create_test_seed();
    let author = create_test_user(AUTHOR_ID, true);
    seed.communities.push(Community {
        community_id: String::from("other-community"),
        name: String::from("Other community"),
        geographic_tag: String::from("Pine road"),
        description: String::new(),
    });
    let mut other_post = create_test_post("other-post", &author, 0);
    other_post.community_id = String::from("other-community");
    seed.posts.push(other_post);
    let mut other_comment = create_flat_comment("other-comment", None, &author, 5);
    other_comment.post_id = String::from("other-post");
    seed.comments = vec![create_flat_comment("test-comment", None, &author, 5), other_comment];
    let store = InMemoryContentStore::new(seed);

    assert_eq!(store.get_post_comments("other-community", TEST_POST_ID), Err(AppError::NotFound));
    assert_eq!(store.get_post_comments(TEST_COMMUNITY_ID, "other-post"), Err(AppError::NotFound));
    assert_eq!(store.get_post_comments(TEST_COMMUNITY_ID, "unknown"), Err(AppError::NotFound));

    let comments = store.get_post_comments(TEST_COMMUNITY_ID, TEST_POST_ID)?;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment_id, "test-comment");
    let other_comments = store.get_post_comments("other-community", "other-post")?;
    assert_eq!(other_comments.len(), 1);
    assert_eq!(other_comments[0].comment_id, "other-comment");
    Ok(())
}

#[tokio::test]
async fn test_get_post_comments_tree() -> Result<(), AppError> {
    let mut seed = create_test_seed();
    let author = create_test_user(AUTHOR_ID, true);
    seed.comments = vec![
        create_flat_comment("top-new", None, &author, 1),
        create_flat_comment("top-old", None, &author, 60),
        create_flat_comment("depth-1", Some("top-old"), &author, 50),
        create_flat_comment("depth-2", Some("depth-1"), &author, 40),
        create_flat_comment("depth-3", Some("depth-2"), &author, 30),
        create_flat_comment("depth-4", Some("depth-3"), &author, 20),
    ];
    let store = InMemoryContentStore::new(seed);

    let comments = store.get_post_comments(TEST_COMMUNITY_ID, TEST_POST_ID)?;
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].comment_id, "top-old");
    assert_eq!(comments[1].comment_id, "top-new");

    let mut depth = 0;
    let mut comment = &comments[0];
    while let Some(reply) = comment.replies.first() {
        assert_eq!(can_reply(depth), depth < 3);
        depth += 1;
        comment = reply;
    }
    assert_eq!(comment.comment_id, "depth-4");
    assert_eq!(depth, 4);
    assert!(!can_reply(depth));
    Ok(())
}

#[tokio::test]
async fn test_replies_toggle_with_two_replies() -> Result<(), AppError> {
    let mut seed = create_test_seed();
    let author = create_test_user(AUTHOR_ID, true);
    seed.comments = vec![
        create_flat_comment("parent", None, &author, 30),
        create_flat_comment("reply-1", Some("parent"), &author, 20),
        create_flat_comment("reply-2", Some("parent"), &author, 10),
        create_flat_comment("sibling", None, &author, 5),
        create_flat_comment("sibling-reply", Some("sibling"), &author, 1),
    ];
    let store = InMemoryContentStore::new(seed);
    let comments = store.get_post_comments(TEST_COMMUNITY_ID, TEST_POST_ID)?;
    let parent = &comments[0];
    let sibling = &comments[1];
    let mut expansion = ExpansionSet::default();

    assert_eq!(RepliesToggle::for_comment(parent, &expansion).map(|toggle| toggle.label()), Some(String::from("Show 2 Replies")));
    assert!(!shows_replies(parent, &expansion));

    expansion.toggle(&parent.comment_id);
    assert_eq!(RepliesToggle::for_comment(parent, &expansion).map(|toggle| toggle.label()), Some(String::from("Hide Replies")));
    assert!(shows_replies(parent, &expansion));
    let reply_ids: Vec<&str> = parent.replies.iter().map(|reply| reply.comment_id.as_str()).collect();
    assert_eq!(reply_ids, vec!["reply-1", "reply-2"]);

    assert!(!shows_replies(sibling, &expansion));
    expansion.set_expanded(&sibling.comment_id, true);
    expansion.set_expanded(&parent.comment_id, false);
    assert!(shows_replies(sibling, &expansion));
    assert!(!shows_replies(parent, &expansion));
    assert!(!expansion.is_expanded("reply-1"));
    Ok(())
}
