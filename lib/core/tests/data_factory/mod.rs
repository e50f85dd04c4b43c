#![allow(dead_code)]

use chrono::{Duration, Utc};
use neighborly_core::comment::{Comment, CommentStats};
use neighborly_core::community::{Community, Membership, MembershipStatus};
use neighborly_core::post::{ContentStatus, Post, PostStats};
use neighborly_core::store::{InMemoryContentStore, StoreSeed};
use neighborly_core::user::{User, UserRole};

pub const TEST_COMMUNITY_ID: &str = "test-community";
pub const TEST_POST_ID: &str = "test-post";
pub const AUTHOR_ID: &str = "author";
pub const NEIGHBOR_ID: &str = "neighbor";
pub const UNVERIFIED_ID: &str = "unverified";
pub const PENDING_ID: &str = "pending";
pub const REJECTED_ID: &str = "rejected";

pub fn create_test_user(user_id: &str, is_verified: bool) -> User {
    User {
        user_id: user_id.to_string(),
        display_name: format!("{user_id} name"),
        role: UserRole::Resident,
        badge_url: None,
        badge: None,
        is_verified,
    }
}

pub fn create_membership(user_id: &str, status: MembershipStatus) -> Membership {
    Membership {
        community_id: TEST_COMMUNITY_ID.to_string(),
        user_id: user_id.to_string(),
        status,
        join_timestamp: Utc::now() - Duration::days(1),
    }
}

pub fn create_test_post(post_id: &str, author: &User, upvotes: u32) -> Post {
    Post {
        post_id: post_id.to_string(),
        author_id: author.user_id.clone(),
        community_id: TEST_COMMUNITY_ID.to_string(),
        title: String::from("Street party"),
        content: String::from("Bring a dish."),
        category_tag: String::from("events"),
        geographic_tag: String::from("Oak avenue"),
        media_urls: Vec::new(),
        stats: PostStats { upvotes, downvotes: 0, comment_count: 0 },
        author: author.author_snapshot(),
        status: ContentStatus::Active,
        is_emergency: false,
        create_timestamp: Utc::now() - Duration::hours(1),
    }
}

pub fn create_flat_comment(comment_id: &str, parent_comment_id: Option<&str>, author: &User, minutes_old: i64) -> Comment {
    Comment {
        comment_id: comment_id.to_string(),
        post_id: TEST_POST_ID.to_string(),
        author_id: author.user_id.clone(),
        parent_comment_id: parent_comment_id.map(str::to_string),
        content: format!("Comment {comment_id}"),
        author: author.author_snapshot(),
        stats: CommentStats { upvotes: 3, downvotes: 1 },
        status: ContentStatus::Active,
        create_timestamp: Utc::now() - Duration::minutes(minutes_old),
        replies: Vec::new(),
    }
}

/// Community with an author, a neighbor and users lacking access, plus one post with 10 upvotes and no comment.
pub fn create_test_seed() -> StoreSeed {
    let author = create_test_user(AUTHOR_ID, true);
    StoreSeed {
        users: vec![
            author.clone(),
            create_test_user(NEIGHBOR_ID, true),
            create_test_user(UNVERIFIED_ID, false),
            create_test_user(PENDING_ID, true),
            create_test_user(REJECTED_ID, true),
        ],
        communities: vec![Community {
            community_id: TEST_COMMUNITY_ID.to_string(),
            name: String::from("Test community"),
            geographic_tag: String::from("Oak avenue"),
            description: String::new(),
        }],
        memberships: vec![
            create_membership(AUTHOR_ID, MembershipStatus::Approved),
            create_membership(NEIGHBOR_ID, MembershipStatus::Approved),
            create_membership(UNVERIFIED_ID, MembershipStatus::Approved),
            create_membership(PENDING_ID, MembershipStatus::Pending),
            create_membership(REJECTED_ID, MembershipStatus::Rejected),
        ],
        posts: vec![create_test_post(TEST_POST_ID, &author, 10)],
        comments: Vec::new(),
        notification_preferences: Vec::new(),
    }
}

pub fn create_test_store() -> InMemoryContentStore {
    InMemoryContentStore::new(create_test_seed())
}
