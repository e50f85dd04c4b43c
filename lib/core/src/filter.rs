use std::cmp::Ordering;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::post::Post;
use crate::search::matches_query;

#[derive(Clone, Copy, Debug, Default, Display, EnumIter, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum PostSortType {
    #[default]
    Recent,
    Top,
    Discussed,
}

/// Client-side filter over the posts of a community.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFilter {
    pub category: Option<String>,
    pub query: String,
    pub emergency_only: bool,
    pub include_archived: bool,
    pub sort: PostSortType,
}

impl PostFilter {
    pub fn accepts(&self, post: &Post) -> bool {
        (self.include_archived || !post.is_archived())
            && (!self.emergency_only || post.is_emergency)
            && self.category.as_ref().is_none_or(|category| post.category_tag.eq_ignore_ascii_case(category))
            && matches_query(post, &self.query)
    }

    /// Returns the accepted posts, pinned posts first, then in the order of `self.sort`.
    pub fn apply(&self, posts: &[Post]) -> Vec<Post> {
        let mut filtered_posts: Vec<Post> = posts.iter().filter(|post| self.accepts(post)).cloned().collect();
        filtered_posts.sort_by(|l, r| compare_posts(l, r, self.sort));
        filtered_posts
    }
}

fn compare_posts(l: &Post, r: &Post, sort: PostSortType) -> Ordering {
    let by_recency = r.create_timestamp.cmp(&l.create_timestamp);
    r.is_pinned().cmp(&l.is_pinned()).then_with(|| match sort {
        PostSortType::Recent => by_recency,
        PostSortType::Top => r.stats.score().cmp(&l.stats.score()).then(by_recency),
        PostSortType::Discussed => r.stats.comment_count.cmp(&l.stats.comment_count).then(by_recency),
    })
}

/// Returns the distinct categories of `posts`, sorted alphabetically
pub fn get_categories(posts: &[Post]) -> Vec<String> {
    let mut categories: Vec<String> = posts.iter().map(|post| post.category_tag.to_ascii_lowercase()).collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Component to select how posts are sorted
#[component]
pub fn PostSortWidget(
    filter: RwSignal<PostFilter>,
) -> impl IntoView {
    view! {
        <div class="join rounded-none w-fit">
        {
            PostSortType::iter().map(|sort_type| {
                let class = move || match filter.read().sort == sort_type {
                    true => "btn btn-sm join-item btn-primary",
                    false => "btn btn-sm join-item btn-ghost",
                };
                view! {
                    <button
                        class=class
                        on:click=move |_| {
                            if filter.read_untracked().sort != sort_type {
                                filter.update(|filter| filter.sort = sort_type);
                            }
                        }
                    >
                        {sort_type.to_string()}
                    </button>
                }
            }).collect_view()
        }
        </div>
    }.into_any()
}
