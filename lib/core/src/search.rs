use leptos::prelude::*;
use leptos_use::signal_debounced;

use neighborly_utils::constants::{MAX_SEARCH_SUGGESTIONS, SEARCH_DEBOUNCE_DELAY_MS};

use crate::post::Post;

#[derive(Clone, Copy, Debug)]
pub struct SearchState {
    pub search_input: RwSignal<String>,
    pub search_input_debounced: Signal<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        let search_input = RwSignal::new(String::new());
        SearchState {
            search_input,
            search_input_debounced: signal_debounced(search_input, SEARCH_DEBOUNCE_DELAY_MS),
        }
    }
}

/// Returns whether the title, content or geographic tag of `post` contains `query`, ignoring case. Blank queries match everything.
pub fn matches_query(post: &Post, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty()
        || post.title.to_lowercase().contains(&query)
        || post.content.to_lowercase().contains(&query)
        || post.geographic_tag.to_lowercase().contains(&query)
}

/// Returns up to `MAX_SEARCH_SUGGESTIONS` distinct titles of posts matching `query`, titles starting with it first.
pub fn get_search_suggestions(posts: &[Post], query: &str) -> Vec<String> {
    let normalized_query = query.trim().to_lowercase();
    if normalized_query.is_empty() {
        return Vec::new();
    }
    let mut matching_titles: Vec<&String> = posts
        .iter()
        .filter(|post| matches_query(post, &normalized_query))
        .map(|post| &post.title)
        .collect();
    matching_titles.sort_by_key(|title| !title.to_lowercase().starts_with(&normalized_query));

    let mut suggestions: Vec<String> = Vec::new();
    for title in matching_titles {
        if !suggestions.contains(title) {
            suggestions.push(title.clone());
        }
        if suggestions.len() == MAX_SEARCH_SUGGESTIONS {
            break;
        }
    }
    suggestions
}
