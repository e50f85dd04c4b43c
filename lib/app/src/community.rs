use leptos::prelude::*;

use neighborly_core::filter::{get_categories, PostFilter, PostSortWidget};
use neighborly_core::post::Post;
use neighborly_core::search::{get_search_suggestions, SearchState};
use neighborly_core::service::{ContentService, ServerContentService};
use neighborly_utils::errors::AppError;
use neighborly_utils::icons::PlusIcon;
use neighborly_utils::routes::{get_community_path, get_create_post_path, get_post_path};
use neighborly_utils::unpack::{handle_initial_load, LocalUnpack};
use neighborly_utils::widget::{AuthorWidget, CommentCountWidget, EmergencyWidget, IsPinnedWidget, LoadIndicators, ScoreIndicator, TimeSinceWidget};

use crate::search::SearchBar;
use crate::state::CommunityState;

/// Banner with the name and location of the current community
#[component]
pub fn CommunityBanner() -> impl IntoView {
    let community_state = expect_context::<CommunityState>();
    let community_id = community_state.community_id;
    let community_resource = LocalResource::new(move || async move {
        ServerContentService.get_community(&community_id.get()).await?.ok_or(AppError::NotFound)
    });

    view! {
        <LocalUnpack resource=community_resource let:community>
            <a
                href=get_community_path(&community.community_id)
                class="flex flex-col gap-1 p-3 rounded-sm bg-base-200 hover:bg-base-300"
            >
                <span class="text-2xl font-semibold">{community.name.clone()}</span>
                <span class="text-sm opacity-80">{community.geographic_tag.clone()}</span>
                <span class="text-sm">{community.description.clone()}</span>
            </a>
        </LocalUnpack>
    }
}

/// Posts of the current community, filtered and sorted on the client
#[component]
pub fn CommunityFeed() -> impl IntoView {
    let community_state = expect_context::<CommunityState>();
    let community_id = community_state.community_id;
    let post_vec = RwSignal::new(Vec::<Post>::new());
    let is_loading = RwSignal::new(false);
    let load_error = RwSignal::new(None);
    let filter = RwSignal::new(PostFilter::default());
    let search_state = SearchState::default();

    let _posts_resource = LocalResource::new(move || async move {
        is_loading.set(true);
        let initial_load = ServerContentService.get_community_posts(&community_id.get()).await;
        handle_initial_load(initial_load, post_vec, load_error);
        is_loading.set(false);
    });

    Effect::new(move |_| {
        let query = search_state.search_input_debounced.get();
        filter.update(|filter| filter.query = query);
    });

    let filtered_post_vec = Memo::new(move |_| filter.with(|filter| post_vec.with(|post_vec| filter.apply(post_vec))));
    let suggestions = Signal::derive(move || post_vec.with(|post_vec| {
        get_search_suggestions(post_vec, &search_state.search_input_debounced.read())
    }));
    let categories = Memo::new(move |_| post_vec.with(|post_vec| get_categories(post_vec)));

    view! {
        <div class="flex flex-col gap-2">
            <div class="flex flex-wrap gap-2 items-center justify-between">
                <SearchBar search_state suggestions/>
                <a href=move || get_create_post_path(&community_id.read()) class="btn btn-primary btn-sm">
                    <PlusIcon/>
                    "New post"
                </a>
            </div>
            <div class="flex flex-wrap gap-2 items-center">
                <PostSortWidget filter/>
                <select
                    class="select select-bordered select-sm"
                    on:change=move |ev| {
                        let category = event_target_value(&ev);
                        filter.update(|filter| filter.category = (!category.is_empty()).then_some(category));
                    }
                >
                    <option value="">"All categories"</option>
                    <For
                        each=move || categories.get()
                        key=|category| category.clone()
                        children=move |category| view! {
                            <option value=category.clone()>{category.clone()}</option>
                        }
                    />
                </select>
                <label class="label cursor-pointer gap-1">
                    <input
                        type="checkbox"
                        class="checkbox checkbox-sm"
                        prop:checked=move || filter.read().emergency_only
                        on:change=move |ev| filter.update(|filter| filter.emergency_only = event_target_checked(&ev))
                    />
                    <span class="label-text">"Emergencies only"</span>
                </label>
                <label class="label cursor-pointer gap-1">
                    <input
                        type="checkbox"
                        class="checkbox checkbox-sm"
                        prop:checked=move || filter.read().include_archived
                        on:change=move |ev| filter.update(|filter| filter.include_archived = event_target_checked(&ev))
                    />
                    <span class="label-text">"Show archived"</span>
                </label>
            </div>
            <ul class="flex flex-col gap-1">
                <For
                    each=move || filtered_post_vec.get()
                    key=|post| (post.post_id.clone(), post.stats)
                    children=move |post| view! {
                        <li><PostMiniature post/></li>
                    }
                />
            </ul>
            <Show when=move || !is_loading.get() && load_error.read().is_none() && filtered_post_vec.read().is_empty()>
                <div class="text-center opacity-70 py-4">"No post matches these filters."</div>
            </Show>
            <LoadIndicators is_loading load_error/>
        </div>
    }.into_any()
}

/// Summary of a post in a feed
#[component]
pub fn PostMiniature(
    post: Post,
) -> impl IntoView {
    let post_path = get_post_path(&post.community_id, &post.post_id);
    let is_pinned = post.is_pinned();
    let is_archived = post.is_archived();
    view! {
        <a href=post_path class="flex flex-col gap-1 p-2 rounded-sm hover:bg-base-200" class:opacity-60=is_archived>
            <div class="flex gap-2 items-center">
                <span class="text-lg font-medium">{post.title.clone()}</span>
                <EmergencyWidget is_emergency=post.is_emergency/>
                <IsPinnedWidget is_pinned/>
            </div>
            <div class="flex gap-1 items-center text-sm">
                <ScoreIndicator score=post.stats.score()/>
                <CommentCountWidget count=post.stats.comment_count/>
                <AuthorWidget name=post.author.name.clone() role=post.author.role.to_string() badge=post.author.badge.clone()/>
                <TimeSinceWidget timestamp=post.create_timestamp/>
                <span class="opacity-70">{post.category_tag.clone()}</span>
                <span class="opacity-70">{post.geographic_tag.clone()}</span>
            </div>
        </a>
    }
}
