use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use validator::Validate;

use neighborly_core::expansion::ExpansionSet;
use neighborly_core::post::{is_emergency_category, publish_community_post, Post, PostForm};
use neighborly_core::service::ServerContentService;
use neighborly_core::thread::load_thread;
use neighborly_utils::constants::{GENERAL_CATEGORY, MAX_TITLE_LENGTH};
use neighborly_utils::errors::{AppError, InlineError};
use neighborly_utils::icons::LoadingIcon;
use neighborly_utils::routes::{get_post_id_memo, get_post_path};
use neighborly_utils::widget::{AuthorWidget, CommentCountWidget, EmergencyWidget, IsPinnedWidget, LoadIndicators, ProgressBar, TimeSinceWidget};

use crate::comment::CommentSection;
use crate::ranking::PostVotePanel;
use crate::state::{CommunityState, ThreadContext};

/// Page of a post with its comment thread
#[component]
pub fn PostPage() -> impl IntoView {
    let community_state = expect_context::<CommunityState>();
    let post_id = get_post_id_memo(use_params_map());
    let thread_context = ThreadContext::new(community_state.community_id, post_id);
    provide_context(thread_context);
    let expansion = RwSignal::new(ExpansionSet::default());
    let is_loading = RwSignal::new(false);
    let load_error = RwSignal::new(None);

    let _thread_resource = LocalResource::new(move || async move {
        is_loading.set(true);
        let community_id = thread_context.community_id.get();
        let post_id = thread_context.post_id.get();
        let sequence = thread_context.sequence.get_value();
        let result = load_thread(&ServerContentService, &sequence, &community_id, &post_id).await;
        match thread_context.apply_refresh(result) {
            Ok(()) => load_error.set(None),
            Err(e) => {
                log::error!("Failed to load thread of post {post_id}: {e}");
                load_error.set(Some(e));
            },
        }
        is_loading.set(false);
    });

    let has_post = move || thread_context.thread.read().post.is_some();
    let post = Memo::new(move |_| thread_context.thread.read().post.clone().unwrap_or_default());

    view! {
        <div class="flex flex-col gap-2 w-full">
            <ProgressBar percent=Signal::derive(move || thread_context.progress.read().progress().percent())/>
            <Show when=has_post>
                <PostBody post/>
                <CommentSection expansion/>
            </Show>
            <LoadIndicators is_loading load_error/>
        </div>
    }.into_any()
}

/// Body of a post, kept up to date with the latest fetched post
#[component]
pub fn PostBody(
    post: Memo<Post>,
) -> impl IntoView {
    let post_id = post.read_untracked().post_id.clone();
    let author = post.read_untracked().author.clone();

    view! {
        <div class="flex flex-col gap-2 p-3 rounded-sm bg-base-200">
            <div class="flex gap-2 items-center">
                <h1 class="text-2xl font-semibold">{move || post.read().title.clone()}</h1>
                <EmergencyWidget is_emergency=Signal::derive(move || post.read().is_emergency)/>
                <IsPinnedWidget is_pinned=Signal::derive(move || post.read().is_pinned())/>
            </div>
            <div class="flex flex-wrap gap-1 items-center">
                <AuthorWidget name=author.name role=author.role.to_string() badge=author.badge/>
                <TimeSinceWidget timestamp=Signal::derive(move || post.read().create_timestamp)/>
                <span class="text-sm opacity-70">{move || post.read().category_tag.clone()}</span>
                <span class="text-sm opacity-70">{move || post.read().geographic_tag.clone()}</span>
            </div>
            <div class="whitespace-pre-wrap">{move || post.read().content.clone()}</div>
            <div class="flex flex-wrap gap-2">
                <For
                    each=move || post.read().media_urls.clone()
                    key=|media_url| media_url.clone()
                    children=move |media_url| view! {
                        <img src=media_url class="max-h-96 rounded-sm"/>
                    }
                />
            </div>
            <div class="flex gap-2 items-center">
                <PostVotePanel post_id stats=Signal::derive(move || post.read().stats)/>
                <CommentCountWidget count=Signal::derive(move || post.read().stats.comment_count)/>
            </div>
        </div>
    }.into_any()
}

/// Returns the non-blank lines of `input`, trimmed
pub fn parse_media_urls(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Form to publish a post in the current community
#[component]
pub fn CreatePost() -> impl IntoView {
    let community_state = expect_context::<CommunityState>();
    let form = RwSignal::new(PostForm {
        category_tag: String::from(GENERAL_CATEGORY),
        ..Default::default()
    });
    let media_input = RwSignal::new(String::new());
    let submit_error = RwSignal::new(None);
    let is_submitting = RwSignal::new(false);
    let is_emergency = move || is_emergency_category(&form.read().category_tag);
    let navigate = use_navigate();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut post_form = form.get_untracked();
        post_form.media_urls = parse_media_urls(&media_input.read_untracked());
        if let Err(e) = post_form.validate() {
            submit_error.set(Some(AppError::from(e)));
            return;
        }
        let community_id = community_state.community_id.get_untracked();
        let navigate = navigate.clone();
        is_submitting.set(true);
        spawn_local(async move {
            match publish_community_post(community_id.clone(), post_form).await {
                Ok(post) => {
                    submit_error.set(None);
                    navigate(&get_post_path(&community_id, &post.post_id), Default::default());
                },
                Err(e) => {
                    log::error!("Failed to publish post in {community_id}: {e}");
                    submit_error.set(Some(e));
                },
            }
            is_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="flex flex-col gap-2 w-full 2xl:w-2/3">
            <h2 class="text-xl font-semibold">"New post"</h2>
            <input
                type="text"
                class="input input-bordered w-full"
                placeholder="Title"
                maxlength=MAX_TITLE_LENGTH.to_string()
                prop:value=move || form.read().title.clone()
                on:input=move |ev| form.update(|form| form.title = event_target_value(&ev))
            />
            <textarea
                class="textarea textarea-bordered w-full min-h-40"
                placeholder="Content"
                prop:value=move || form.read().content.clone()
                on:input=move |ev| form.update(|form| form.content = event_target_value(&ev))
            />
            <div class="flex flex-wrap gap-2">
                <input
                    type="text"
                    class="input input-bordered"
                    placeholder="Category"
                    prop:value=move || form.read().category_tag.clone()
                    on:input=move |ev| form.update(|form| form.category_tag = event_target_value(&ev))
                />
                <input
                    type="text"
                    class="input input-bordered"
                    placeholder="Street or area"
                    prop:value=move || form.read().geographic_tag.clone()
                    on:input=move |ev| form.update(|form| form.geographic_tag = event_target_value(&ev))
                />
            </div>
            <Show when=is_emergency>
                <div class="text-sm text-error">"Emergency alerts are sent to every member, including those who opted out of notifications."</div>
            </Show>
            <textarea
                class="textarea textarea-bordered w-full"
                placeholder="Image links, one per line"
                prop:value=media_input
                on:input=move |ev| media_input.set(event_target_value(&ev))
            />
            <InlineError error=submit_error/>
            <button type="submit" class="btn btn-primary w-fit" disabled=is_submitting>
                {move || match is_submitting.get() {
                    true => view! { <LoadingIcon class="h-5 w-5"/> }.into_any(),
                    false => view! { "Publish" }.into_any(),
                }}
            </button>
        </form>
    }.into_any()
}
