use leptos::prelude::*;
use leptos::task::spawn_local;

use neighborly_core::comment::{can_reply, find_comment, shows_replies, CommentDraft, CommentNodeState, NewComment, RepliesToggle};
use neighborly_core::expansion::ExpansionSet;
use neighborly_core::post::ContentStatus;
use neighborly_core::ranking::{cast_comment_vote, fetch_comment_vote, VoteValue};
use neighborly_core::service::ServerContentService;
use neighborly_utils::errors::InlineError;
use neighborly_utils::icons::{LoadingIcon, ReplyIcon};
use neighborly_utils::widget::{AuthorWidget, IsPinnedWidget, TimeSinceWidget};

use crate::ranking::VotePanel;
use crate::state::{CommunityState, ThreadContext};

const DEPTH_TO_COLOR_MAPPING: [&str; 3] = [
    "bg-blue-500",
    "bg-green-500",
    "bg-yellow-500",
];

/// Comment section of a post: the top-level comment form and the comment tree
#[component]
pub fn CommentSection(
    expansion: RwSignal<ExpansionSet>,
) -> impl IntoView {
    let thread_context = expect_context::<ThreadContext>();
    let comment_count = move || thread_context.thread.read().comment_count();
    let comment_ids = move || -> Vec<String> {
        thread_context.thread.read().comments.iter().map(|comment| comment.comment_id.clone()).collect()
    };

    view! {
        <div class="flex flex-col gap-2">
            <h2 class="text-lg font-semibold">{move || format!("Comments ({})", comment_count())}</h2>
            <CommentForm/>
            <div class="flex flex-col h-fit">
                <For
                    each=comment_ids
                    key=|comment_id| comment_id.clone()
                    children=move |comment_id| view! {
                        <CommentBox comment_id depth=0 expansion/>
                    }.into_any()
                />
            </div>
        </div>
    }.into_any()
}

/// Form to add a top-level comment to a post
#[component]
pub fn CommentForm() -> impl IntoView {
    let thread_context = expect_context::<ThreadContext>();
    let community_state = expect_context::<CommunityState>();
    let draft = RwSignal::new(CommentDraft::default());
    let submit_error = RwSignal::new(None);
    let author = StoredValue::new(community_state.user);

    let on_submit = move |_| {
        let Some(content) = draft.try_update(|draft| draft.begin_submit()).flatten() else {
            return;
        };
        let new_comment = author.with_value(|author| NewComment::new(
            author,
            &thread_context.community_id.get_untracked(),
            &thread_context.post_id.get_untracked(),
            None,
            content,
        ));
        thread_context.spawn_comment_submission(new_comment, move |result| {
            draft.update(|draft| draft.finish_submit());
            submit_error.set(result.err());
        });
    };

    view! {
        <div class="flex flex-col gap-1">
            <textarea
                class="textarea textarea-bordered w-full"
                placeholder="Share your thoughts with your neighbors"
                prop:value=move || draft.read().text.clone()
                on:input=move |ev| draft.update(|draft| draft.text = event_target_value(&ev))
            />
            <div class="flex justify-between items-center gap-2">
                <InlineError error=submit_error/>
                <button
                    class="btn btn-primary btn-sm"
                    disabled=move || draft.read().is_submitting
                    on:click=on_submit
                >
                    "Comment"
                </button>
            </div>
        </div>
    }.into_any()
}

/// Recursive comment component. Each instance owns its reply form and vote.
#[component]
pub fn CommentBox(
    comment_id: String,
    depth: usize,
    expansion: RwSignal<ExpansionSet>,
) -> impl IntoView {
    let thread_context = expect_context::<ThreadContext>();
    let community_state = expect_context::<CommunityState>();
    let comment_id = StoredValue::new(comment_id);
    let comment = Memo::new(move |_| thread_context.thread.with(|thread| {
        comment_id.with_value(|comment_id| find_comment(&thread.comments, comment_id).cloned())
    }));
    let node_state = RwSignal::new(
        comment.with_untracked(|comment| comment.as_ref().map(CommentNodeState::new).unwrap_or_default())
    );
    let vote_error = RwSignal::new(None);
    let is_vote_pending = RwSignal::new(false);
    let user_id = StoredValue::new(community_state.user.user_id.clone());

    let _vote_resource = LocalResource::new(move || async move {
        match fetch_comment_vote(&ServerContentService, &user_id.get_value(), &comment_id.get_value()).await {
            Ok(vote) => node_state.update(|node_state| node_state.vote_state.vote = vote),
            Err(e) => log::error!("Failed to get vote on comment {}: {e}", comment_id.get_value()),
        }
    });

    let on_vote = Callback::new(move |clicked: VoteValue| {
        let community_id = community_state.community_id.get_untracked();
        is_vote_pending.set(true);
        spawn_local(async move {
            let mut vote_state = node_state.read_untracked().vote_state;
            match cast_comment_vote(
                &ServerContentService,
                &mut vote_state,
                &comment_id.get_value(),
                &user_id.get_value(),
                &community_id,
                clicked,
            ).await {
                Ok(_) => {
                    node_state.update(|node_state| node_state.vote_state = vote_state);
                    vote_error.set(None);
                },
                Err(e) => {
                    log::error!("Failed to vote on comment {}: {e}", comment_id.get_value());
                    vote_error.set(Some(e));
                },
            }
            is_vote_pending.set(false);
        });
    });

    let color_bar_css = format!(
        "{} rounded-full w-1 shrink-0",
        DEPTH_TO_COLOR_MAPPING[depth % DEPTH_TO_COLOR_MAPPING.len()]
    );
    let replies_toggle = Memo::new(move |_| comment.with(|comment| {
        comment.as_ref().and_then(|comment| expansion.with(|expansion| RepliesToggle::for_comment(comment, expansion)))
    }));
    let reply_ids = move || comment.with(|comment| match comment {
        Some(comment) if expansion.with(|expansion| shows_replies(comment, expansion)) => {
            comment.replies.iter().map(|reply| reply.comment_id.clone()).collect()
        },
        _ => Vec::new(),
    });

    view! {
        {
            move || comment.get().map(|comment| {
                let is_pinned = comment.status == ContentStatus::Pinned;
                view! {
                    <div class="flex gap-2 pt-3">
                        <div class=color_bar_css.clone()/>
                        <div class="flex flex-col gap-1 grow">
                            <div class="flex gap-1 items-center">
                                <AuthorWidget
                                    name=comment.author.name.clone()
                                    role=comment.author.role.to_string()
                                    badge=comment.author.badge.clone()
                                />
                                <IsPinnedWidget is_pinned/>
                                <TimeSinceWidget timestamp=comment.create_timestamp/>
                            </div>
                            <div class="whitespace-pre-wrap">{comment.content.clone()}</div>
                        </div>
                    </div>
                }
            })
        }
        <div class="flex gap-2 items-start pl-3">
            <VotePanel
                vote=Signal::derive(move || node_state.read().vote_state.vote)
                score=Signal::derive(move || node_state.read().vote_state.stats.score())
                vote_error
                is_pending=is_vote_pending
                on_vote
            />
            <Show when=move || can_reply(depth)>
                <button
                    class="btn btn-ghost btn-xs"
                    aria-label="Reply"
                    on:click=move |_| node_state.update(|node_state| node_state.toggle_reply_form())
                >
                    <ReplyIcon/>
                    "Reply"
                </button>
            </Show>
            {
                move || replies_toggle.get().map(|toggle| view! {
                    <button
                        class="btn btn-ghost btn-xs"
                        on:click=move |_| expansion.update(|expansion| comment_id.with_value(|comment_id| expansion.toggle(comment_id)))
                    >
                        {toggle.label()}
                    </button>
                })
            }
        </div>
        <Show when=move || node_state.read().is_reply_open>
            <ReplyForm comment_id=comment_id.get_value() node_state/>
        </Show>
        <div class="flex flex-col pl-4">
            <For
                each=reply_ids
                key=|reply_id| reply_id.clone()
                children=move |reply_id| view! {
                    <CommentBox comment_id=reply_id depth=depth+1 expansion/>
                }.into_any()
            />
        </div>
    }.into_any()
}

/// Inline form to reply to a comment
#[component]
pub fn ReplyForm(
    comment_id: String,
    node_state: RwSignal<CommentNodeState>,
) -> impl IntoView {
    let thread_context = expect_context::<ThreadContext>();
    let community_state = expect_context::<CommunityState>();
    let author = StoredValue::new(community_state.user);
    let comment_id = StoredValue::new(comment_id);
    let reply_error = Signal::derive(move || node_state.read().reply_error.clone());

    let on_submit = move |_| {
        let Some(content) = node_state.try_update(|node_state| node_state.reply_draft.begin_submit()).flatten() else {
            return;
        };
        let new_comment = author.with_value(|author| NewComment::new(
            author,
            &thread_context.community_id.get_untracked(),
            &thread_context.post_id.get_untracked(),
            Some(&comment_id.get_value()),
            content,
        ));
        thread_context.spawn_comment_submission(new_comment, move |result| {
            node_state.update(|node_state| node_state.on_reply_result(result));
        });
    };

    view! {
        <div class="flex flex-col gap-1 pl-3 py-1">
            <textarea
                class="textarea textarea-bordered textarea-sm w-full"
                placeholder="Write a reply"
                prop:value=move || node_state.read().reply_draft.text.clone()
                on:input=move |ev| node_state.update(|node_state| node_state.reply_draft.text = event_target_value(&ev))
            />
            <div class="flex justify-between items-center gap-2">
                <InlineError error=reply_error/>
                <div class="flex gap-1">
                    <button
                        class="btn btn-ghost btn-sm"
                        on:click=move |_| node_state.update(|node_state| node_state.toggle_reply_form())
                    >
                        "Cancel"
                    </button>
                    <button
                        class="btn btn-primary btn-sm"
                        disabled=move || node_state.read().reply_draft.is_submitting
                        on:click=on_submit
                    >
                        {move || match node_state.read().reply_draft.is_submitting {
                            true => view! { <LoadingIcon class="h-4 w-4"/> }.into_any(),
                            false => view! { "Reply" }.into_any(),
                        }}
                    </button>
                </div>
            </div>
        </div>
    }.into_any()
}
