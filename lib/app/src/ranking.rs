use leptos::prelude::*;
use leptos::task::spawn_local;

use neighborly_core::post::PostStats;
use neighborly_core::ranking::{cast_post_vote, fetch_post_vote, VoteState, VoteValue};
use neighborly_core::service::ServerContentService;
use neighborly_utils::errors::{AppError, InlineError};
use neighborly_utils::icons::{ArrowDownIcon, ArrowUpIcon};
use neighborly_utils::unpack::handle_mutation_result;
use neighborly_utils::widget::ScoreIndicator;

use crate::state::CommunityState;

/// Component to display and modify the vote of the current user on a post or comment
#[component]
pub fn VotePanel(
    #[prop(into)]
    vote: Signal<VoteValue>,
    #[prop(into)]
    score: Signal<i64>,
    #[prop(into)]
    vote_error: Signal<Option<AppError>>,
    is_pending: RwSignal<bool>,
    on_vote: Callback<VoteValue>,
) -> impl IntoView {
    let on_click = move |clicked: VoteValue| {
        if !is_pending.get_untracked() {
            on_vote.run(clicked);
        }
    };
    view! {
        <div class="flex flex-col gap-1">
            <div class="flex items-center gap-1">
                <button
                    class=get_vote_button_css(vote, VoteValue::Up)
                    aria-label="Upvote"
                    disabled=is_pending
                    on:click=move |_| on_click(VoteValue::Up)
                >
                    <ArrowUpIcon class=Signal::derive(|| String::from("h-4 w-4"))/>
                </button>
                <ScoreIndicator score/>
                <button
                    class=get_vote_button_css(vote, VoteValue::Down)
                    aria-label="Downvote"
                    disabled=is_pending
                    on:click=move |_| on_click(VoteValue::Down)
                >
                    <ArrowDownIcon class=Signal::derive(|| String::from("h-4 w-4"))/>
                </button>
            </div>
            <InlineError error=vote_error/>
        </div>
    }.into_any()
}

/// Vote panel of a post. Fetches the vote of the current user on mount.
#[component]
pub fn PostVotePanel(
    post_id: String,
    #[prop(into)]
    stats: Signal<PostStats>,
) -> impl IntoView {
    let community_state = expect_context::<CommunityState>();
    let vote_state = RwSignal::new(VoteState::new(VoteValue::None, stats.get_untracked()));
    let vote_error = RwSignal::new(None);
    let is_pending = RwSignal::new(false);
    let user_id = StoredValue::new(community_state.user.user_id.clone());
    let post_id = StoredValue::new(post_id);

    // Stats of a refreshed post are the latest known to the content service.
    Effect::new(move |_| {
        let stats = stats.get();
        vote_state.update(|vote_state| vote_state.stats = stats);
    });

    let _vote_resource = LocalResource::new(move || async move {
        match fetch_post_vote(&ServerContentService, &user_id.get_value(), &post_id.get_value()).await {
            Ok(vote) => vote_state.update(|vote_state| vote_state.vote = vote),
            Err(e) => log::error!("Failed to get vote on post {}: {e}", post_id.get_value()),
        }
    });

    let on_vote = Callback::new(move |clicked: VoteValue| {
        let community_id = community_state.community_id.get_untracked();
        is_pending.set(true);
        spawn_local(async move {
            let mut new_state = vote_state.get_untracked();
            let result = cast_post_vote(
                &ServerContentService,
                &mut new_state,
                &post_id.get_value(),
                &user_id.get_value(),
                &community_id,
                clicked,
            ).await;
            handle_mutation_result(result.map(|_| new_state), vote_state, vote_error);
            is_pending.set(false);
        });
    });

    view! {
        <VotePanel
            vote=Signal::derive(move || vote_state.read().vote)
            score=Signal::derive(move || vote_state.read().stats.score())
            vote_error
            is_pending
            on_vote
        />
    }
}

/// Returns the css classes of a vote button, highlighted when `target` is the active vote
pub fn get_vote_button_css(vote: Signal<VoteValue>, target: VoteValue) -> Signal<&'static str> {
    Signal::derive(move || match (target, vote.get() == target) {
        (VoteValue::Up, true) => "p-1 rounded-full bg-success",
        (VoteValue::Down, true) => "p-1 rounded-full bg-error",
        (VoteValue::Down, false) => "p-1 rounded-full hover:bg-error",
        _ => "p-1 rounded-full hover:bg-success",
    })
}

#[cfg(test)]
mod tests {
    use leptos::prelude::*;
    use neighborly_core::ranking::VoteValue;
    use crate::ranking::get_vote_button_css;

    #[test]
    fn test_get_vote_button_css() {
        let owner = Owner::new();
        owner.set();
        let vote_signal = RwSignal::new(VoteValue::None);
        let upvote_css = get_vote_button_css(vote_signal.into(), VoteValue::Up);
        let downvote_css = get_vote_button_css(vote_signal.into(), VoteValue::Down);

        assert_eq!(upvote_css.get(), "p-1 rounded-full hover:bg-success");
        assert_eq!(downvote_css.get(), "p-1 rounded-full hover:bg-error");

        vote_signal.set(VoteValue::Up);
        assert_eq!(upvote_css.get(), "p-1 rounded-full bg-success");
        assert_eq!(downvote_css.get(), "p-1 rounded-full hover:bg-error");

        vote_signal.set(VoteValue::Down);
        assert_eq!(upvote_css.get(), "p-1 rounded-full hover:bg-success");
        assert_eq!(downvote_css.get(), "p-1 rounded-full bg-error");
    }
}
