use leptos::prelude::*;

use neighborly_core::search::SearchState;
use neighborly_utils::checks::check_search_query;
use neighborly_utils::constants::MAX_SEARCH_QUERY_LENGTH;
use neighborly_utils::errors::InlineError;
use neighborly_utils::icons::SearchIcon;

/// Search input of a community feed, with suggestions computed from the debounced input
#[component]
pub fn SearchBar(
    search_state: SearchState,
    #[prop(into)]
    suggestions: Signal<Vec<String>>,
) -> impl IntoView {
    let search_input = search_state.search_input;
    let show_suggestions = RwSignal::new(false);
    let query_error = Signal::derive(move || check_search_query(&search_input.read()).err());

    view! {
        <div class="relative flex flex-col gap-1 w-full 2xl:w-1/2">
            <label class="input input-bordered flex items-center gap-2">
                <SearchIcon/>
                <input
                    type="search"
                    class="grow"
                    placeholder="Search posts"
                    maxlength=MAX_SEARCH_QUERY_LENGTH.to_string()
                    prop:value=search_input
                    on:input=move |ev| {
                        search_input.set(event_target_value(&ev));
                        show_suggestions.set(true);
                    }
                    on:focusout=move |_| show_suggestions.set(false)
                />
            </label>
            <InlineError error=query_error/>
            <Show when=move || show_suggestions.get() && !suggestions.read().is_empty()>
                <ul class="absolute top-12 z-10 menu w-full bg-base-200 rounded-sm shadow-sm">
                    <For
                        each=move || suggestions.get()
                        key=|suggestion| suggestion.clone()
                        children=move |suggestion| {
                            let selected = suggestion.clone();
                            view! {
                                <li>
                                    <button on:mousedown=move |_| {
                                        search_input.set(selected.clone());
                                        show_suggestions.set(false);
                                    }>
                                        {suggestion}
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }.into_any()
}
