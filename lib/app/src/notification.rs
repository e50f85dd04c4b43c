use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;

use neighborly_core::notification::NotificationPreferences;
use neighborly_core::service::{ContentService, ServerContentService};
use neighborly_core::user::User;
use neighborly_utils::checks::check_category_tag;
use neighborly_utils::errors::{AppError, InlineError};
use neighborly_utils::icons::{BellIcon, CrossIcon, LoadingIcon};
use neighborly_utils::routes::LOGIN_ROUTE;
use neighborly_utils::unpack::LocalUnpack;

use crate::state::GlobalState;

/// Settings page of the notifications of the current user
#[component]
pub fn NotificationSettings() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <LocalUnpack resource=state.user let:user>
        {
            match user {
                Some(user) => view! { <NotificationPreferencesForm user=user.clone()/> }.into_any(),
                None => view! { <Redirect path=LOGIN_ROUTE/> }.into_any(),
            }
        }
        </LocalUnpack>
    }
}

#[component]
fn NotificationPreferencesForm(
    user: User,
) -> impl IntoView {
    let user_id = StoredValue::new(user.user_id);
    let preferences_resource = LocalResource::new(move || async move {
        ServerContentService.get_notification_preferences(&user_id.get_value()).await
    });

    view! {
        <div class="flex flex-col gap-2 p-2 w-full 2xl:w-1/2">
            <div class="flex gap-2 items-center">
                <BellIcon/>
                <h1 class="text-2xl font-semibold">"Notifications"</h1>
            </div>
            <LocalUnpack resource=preferences_resource let:preferences>
                <NotificationPreferencesEditor preferences=preferences.clone()/>
            </LocalUnpack>
        </div>
    }
}

/// Applies the mute toggle of `category_tag`, rejecting malformed categories.
pub fn toggle_muted_category(
    preferences: &mut NotificationPreferences,
    category_tag: &str,
    is_muted: bool,
) -> Result<(), AppError> {
    let category_tag = category_tag.trim().to_ascii_lowercase();
    check_category_tag(&category_tag).map_err(|e| AppError::invalid(e.code))?;
    preferences.set_muted(&category_tag, is_muted);
    Ok(())
}

#[component]
fn NotificationPreferencesEditor(
    preferences: NotificationPreferences,
) -> impl IntoView {
    let preferences = RwSignal::new(preferences);
    let category_input = RwSignal::new(String::new());
    let edit_error = RwSignal::new(None);
    let save_error = RwSignal::new(None);
    let is_saving = RwSignal::new(false);
    let is_saved = RwSignal::new(false);

    let muted_categories = move || -> Vec<String> {
        preferences.read().muted_categories.iter().cloned().collect()
    };

    let on_mute = move |_| {
        let category_tag = category_input.get_untracked();
        let result = preferences.try_update(|preferences| toggle_muted_category(preferences, &category_tag, true));
        match result {
            Some(Err(e)) => edit_error.set(Some(e)),
            _ => {
                edit_error.set(None);
                category_input.set(String::new());
                is_saved.set(false);
            }
        }
    };

    let on_save = move |_| {
        let preferences = preferences.get_untracked();
        is_saving.set(true);
        spawn_local(async move {
            let user_id = preferences.user_id.clone();
            match ServerContentService.set_notification_preferences(preferences).await {
                Ok(()) => {
                    save_error.set(None);
                    is_saved.set(true);
                },
                Err(e) => {
                    log::error!("Failed to save notification preferences of {user_id}: {e}");
                    save_error.set(Some(e));
                },
            }
            is_saving.set(false);
        });
    };

    view! {
        <label class="label cursor-pointer justify-start gap-2">
            <input
                type="checkbox"
                class="toggle toggle-primary"
                prop:checked=move || preferences.read().enabled
                on:change=move |ev| {
                    preferences.update(|preferences| preferences.enabled = event_target_checked(&ev));
                    is_saved.set(false);
                }
            />
            <span class="label-text">"Notify me of new posts in my communities"</span>
        </label>
        <div class="text-sm opacity-70">"Emergency alerts are always delivered."</div>
        <div class="flex flex-col gap-1">
            <span class="font-medium">"Muted categories"</span>
            <ul class="flex flex-wrap gap-1">
                <For
                    each=muted_categories
                    key=|category_tag| category_tag.clone()
                    children=move |category_tag| {
                        let unmuted = category_tag.clone();
                        view! {
                            <li class="badge badge-outline gap-1">
                                {category_tag}
                                <button
                                    class="text-xs"
                                    aria-label="Unmute"
                                    on:click=move |_| {
                                        preferences.update(|preferences| preferences.set_muted(&unmuted, false));
                                        is_saved.set(false);
                                    }
                                >
                                    <CrossIcon class="h-3 w-3"/>
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
            <div class="flex gap-1">
                <input
                    type="text"
                    class="input input-bordered input-sm"
                    placeholder="Category to mute"
                    prop:value=category_input
                    on:input=move |ev| category_input.set(event_target_value(&ev))
                />
                <button class="btn btn-sm" on:click=on_mute>"Mute"</button>
            </div>
            <InlineError error=edit_error/>
        </div>
        <div class="flex gap-2 items-center">
            <button class="btn btn-primary btn-sm w-fit" disabled=is_saving on:click=on_save>
                {move || match is_saving.get() {
                    true => view! { <LoadingIcon class="h-4 w-4"/> }.into_any(),
                    false => view! { "Save" }.into_any(),
                }}
            </button>
            <Show when=move || is_saved.get()>
                <span class="text-sm text-success">"Saved"</span>
            </Show>
            <InlineError error=save_error/>
        </div>
    }.into_any()
}

#[cfg(test)]
mod tests {
    use neighborly_core::notification::NotificationPreferences;
    use neighborly_utils::errors::AppError;

    use crate::notification::toggle_muted_category;

    #[test]
    fn test_toggle_muted_category() {
        let mut preferences = NotificationPreferences::new("user-1");
        assert_eq!(toggle_muted_category(&mut preferences, " Lost-Pets ", true), Ok(()));
        assert!(preferences.is_muted("lost-pets"));
        assert_eq!(toggle_muted_category(&mut preferences, "lost-pets", false), Ok(()));
        assert!(!preferences.is_muted("lost-pets"));
        assert!(matches!(toggle_muted_category(&mut preferences, "pets!", true), Err(AppError::InvalidRequest(_))));
        assert!(matches!(toggle_muted_category(&mut preferences, "", true), Err(AppError::InvalidRequest(_))));
        assert!(preferences.muted_categories.is_empty());
    }
}
