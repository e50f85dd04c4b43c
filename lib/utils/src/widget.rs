use leptos::prelude::*;
use leptos_use::{breakpoints_tailwind, use_breakpoints};
use leptos_use::BreakpointsTailwind::Xxl;

use crate::constants::{
    SECONDS_IN_DAY, SECONDS_IN_HOUR, SECONDS_IN_MINUTE, SECONDS_IN_MONTH, SECONDS_IN_YEAR,
};
use crate::errors::{AppError, ErrorDisplay};
use crate::icons::{AuthorIcon, ClockIcon, CommentIcon, EmergencyIcon, LoadingIcon, PinnedIcon};

enum TimeScale {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl TimeScale {
    pub fn to_str(&self, is_plural: bool, use_fullname: bool) -> &'static str {
        match (use_fullname, self) {
            (false, TimeScale::Seconds) => "s",
            (false, TimeScale::Minutes) => "m",
            (false, TimeScale::Hours) => "h",
            (false, TimeScale::Days) => "d",
            (false, TimeScale::Months) => "mo",
            (false, TimeScale::Years) => "y",
            (true, TimeScale::Seconds) => if is_plural { "seconds" } else { "second" },
            (true, TimeScale::Minutes) => if is_plural { "minutes" } else { "minute" },
            (true, TimeScale::Hours) => if is_plural { "hours" } else { "hour" },
            (true, TimeScale::Days) => if is_plural { "days" } else { "day" },
            (true, TimeScale::Months) => if is_plural { "months" } else { "month" },
            (true, TimeScale::Years) => if is_plural { "years" } else { "year" },
        }
    }
}

/// Component to display the creation time of a post or comment
#[component]
pub fn TimeSinceWidget(
    #[prop(into)]
    timestamp: Signal<chrono::DateTime<chrono::Utc>>
) -> impl IntoView {
    let use_fullname = use_breakpoints(breakpoints_tailwind()).ge(Xxl);
    view! {
        <div class="flex gap-1.5 items-center text-sm px-1">
            <ClockIcon/>
            {
                move || get_elapsed_time_string(timestamp.get(), chrono::Utc::now(), use_fullname.get())
            }
        </div>
    }.into_any()
}

/// Component to display the denormalized author of a post or comment
#[component]
pub fn AuthorWidget(
    name: String,
    role: String,
    badge: Option<String>,
) -> impl IntoView {
    view! {
        <div class="flex gap-1.5 items-center text-sm px-1">
            <AuthorIcon/>
            <span class="font-medium">{name}</span>
            <span class="text-xs opacity-70">{role}</span>
            {badge.map(|badge| view! { <Badge text=badge/> })}
        </div>
    }.into_any()
}

/// Component to display a short rounded label
#[component]
pub fn Badge(
    #[prop(into)]
    text: String,
    #[prop(default = "bg-base-300")]
    class: &'static str,
) -> impl IntoView {
    view! {
        <div class=format!("px-2 py-0.5 rounded-full text-xs {class}")>{text}</div>
    }
}

/// Component to display the number of comments in a post
#[component]
pub fn CommentCountWidget(
    #[prop(into)]
    count: Signal<u32>,
) -> impl IntoView {
    view! {
        <div class="flex gap-1.5 items-center text-sm px-1">
            <CommentIcon/>
            {move || count.get()}
        </div>
    }.into_any()
}

/// Component to conditionally display a pin icon
#[component]
pub fn IsPinnedWidget(
    #[prop(into)]
    is_pinned: Signal<bool>,
) -> impl IntoView {
    view! {
        { move || match is_pinned.get() {
            true => Some(view! { <div class="px-1"><PinnedIcon/></div>}),
            false => None
        }}
    }
}

/// Component to flag emergency alerts
#[component]
pub fn EmergencyWidget(
    #[prop(into)]
    is_emergency: Signal<bool>,
) -> impl IntoView {
    view! {
        <Show when=move || is_emergency.get()>
            <div class="flex gap-1 items-center px-2 py-0.5 rounded-full bg-error text-error-content text-xs font-semibold">
                <EmergencyIcon class="h-4 w-4"/>
                "Emergency"
            </div>
        </Show>
    }
}

/// Component to display a post's score
#[component]
pub fn ScoreIndicator(
    #[prop(into)]
    score: Signal<i64>,
) -> impl IntoView {
    view! {
        <div class="w-fit px-1 text-sm text-center">
            {move || score.get()}
        </div>
    }.into_any()
}

/// Thin bar displaying the progress of a submission, hidden when at 0
#[component]
pub fn ProgressBar(
    #[prop(into)]
    percent: Signal<u8>,
) -> impl IntoView {
    let is_visible = move || percent.get() != 0;
    view! {
        <Show when=is_visible>
            <div class="w-full h-1 bg-base-300 rounded-full overflow-hidden">
                <div
                    class="h-full bg-primary transition-all duration-300"
                    style=move || format!("width: {}%", percent.get())
                    role="progressbar"
                    aria-valuenow=move || percent.get().to_string()
                />
            </div>
        </Show>
    }
}

/// Component to display a loading indicator or error depending on the input signals
#[component]
pub fn LoadIndicators(
    #[prop(into)]
    is_loading: Signal<bool>,
    #[prop(into)]
    load_error: Signal<Option<AppError>>,
) -> impl IntoView {
    view! {
        {
            move || load_error.get().map(|error| view! {
                <div class="flex justify-start py-4"><ErrorDisplay error/></div>
            })
        }
        <div class="w-full min-h-9 2xl:min-h-17">
            <Show
                when=move || is_loading.get()
            >
                <LoadingIcon/>
            </Show>
        </div>
    }
}

fn get_elapsed_time_string(
    timestamp: chrono::DateTime<chrono::Utc>,
    now: chrono::DateTime<chrono::Utc>,
    use_fullname: bool,
) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds().max(0);
    match seconds {
        seconds if seconds < SECONDS_IN_MINUTE => format!("{} {}", seconds, TimeScale::Seconds.to_str(seconds > 1, use_fullname)),
        seconds if seconds < SECONDS_IN_HOUR => {
            let minutes = seconds / SECONDS_IN_MINUTE;
            format!("{} {}", minutes, TimeScale::Minutes.to_str(minutes > 1, use_fullname))
        }
        seconds if seconds < SECONDS_IN_DAY => {
            let hours = seconds / SECONDS_IN_HOUR;
            format!("{} {}", hours, TimeScale::Hours.to_str(hours > 1, use_fullname))
        }
        seconds if seconds < SECONDS_IN_MONTH => {
            let days = seconds / SECONDS_IN_DAY;
            format!("{} {}", days, TimeScale::Days.to_str(days > 1, use_fullname))
        }
        seconds if seconds < SECONDS_IN_YEAR => {
            let months = seconds / SECONDS_IN_MONTH;
            format!("{} {}", months, TimeScale::Months.to_str(months > 1, use_fullname))
        }
        _ => {
            let years = seconds / SECONDS_IN_YEAR;
            format!("{} {}", years, TimeScale::Years.to_str(years > 1, use_fullname))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use crate::widget::get_elapsed_time_string;

    #[test]
    fn test_get_elapsed_time_string() {
        let now = Utc::now();
        assert_eq!(get_elapsed_time_string(now, now, true), "0 second");
        assert_eq!(get_elapsed_time_string(now - Duration::seconds(1), now, true), "1 second");
        assert_eq!(get_elapsed_time_string(now - Duration::seconds(30), now, false), "30 s");
        assert_eq!(get_elapsed_time_string(now - Duration::minutes(5), now, true), "5 minutes");
        assert_eq!(get_elapsed_time_string(now - Duration::hours(1), now, true), "1 hour");
        assert_eq!(get_elapsed_time_string(now - Duration::hours(3), now, false), "3 h");
        assert_eq!(get_elapsed_time_string(now - Duration::days(2), now, true), "2 days");
        assert_eq!(get_elapsed_time_string(now - Duration::days(62), now, false), "2 mo");
        assert_eq!(get_elapsed_time_string(now - Duration::days(800), now, true), "2 years");
        assert_eq!(get_elapsed_time_string(now + Duration::seconds(10), now, false), "0 s");
    }
}
