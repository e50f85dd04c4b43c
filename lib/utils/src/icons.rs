use leptos::prelude::*;

#[component]
pub fn ReplyIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/toolbar/reply.svg" class=class/>
    }
}

#[component]
pub fn ArrowUpIcon(
    #[prop(into)]
    class: Signal<String>,
) -> impl IntoView {
    view! {
        <img src="/svg/arrow_up.svg" class=class/>
    }
}

#[component]
pub fn ArrowDownIcon(
    #[prop(into)]
    class: Signal<String>,
) -> impl IntoView {
    view! {
        <img src="/svg/arrow_down.svg" class=class/>
    }
}

#[component]
pub fn AuthErrorIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/locked_door.svg" class=class/>
    }
}

#[component]
pub fn AuthorIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/toolbar/author.svg" class=class/>
    }
}

#[component]
pub fn BellIcon(#[prop(default = "h-5 w-5")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/bell.svg" class=class/>
    }
}

#[component]
pub fn ClockIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/toolbar/clock.svg" class=class/>
    }
}

#[component]
pub fn CommentIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/toolbar/comment.svg" class=class/>
    }
}

#[component]
pub fn CrossIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/cross.svg" class=class/>
    }
}

#[component]
pub fn EmergencyIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/toolbar/emergency.svg" class=class/>
    }
}

#[component]
pub fn HomeIcon(#[prop(default = "h-8 w-8")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/house.svg" class=class/>
    }
}

#[component]
pub fn InternalErrorIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/broken_fence.svg" class=class/>
    }
}

#[component]
pub fn InvalidRequestIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/question_sign.svg" class=class/>
    }
}

#[component]
pub fn LoadingIcon(#[prop(default = "h-7 w-7 my-5")] class: &'static str) -> impl IntoView {
    view! {
        <div class="w-full flex items-center justify-center">
            <img src="/svg/loading.svg" class=class/>
        </div>
    }
}

#[component]
pub fn NetworkErrorIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/cut_cable.svg" class=class/>
    }
}

#[component]
pub fn NotAuthorizedIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/closed_gate.svg" class=class/>
    }
}

#[component]
pub fn NotFoundIcon(#[prop(default = "h-28 w-28")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/errors/empty_street.svg" class=class/>
    }
}

#[component]
pub fn PinnedIcon(#[prop(default = "content-toolbar-icon-size")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/toolbar/pin.svg" class=class/>
    }
}

#[component]
pub fn PlusIcon(#[prop(default = "h-5 w-5")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/plus.svg" class=class/>
    }
}

#[component]
pub fn SearchIcon(#[prop(default = "h-5 w-5")] class: &'static str) -> impl IntoView {
    view! {
        <img src="/svg/magnifying_glass.svg" class=class/>
    }
}
