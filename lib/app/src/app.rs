use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Link, Meta, MetaTags, Stylesheet, Title};
use leptos_router::components::{A, ParentRoute, Route, Router, Routes};
use leptos_router::hooks::use_query_map;
use leptos_router::{ParamSegment, StaticSegment};

use neighborly_utils::error_template::ErrorTemplate;
use neighborly_utils::constants::{LOGO_ICON_PATH, SITE_ROOT};
use neighborly_utils::errors::AppError;
use neighborly_utils::icons::{BellIcon, HomeIcon};
use neighborly_utils::routes::{ACCESS_DENIED_ROUTE, COMMUNITY_ID_QUERY_PARAM, COMMUNITY_ROUTE_PARAM_NAME, COMMUNITY_ROUTE_PREFIX, CREATE_POST_SUFFIX, LOGIN_ROUTE, NOTIFICATION_SETTINGS_ROUTE, NOTIFICATION_SETTINGS_SUFFIX, POST_ROUTE_PARAM_NAME, POST_ROUTE_PREFIX, PUBLISH_ROUTE, SETTINGS_ROUTE, VERIFY_IDENTITY_ROUTE};
use neighborly_utils::unpack::LocalUnpack;
use neighborly_utils::widget::Badge;

use crate::access::CommunityGuard;
use crate::community::CommunityFeed;
use crate::notification::NotificationSettings;
use crate::post::{CreatePost, PostPage};
use crate::state::GlobalState;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <Meta
                    http_equiv="Content-Security-Policy"
                    content=move || {
                        // inserted with a nonce on the server, empty on the client
                        use_nonce().map(|nonce| {
                            format!(
                                "default-src 'self';
                                script-src 'strict-dynamic' 'nonce-{nonce}' 'wasm-unsafe-eval';
                                img-src 'self' https: data:;
                                style-src 'self' 'nonce-{nonce}';
                                connect-src 'self' ws://localhost:3001/ ws://127.0.0.1:3001/;"
                            )
                        }).unwrap_or_default()
                    }
                />
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    provide_context(GlobalState::new());

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/neighborly.css"/>
        <Title text="Neighborly"/>
        <Link rel="icon" type_="image/svg+xml" href=LOGO_ICON_PATH/>
        <Router>
            <main class="h-screen flex flex-col text-white">
                <NavigationBar/>
                <div class="grow flex w-full overflow-hidden min-h-0 max-2xl:justify-center">
                    <Routes fallback=|| {
                        let mut outside_errors = Errors::default();
                        outside_errors.insert_with_default_key(AppError::NotFound);
                        view! {
                            <ErrorTemplate outside_errors/>
                        }
                    }>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment(LOGIN_ROUTE) view=LoginPage/>
                        <Route path=StaticSegment(VERIFY_IDENTITY_ROUTE) view=VerifyIdentityPage/>
                        <Route path=StaticSegment(ACCESS_DENIED_ROUTE) view=AccessDeniedPage/>
                        <ParentRoute path=(StaticSegment(COMMUNITY_ROUTE_PREFIX), ParamSegment(COMMUNITY_ROUTE_PARAM_NAME)) view=CommunityGuard>
                            <Route path=(StaticSegment(POST_ROUTE_PREFIX), ParamSegment(POST_ROUTE_PARAM_NAME)) view=PostPage/>
                            <Route path=(StaticSegment(PUBLISH_ROUTE), StaticSegment(CREATE_POST_SUFFIX)) view=CreatePost/>
                            <Route path=StaticSegment("") view=CommunityFeed/>
                        </ParentRoute>
                        <Route path=(StaticSegment(SETTINGS_ROUTE), StaticSegment(NOTIFICATION_SETTINGS_SUFFIX)) view=NotificationSettings/>
                    </Routes>
                </div>
            </main>
        </Router>
    }
}

/// Top bar with the navigation links and the current user
#[component]
fn NavigationBar() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <nav class="navbar bg-base-300 gap-2 px-2">
            <div class="flex-1">
                <A href=SITE_ROOT attr:class="btn btn-ghost gap-2">
                    <HomeIcon class="h-6 w-6"/>
                    <span class="text-xl">"Neighborly"</span>
                </A>
            </div>
            <A href=NOTIFICATION_SETTINGS_ROUTE attr:class="btn btn-ghost btn-circle" attr:aria-label="Notification settings">
                <BellIcon/>
            </A>
            <LocalUnpack resource=state.user let:user>
            {
                match user {
                    Some(user) => view! {
                        <div class="flex gap-1 items-center">
                            <span>{user.display_name.clone()}</span>
                            {
                                user.badge.clone().map(|badge| view! { <Badge text=badge/> })
                            }
                        </div>
                    }.into_any(),
                    None => view! { <A href=LOGIN_ROUTE attr:class="btn btn-sm">"Log in"</A> }.into_any(),
                }
            }
            </LocalUnpack>
        </nav>
    }
}

/// Landing page
#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center gap-3 p-4 w-full">
            <h1 class="text-4xl">"Welcome to Neighborly"</h1>
            <p class="text-center opacity-80">
                "Share news, alerts and favours with the people living around you. Open the link of your community to join the conversation."
            </p>
        </div>
    }
}

/// Shown to anonymous users. Sign-in is handled by the neighborhood's identity provider.
#[component]
fn LoginPage() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center gap-3 p-4 w-full">
            <h1 class="text-3xl">"Log in"</h1>
            <p class="text-center">{AppError::NotAuthenticated.user_message()}</p>
            <a href=SITE_ROOT rel="external" class="btn btn-primary">"Continue to sign in"</a>
        </div>
    }
}

#[component]
fn VerifyIdentityPage() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center gap-3 p-4 w-full">
            <h1 class="text-3xl">"Verify your identity"</h1>
            <p class="text-center">{AppError::NotVerified.user_message()}</p>
            <p class="text-center opacity-80">"Once your address is confirmed, you can access your community."</p>
        </div>
    }
}

#[component]
fn AccessDeniedPage() -> impl IntoView {
    let query = use_query_map();
    let community_id = move || query.read().get(COMMUNITY_ID_QUERY_PARAM).unwrap_or_default();

    view! {
        <div class="flex flex-col items-center gap-3 p-4 w-full">
            <h1 class="text-3xl">"Access denied"</h1>
            <p class="text-center">{move || AppError::NotMember(community_id()).user_message()}</p>
            <Show when=move || !community_id().is_empty()>
                <p class="text-center opacity-80">
                    {move || format!("Ask the moderators of {} to approve your membership request.", community_id())}
                </p>
            </Show>
        </div>
    }
}
