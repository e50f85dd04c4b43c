use leptos::prelude::*;
use leptos_router::components::{Outlet, Redirect};
use leptos_router::hooks::use_params_map;

use neighborly_core::access::{check_community_access, AccessRedirect};
use neighborly_core::service::ServerContentService;
use neighborly_core::user::User;
use neighborly_utils::errors::AppError;
use neighborly_utils::routes::get_community_id_memo;
use neighborly_utils::unpack::LocalUnpack;

use crate::community::CommunityBanner;
use crate::state::{CommunityState, GlobalState};

/// Returns the user if they may access the community, or the page they must be sent to.
pub async fn resolve_community_access(user: Option<User>, community_id: &str) -> Result<User, AccessRedirect> {
    check_community_access(&ServerContentService, user.as_ref(), community_id).await?;
    user.ok_or(AccessRedirect::Login)
}

/// Guard of every community page. Redirects users lacking access, otherwise provides the community state to the nested routes.
#[component]
pub fn CommunityGuard() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let community_id = get_community_id_memo(use_params_map());

    let access_resource = LocalResource::new(move || async move {
        let community_id = community_id.get();
        let user = state.user.await?;
        Ok::<_, AppError>(resolve_community_access(user, &community_id).await)
    });

    view! {
        <LocalUnpack resource=access_resource let:access>
        {
            match access {
                Ok(user) => view! { <CommunityOutlet community_id user=user.clone()/> }.into_any(),
                Err(redirect) => {
                    log::debug!("Redirect to {}", redirect.path());
                    view! { <Redirect path=redirect.path()/> }.into_any()
                },
            }
        }
        </LocalUnpack>
    }
}

#[component]
fn CommunityOutlet(
    community_id: Memo<String>,
    user: User,
) -> impl IntoView {
    provide_context(CommunityState { community_id, user });

    view! {
        <div class="flex flex-col flex-1 w-full overflow-y-auto gap-2 p-2">
            <CommunityBanner/>
            <Outlet/>
        </div>
    }
}
