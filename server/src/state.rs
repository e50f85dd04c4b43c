use std::sync::Arc;

use axum::extract::FromRef;
use leptos::prelude::LeptosOptions;
use leptos_axum::AxumRouteListing;

use neighborly_core::store::InMemoryContentStore;

/// Shared state of the axum handlers
#[derive(FromRef, Clone)]
pub struct AppState {
    pub leptos_options: LeptosOptions,
    pub store: Arc<InMemoryContentStore>,
    pub routes: Vec<AxumRouteListing>,
    pub auth_user_header: String,
}
