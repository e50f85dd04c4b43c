#![recursion_limit = "256"]
use std::env;
use std::sync::Arc;

use axum::{body::Body as AxumBody, extract::{Path, State}, http::{HeaderMap, Request}, response::{IntoResponse, Response}, routing::get, Router};
use axum::body::Body;
use axum::http::HeaderValue;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};

use neighborly_app::app::*;
use neighborly_core::store::InMemoryContentStore;
use neighborly_core::user::CurrentUserId;
use neighborly_utils::errors::AppError;
use crate::fallback::{file_and_error_handler, is_prod_mode};
use crate::state::AppState;

mod fallback;
mod state;

pub const SEED_PATH_ENV: &str = "NEIGHBORLY_SEED_PATH";
pub const AUTH_USER_HEADER_ENV: &str = "AUTH_USER_HEADER";
pub const DEFAULT_AUTH_USER_HEADER: &str = "x-authenticated-user";

/// Loads the content store from the seed file given by the environment, or the demo dataset if there is none.
pub fn load_content_store() -> Result<InMemoryContentStore, AppError> {
    match env::var(SEED_PATH_ENV) {
        Ok(seed_path) => {
            log::info!("Load content store seed from {seed_path}.");
            let seed_json = std::fs::read_to_string(&seed_path)?;
            InMemoryContentStore::from_json(&seed_json)
        },
        Err(_) => {
            log::info!("Could not find seed path in env variable, load demo content.");
            Ok(InMemoryContentStore::demo())
        }
    }
}

pub fn get_auth_user_header() -> String {
    match env::var(AUTH_USER_HEADER_ENV) {
        Ok(header_name) => {
            log::debug!("Got auth user header from env variable.");
            header_name.to_ascii_lowercase()
        },
        Err(_) => {
            log::debug!("Could not find auth user header in env variable, take default value.");
            String::from(DEFAULT_AUTH_USER_HEADER)
        }
    }
}

/// Reads the id of the user authenticated by the upstream proxy.
pub fn get_current_user_id(headers: &HeaderMap, header_name: &str) -> CurrentUserId {
    CurrentUserId(
        headers
            .get(header_name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|user_id| !user_id.is_empty())
            .map(String::from)
    )
}

async fn server_fn_handler(
    State(app_state): State<AppState>,
    path: Path<String>,
    request: Request<AxumBody>,
) -> impl IntoResponse {
    log::info!("Serve fn handler for path: {path:?}");
    let current_user_id = get_current_user_id(request.headers(), &app_state.auth_user_header);

    handle_server_fns_with_context(
        move || {
            provide_context(app_state.store.clone());
            provide_context(current_user_id.clone());
        },
        request,
    ).await
}

async fn leptos_routes_handler(
    app_state: State<AppState>,
    req: Request<AxumBody>,
) -> Response {
    let leptos_options = app_state.leptos_options.clone();
    let store = app_state.store.clone();
    let current_user_id = get_current_user_id(req.headers(), &app_state.auth_user_header);

    log::info!("leptos_routes_handler for uri: {:?}", req.uri());
    let handler = leptos_axum::render_route_with_context(
        app_state.routes.clone(),
        move || {
            provide_context(store.clone());
            provide_context(current_user_id.clone());
        },
        move || shell(leptos_options.clone()),
    );
    let mut response = handler(app_state, req).await.into_response();
    add_security_headers(&mut response);
    response
}

fn add_security_headers(response: &mut Response<Body>) {
    let headers = response.headers_mut();

    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("Referrer-Policy", HeaderValue::from_static("strict-origin-when-cross-origin"));
    headers.insert("Permissions-Policy", HeaderValue::from_static("geolocation=(), microphone=(), camera=()"));
    headers.insert("Cross-Origin-Opener-Policy", HeaderValue::from_static("same-origin"));
    headers.insert("Cross-Origin-Resource-Policy", HeaderValue::from_static("same-origin"));
    if is_prod_mode() {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }
}

#[tokio::main]
async fn main() {
    simple_logger::init_with_level(log::Level::Info).expect("Should be able to initialize logging.");

    let subscriber = tracing_subscriber::fmt().with_max_level(tracing::Level::ERROR).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting tracing default failed");

    let store = load_content_store().expect("Should load the content store.");

    // Setting get_configuration(None) means we'll be using cargo-leptos's env values
    let conf = get_configuration(None).expect("Should read the leptos configuration.");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let app_state = AppState {
        leptos_options: leptos_options.clone(),
        store: Arc::new(store),
        routes: routes.clone(),
        auth_user_header: get_auth_user_header(),
    };

    let app = Router::new()
        .route(
            "/api/{id}",
            get(server_fn_handler).post(server_fn_handler)
        )
        .leptos_routes_with_handler(routes, get(leptos_routes_handler))
        .fallback(file_and_error_handler)
        .with_state(app_state);

    log::info!("listening on http://{}", &addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.expect("Should bind the site address.");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server should run.");
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};
    use neighborly_core::user::CurrentUserId;

    use crate::{get_current_user_id, DEFAULT_AUTH_USER_HEADER};

    #[test]
    fn test_get_current_user_id() {
        let mut headers = HeaderMap::new();
        assert_eq!(get_current_user_id(&headers, DEFAULT_AUTH_USER_HEADER), CurrentUserId(None));

        headers.insert(DEFAULT_AUTH_USER_HEADER, HeaderValue::from_static("  "));
        assert_eq!(get_current_user_id(&headers, DEFAULT_AUTH_USER_HEADER), CurrentUserId(None));

        headers.insert(DEFAULT_AUTH_USER_HEADER, HeaderValue::from_static("alice"));
        assert_eq!(get_current_user_id(&headers, DEFAULT_AUTH_USER_HEADER), CurrentUserId(Some(String::from("alice"))));
        assert_eq!(get_current_user_id(&headers, "x-other-header"), CurrentUserId(None));
    }
}
