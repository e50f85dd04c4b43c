use std::env;
use axum::{
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode, Uri},
    response::{IntoResponse, Response as AxumResponse},
};
use axum::http::{header, HeaderValue};
use leptos::prelude::{Errors, LeptosOptions};
use leptos::view;
use tower::util::ServiceExt;
use tower_http::services::ServeDir;

use neighborly_utils::error_template::ErrorTemplate;
use neighborly_utils::errors::AppError;

/// Serves static assets, or renders the not found page when no asset matches the uri.
pub async fn file_and_error_handler(
    uri: Uri,
    State(options): State<LeptosOptions>,
    req: Request<Body>,
) -> AxumResponse {
    let root = options.site_root.clone();
    match get_static_file(uri.clone(), &root).await {
        Ok(res) if res.status() == StatusCode::OK => res.into_response(),
        Ok(_) => render_not_found(req).await,
        Err((status, message)) => {
            log::error!("Failed to serve {uri}: {message}");
            (status, message).into_response()
        }
    }
}

async fn render_not_found(req: Request<Body>) -> AxumResponse {
    let mut errors = Errors::default();
    errors.insert_with_default_key(AppError::NotFound);
    let handler = leptos_axum::render_app_to_stream(
        move || view! {<ErrorTemplate outside_errors=errors.clone()/>},
    );
    handler(req).await.into_response()
}

async fn get_static_file(uri: Uri, root: &str) -> Result<Response<Body>, (StatusCode, String)> {
    let req = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut response = ServeDir::new(root)
        .oneshot(req)
        .await
        .unwrap_or_else(|err| match err {})
        .into_response();

    if is_prod_mode() {
        response.headers_mut().append(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=31536000, immutable"));
    }

    Ok(response)
}

pub fn is_prod_mode() -> bool {
    env::var("LEPTOS_ENV").is_ok_and(|leptos_env| leptos_env == "PROD")
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode, Uri};

    use crate::fallback::get_static_file;

    #[tokio::test]
    async fn test_get_static_file() {
        let root = std::env::temp_dir().join("neighborly_static_test");
        std::fs::create_dir_all(&root).expect("Should create static dir");
        std::fs::write(root.join("house.svg"), "<svg/>").expect("Should write static file");
        let root = root.to_string_lossy().to_string();

        let found = get_static_file(Uri::from_static("/house.svg"), &root).await.expect("Should serve file");
        assert_eq!(found.status(), StatusCode::OK);
        assert!(found.headers().get(header::CONTENT_TYPE).is_some());

        let missing = get_static_file(Uri::from_static("/missing.svg"), &root).await.expect("Should answer");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
