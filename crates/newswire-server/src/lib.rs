use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/news", get(handlers::latest_news))
        .route("/article", post(handlers::read_article))
        .layer(cors)
        .with_state(Arc::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use httpmock::prelude::*;
    use serde_json::Value;
    use tower::util::ServiceExt;

    use newswire_core::AppConfig;

    fn test_app(config: &AppConfig) -> Router {
        create_app(AppState::new(config).unwrap())
    }

    /// Config that never touches the network for /news
    fn offline_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.news.sources = Vec::new();
        config
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_article(url_field: Option<&str>) -> Request<Body> {
        let body = match url_field {
            Some(url) => format!(r#"{{"url":"{url}"}}"#),
            None => "{}".to_string(),
        };
        Request::builder()
            .method("POST")
            .uri("/article")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_url_is_a_bad_request() {
        let response = test_app(&offline_config())
            .oneshot(post_article(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "URL is required");
    }

    #[tokio::test]
    async fn blank_url_is_a_bad_request() {
        let response = test_app(&offline_config())
            .oneshot(post_article(Some("  ")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unextractable_page_maps_to_422() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/empty");
                then.status(200)
                    .body("<html><body><nav><a href='/x'>x</a></nav></body></html>");
            })
            .await;

        let url = server.url("/empty");
        let response = test_app(&offline_config())
            .oneshot(post_article(Some(url.as_str())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to extract content");
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_504() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/down");
                then.status(502);
            })
            .await;

        let url = server.url("/down");
        let response = test_app(&offline_config())
            .oneshot(post_article(Some(url.as_str())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Failed to load page");
        assert!(json["details"].is_string());
    }

    #[tokio::test]
    async fn successful_extraction_returns_the_article_shape() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/post");
                then.status(200).body(
                    "<html><head><title>Launch Day Report</title></head><body><article>\
                     <p>The team shipped the rewrite today, closing out a quarter of work \
                     on streaming, caching, and a long tail of compatibility fixes.</p>\
                     <p>Early numbers look strong, with cold-start latency cut in half and \
                     memory usage flat even under sustained production load.</p>\
                     </article></body></html>",
                );
            })
            .await;

        let url = server.url("/post");
        let response = test_app(&offline_config())
            .oneshot(post_article(Some(url.as_str())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["title"], "Launch Day Report");
        assert_eq!(json["originalUrl"], url.as_str());
        assert_eq!(json["siteName"], "Source");
        assert_eq!(json["isHtml"], true);
        assert!(json["content"].as_str().unwrap().contains("shipped the rewrite"));
    }

    #[tokio::test]
    async fn news_returns_the_success_envelope() {
        let response = test_app(&offline_config())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/news")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert!(json["news"].is_array());
        assert!(json["timestamp"].is_string());
    }
}
