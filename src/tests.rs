use std::{fmt::Debug, time::Duration};

use axum::{
    body::HttpBody,
    http::{Request, Response},
    Router,
};
use hyper::{Body, StatusCode};
use scraper::Html;
use test_log::test;
use tower::ServiceExt;

use crate::config::CliConfig;

/// Creates the application with its backend service at `service_url`.
pub async fn create_app(service_url: &str) -> Router {
    let mut config = CliConfig::default();
    config.service_url = format!("{}/", service_url.trim_end_matches('/'));
    crate::app(&config, Duration::from_secs(60)).await.unwrap()
}

pub async fn get_body<T>(response: Response<T>) -> String
where
    T: HttpBody,
    <T as HttpBody>::Error: Debug,
{
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let body = String::from_utf8_lossy(&body[..]);
    body.to_string()
}

pub async fn get_html<T>(response: Response<T>) -> Html
where
    T: HttpBody,
    <T as HttpBody>::Error: Debug,
{
    let body = get_body(response).await;
    Html::parse_document(&body)
}

#[test(tokio::test)]
async fn existing_static_resource() {
    let app = crate::app(&CliConfig::default(), Duration::from_secs(60))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/static/README.md")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = get_body(response).await;
    assert_eq!(
        "This folder contains static ressources used by the web application.",
        &body
    );
}

#[test(tokio::test)]
async fn static_resource_content_type() {
    let app = crate::app(&CliConfig::default(), Duration::from_secs(60))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/static/search.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!("text/css", response.headers()["content-type"]);
}

#[test(tokio::test)]
async fn missing_static_resource() {
    let app = crate::app(&CliConfig::default(), Duration::from_secs(60))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/static/THIS_FILE_DOES_NOT_EXIST.md")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test(tokio::test)]
async fn start_page_redirects_to_search() {
    let app = crate::app(&CliConfig::default(), Duration::from_secs(60))
        .await
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!("search", response.headers()["location"]);
}
