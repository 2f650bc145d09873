//! Router-level tests: every page renders, submissions round-trip over HTTP

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use rusty_forms_site::{app, Config};
use tower::ServiceExt;

fn test_app() -> Router {
    app(&Config::default()).unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[rstest]
#[case("/")]
#[case("/get-started")]
#[case("/examples")]
#[case("/success")]
#[case("/examples/actions/redirect")]
#[case("/examples/actions/custom-response")]
#[case("/examples/actions/environment")]
#[case("/examples/forms/labels-and-options")]
#[case("/examples/forms/form-with-children")]
#[case("/examples/schemas/strings")]
#[case("/examples/schemas/numbers")]
#[case("/examples/schemas/booleans")]
#[case("/examples/schemas/dates")]
#[tokio::test]
async fn test_pages_render(#[case] uri: &str) {
    let response = test_app().oneshot(get(uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.starts_with("<!DOCTYPE html>"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = test_app().oneshot(get("/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("404"));
}

#[tokio::test]
async fn test_examples_list_links_every_example() {
    let html = body_string(test_app().oneshot(get("/examples")).await.unwrap()).await;

    assert!(html.contains(r#"href="/examples/actions/custom-response""#));
    assert!(html.contains(r#"href="/examples/forms/form-with-children""#));
    assert!(html.contains(r#"href="/examples/schemas/dates""#));
}

#[tokio::test]
async fn test_client_script_is_served() {
    let response = test_app()
        .oneshot(get("/_rusty-forms/forms.js"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript; charset=utf-8"
    );
    assert!(body_string(response).await.contains("data-rusty-form"));
}

#[tokio::test]
async fn test_versioned_script_url_is_served() {
    let src = rusty_forms_site::assets::forms_js_src();
    let html = body_string(test_app().oneshot(get("/")).await.unwrap()).await;
    assert!(html.contains(&src));

    let response = test_app().oneshot(get(&src)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, max-age=31536000, immutable"
    );
}

#[tokio::test]
async fn test_form_markup() {
    let html = body_string(test_app().oneshot(get("/")).await.unwrap()).await;

    assert!(html.contains(r#"<form method="post" novalidate data-rusty-form data-schema="#));
    assert!(html.contains(r#"<label id="label-for-howYouFoundOutAboutUs" for="howYouFoundOutAboutUs">How You Found Out About Us</label>"#));
    assert!(html.contains(r#"<button type="submit">OK</button>"#));
}

#[tokio::test]
async fn test_empty_submit_rerenders_with_errors() {
    let response = test_app()
        .oneshot(post("/", "firstName=&email=&howYouFoundOutAboutUs=fromAFriend"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"<div id="errors-for-firstName" role="alert"><div>String must contain at least 1 character(s)</div></div>"#));
    assert!(html.contains(r#"aria-describedby="errors-for-firstName" autofocus"#));
    assert!(html.contains(r#"id="action-data""#));
}

#[tokio::test]
async fn test_valid_submit_redirects() {
    let response = test_app()
        .oneshot(post(
            "/examples/actions/redirect",
            "firstName=John&email=john%40doe.com&howYouFoundOutAboutUs=google",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/success");
}

#[tokio::test]
async fn test_custom_response_is_embedded() {
    let response = test_app()
        .oneshot(post(
            "/examples/actions/custom-response",
            "firstName=John&email=john%40doe.com",
        ))
        .await
        .unwrap();

    let html = body_string(response).await;
    assert!(html.contains("&quot;customName&quot;: &quot;John&quot;"));
}

#[tokio::test]
async fn test_json_submission() {
    let mut request = post("/examples/actions/custom-response", "firstName=&email=john");
    request
        .headers_mut()
        .insert(header::ACCEPT, "application/json".parse().unwrap());

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "failure");
    assert_eq!(json["errors"][0]["field"], "firstName");
    assert_eq!(json["errors"][1]["messages"][0], "Invalid email");
}

#[tokio::test]
async fn test_environment_uses_origin_header() {
    let mut request = post("/examples/actions/environment", "email=john%40doe.com");
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://localhost:3000".parse().unwrap());

    let html = body_string(test_app().oneshot(request).await.unwrap()).await;
    assert!(html.contains(r#"<div role="alert" data-global-errors><div>Unauthorized origin</div></div>"#));

    let mut request = post("/examples/actions/environment", "email=john%40doe.com");
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://foo.bar".parse().unwrap());
    request
        .headers_mut()
        .insert(header::ACCEPT, "application/json".parse().unwrap());

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["email"], "john@doe.com");
}

#[tokio::test]
async fn test_unchecked_boxes_submit_false() {
    let mut request = post("/examples/schemas/booleans", "_formInstance=abc");
    request
        .headers_mut()
        .insert(header::ACCEPT, "application/json".parse().unwrap());

    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["data"]["mandatory"], false);
    assert_eq!(json["data"]["defaultTrue"], false);
    assert_eq!(json["data"]["nullable"], serde_json::Value::Null);
}
