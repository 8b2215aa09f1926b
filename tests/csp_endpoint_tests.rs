mod util;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use util::MockMailer;

fn csp_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/csp-report")
        .body(Body::from(body))
        .unwrap()
}

fn sample_report(document_uri: &str) -> String {
    json!({
        "csp-report": {
            "document-uri": document_uri,
            "violated-directive": "script-src 'self'",
            "blocked-uri": "https://cdn.evil.example/payload.js",
            "original-policy": "default-src 'self'"
        }
    })
    .to_string()
}

#[tokio::test]
async fn explicit_app_name_query_param_wins() {
    let mock = MockMailer::new();
    let app = util::app_with(mock.clone());

    let resp = app
        .oneshot(csp_request(
            "/csp-report?appName=mail_guard",
            sample_report("https://app.signic.email/inbox"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let sent = mock.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "guard@mailbox.test");
}

#[tokio::test]
async fn app_name_is_inferred_from_the_document_host() {
    let mock = MockMailer::new();
    let app = util::app_with(mock.clone());

    let resp = app
        .oneshot(csp_request(
            "/csp-report",
            sample_report("https://app.signic.email/inbox"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let sent = mock.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "security@mailbox.test");
    assert!(sent[0].html.contains("CSP VIOLATION"));
    assert!(sent[0].html.contains("cdn.evil.example"));
}

#[tokio::test]
async fn extension_scheme_is_inferred_as_the_extension_app() {
    let mock = MockMailer::new();
    let app = util::app_with(mock.clone());

    let resp = app
        .oneshot(csp_request(
            "/csp-report",
            sample_report("chrome-extension://abcdefgh/popup.html"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(mock.sent()[0].to, "guard@mailbox.test");
}

#[tokio::test]
async fn uninferable_document_uri_is_dropped_silently() {
    let mock = MockMailer::new();
    let app = util::app_with(mock.clone());

    let resp = app
        .oneshot(csp_request(
            "/csp-report",
            sample_report("https://unrelated.example/page"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(mock.send_count(), 0);
}

#[tokio::test]
async fn unknown_app_is_dropped_silently_not_an_error() {
    let mock = MockMailer::new();
    let app = util::app_with(mock.clone());

    let resp = app
        .oneshot(csp_request(
            "/csp-report?appName=ghost_app",
            sample_report("https://app.signic.email/inbox"),
        ))
        .await
        .unwrap();
    // Asymmetry with /alert: the browser never sees an error.
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let body = http_body_util::BodyExt::collect(resp.into_body())
        .await
        .unwrap();
    assert!(body.to_bytes().is_empty());
    assert_eq!(mock.send_count(), 0);
}

#[tokio::test]
async fn unparseable_body_still_yields_204() {
    let mock = MockMailer::new();
    let app = util::app_with(mock.clone());

    let resp = app
        .oneshot(csp_request("/csp-report", "this is not json".to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(mock.send_count(), 0);
}

#[tokio::test]
async fn transport_failure_still_yields_204() {
    let mock = MockMailer::failing();
    let app = util::app_with(mock.clone());

    let resp = app
        .oneshot(csp_request(
            "/csp-report",
            sample_report("https://app.signic.email/inbox"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(mock.send_count(), 1);
}

#[tokio::test]
async fn csp_fields_travel_in_the_rendered_metadata() {
    let mock = MockMailer::new();
    let app = util::app_with(mock.clone());

    app.oneshot(csp_request(
        "/csp-report",
        sample_report("https://app.signic.email/inbox"),
    ))
    .await
    .unwrap();

    let html = &mock.sent()[0].html;
    assert!(html.contains("Metadata"));
    assert!(html.contains("violated-directive"));
    assert!(html.contains("script-src &#039;self&#039;"));
}
