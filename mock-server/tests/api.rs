use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{
    app, app_with_journal, large_download_body, Ack, Journal, RecordedRequest, DOWNLOAD_BODY,
    LARGE_DOWNLOAD_LEN,
};
use tower::ServiceExt;

const BEARER: &str = "Bearer a_token";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, BEARER)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

// --- default ack ---

#[tokio::test]
async fn unknown_path_is_acknowledged() {
    let resp = app()
        .oneshot(authed("GET", "/v3/signatures/an_id.json", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ack: Ack = body_json(resp).await;
    assert_eq!(ack.method, "GET");
    assert_eq!(ack.path, "/v3/signatures/an_id.json");
}

#[tokio::test]
async fn missing_bearer_token_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/v3/account.json")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- special rules ---

#[tokio::test]
async fn missing_segment_returns_404() {
    let resp = app()
        .oneshot(authed("GET", "/v3/contacts/missing.json", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let payload: serde_json::Value = body_json(resp).await;
    assert_eq!(payload["message"], "not found");
}

#[tokio::test]
async fn broken_segment_returns_non_json() {
    let resp = app()
        .oneshot(authed("GET", "/v3/emails/broken.json", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&body).is_err());
}

#[tokio::test]
async fn download_returns_fixed_bytes() {
    let resp = app()
        .oneshot(authed(
            "GET",
            "/v3/signatures/a/documents/b/download/signed",
            "",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(&body_bytes(resp).await[..], DOWNLOAD_BODY);
}

#[tokio::test]
async fn large_download_is_served_in_full() {
    let resp = app()
        .oneshot(authed(
            "GET",
            "/v3/signatures/large/documents/b/download/signed",
            "",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_bytes(resp).await;
    assert_eq!(body.len(), LARGE_DOWNLOAD_LEN);
    assert_eq!(&body[..], &large_download_body()[..]);
}

// --- journal ---

#[tokio::test]
async fn journal_records_and_clears() {
    use tower::Service;

    let journal = Journal::default();
    let mut app = app_with_journal(journal.clone()).into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(authed(
            "POST",
            "/v3/contacts.json?x=1",
            "email=bob%40example.com&name=Bob",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // list through the control route
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .uri("/_requests")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let recorded: Vec<RecordedRequest> = body_json(resp).await;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].path, "/v3/contacts.json");
    assert_eq!(recorded[0].query.as_deref(), Some("x=1"));
    assert_eq!(recorded[0].authorization.as_deref(), Some(BEARER));
    assert_eq!(recorded[0].body, "email=bob%40example.com&name=Bob");

    // the control route itself is not recorded
    assert_eq!(journal.read().await.len(), 1);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri("/_requests")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(journal.read().await.is_empty());
}

#[tokio::test]
async fn unauthorized_requests_are_still_recorded() {
    let journal = Journal::default();
    let resp = app_with_journal(journal.clone())
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/v3/team/users/u1.json")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let recorded = journal.read().await;
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].authorization.is_none());
}

#[tokio::test]
async fn uploads_over_two_mib_are_recorded() {
    let journal = Journal::default();
    let upload = "a".repeat(3 * 1024 * 1024);
    let resp = app_with_journal(journal.clone())
        .oneshot(authed("PUT", "/v3/brandings/b1/logo.json", &upload))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let recorded = journal.read().await;
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].body.len(), upload.len());
}
