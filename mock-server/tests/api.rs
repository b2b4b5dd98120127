use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, Post};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- posts ---

#[tokio::test]
async fn seeded_post_is_readable() {
    let resp = app().oneshot(empty_request("GET", "/posts/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, 1);
    assert_eq!(post.user_id, 1);
}

#[tokio::test]
async fn create_post_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/posts", r#"{"userId":4,"title":"Hello"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, 2);
    assert_eq!(post.user_id, 4);
    assert_eq!(post.title, "Hello");
    assert!(post.body.is_empty());
}

#[tokio::test]
async fn create_post_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/posts", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_post_not_found() {
    let resp = app().oneshot(empty_request("GET", "/posts/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_post_bad_id_returns_400() {
    let resp = app().oneshot(empty_request("GET", "/posts/one")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_replaces_whole_post() {
    let resp = app()
        .oneshot(json_request("PUT", "/posts/1", r#"{"userId":2,"title":"Replaced"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, 1);
    assert_eq!(post.user_id, 2);
    assert_eq!(post.title, "Replaced");
    assert!(post.body.is_empty());
}

#[tokio::test]
async fn patch_keeps_omitted_fields() {
    let resp = app()
        .oneshot(json_request("PATCH", "/posts/1", r#"{"title":"Patched"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let post: Post = body_json(resp).await;
    assert_eq!(post.title, "Patched");
    assert_eq!(post.user_id, 1);
    assert_eq!(post.body, "quia et suscipit");
}

#[tokio::test]
async fn patch_post_not_found() {
    let resp = app()
        .oneshot(json_request("PATCH", "/posts/999", r#"{"title":"Nope"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_post_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/posts/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn posts_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/posts", r#"{"userId":1,"title":"Draft","body":"b"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Post = body_json(resp).await;
    let id = created.id;

    // list — seeded post plus the new one
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/posts"))
        .await
        .unwrap();
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1], created);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- echo endpoints ---

#[tokio::test]
async fn anything_reports_method_headers_and_body() {
    let req = Request::builder()
        .method("PATCH")
        .uri("/anything?x=1")
        .header(http::header::AUTHORIZATION, "Bearer abc")
        .body("key=value".to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.url, "/anything?x=1");
    assert_eq!(echo.headers["authorization"], "Bearer abc");
    assert_eq!(echo.data, "key=value");
}

#[tokio::test]
async fn echo_returns_body_verbatim() {
    let payload = r#"{"b": 2, "a": [1, 2]}"#;
    let resp = app()
        .oneshot(json_request("POST", "/echo", payload))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_bytes(resp).await, payload.as_bytes());
}

#[tokio::test]
async fn echo_without_content_type_is_octet_stream() {
    let resp = app()
        .oneshot(empty_request("PUT", "/echo"))
        .await
        .unwrap();

    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/octet-stream"
    );
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn status_endpoint_answers_with_requested_code() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/status/418"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(body_bytes(resp).await, "I'm a teapot".as_bytes());
}

#[tokio::test]
async fn status_endpoint_rejects_out_of_range_code() {
    let resp = app().oneshot(empty_request("GET", "/status/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
