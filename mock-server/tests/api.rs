use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::model::{Room, StudentGroup, SuccessResponse, Tag};
use mock_server::{app, DEFAULT_UCDL};
use serde_json::Value;
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

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn upload(method: &str, uri: &str, contents: &str) -> Request<String> {
    let body = format!(
        "--XB\r\nContent-Disposition: form-data; name=\"file\"; filename=\"s.ucdl\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n{contents}\r\n--XB--\r\n"
    );
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "multipart/form-data; boundary=XB")
        .body(body)
        .unwrap()
}

/// Clones share the store, so state persists across calls.
async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn create_room(app: &Router, name: &str, capacity: u32) -> Room {
    let body = format!(r#"{{"buildingName":"Main","capacity":{capacity},"name":"{name}","tagIds":[]}}"#);
    let resp = send(app, json_request("POST", "/api/rooms", &body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

// --- tags ---

#[tokio::test]
async fn list_tags_empty() {
    let resp = app().oneshot(get("/api/tags")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let tags: Vec<Tag> = body_json(resp).await;
    assert!(tags.is_empty());
}

#[tokio::test]
async fn create_and_search_tags() {
    let app = app();
    for name in ["sports", "science", "Sportshall"] {
        let resp = send(&app, json_request("POST", "/api/tags", &format!(r#"{{"tagName":"{name}"}}"#))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let tags: Vec<Tag> = body_json(send(&app, get("/api/tags?search=sport&sort=name,desc")).await).await;
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["sports", "Sportshall"]);
}

#[tokio::test]
async fn create_tag_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/tags", r#"{"name":"x"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- rooms ---

#[tokio::test]
async fn get_room_unknown_id_returns_400() {
    let resp = app().oneshot(get("/api/rooms/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(&body_bytes(resp).await[..], b"Could not find a room with this id");
}

#[tokio::test]
async fn room_with_unknown_tag_is_rejected() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/rooms",
            r#"{"buildingName":"B","capacity":1,"name":"n","tagIds":["missing"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rooms_page_and_filter() {
    let app = app();
    for (name, capacity) in [("Gym", 100), ("Lab", 20), ("Gym annex", 40)] {
        create_room(&app, name, capacity).await;
    }

    let page: Value = body_json(send(&app, get("/api/rooms?page=0&size=1&search=gym")).await).await;
    assert_eq!(page["totalElements"], 2);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["numberOfElements"], 1);
    assert_eq!(page["last"], false);
    assert_eq!(page["first"], true);

    let page: Value = body_json(send(&app, get("/api/rooms?capacity=30&sort=name,asc")).await).await;
    let names: Vec<&str> = page["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Gym", "Gym annex"]);
}

#[tokio::test]
async fn rooms_invalid_page_size_returns_400() {
    let resp = app().oneshot(get("/api/rooms?size=0")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bulk_delete_rooms_is_all_or_nothing() {
    let app = app();
    let a = create_room(&app, "A", 1).await;
    let b = create_room(&app, "B", 1).await;

    let body = format!(r#"["{}","missing"]"#, a.id);
    let resp = send(&app, json_request("DELETE", "/api/rooms", &body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(send(&app, get(&format!("/api/rooms/{}", a.id))).await.status(), StatusCode::OK);

    let body = format!(r#"["{}","{}"]"#, a.id, b.id);
    let resp = send(&app, json_request("DELETE", "/api/rooms", &body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = body_json(send(&app, get("/api/rooms")).await).await;
    assert_eq!(page["empty"], true);
}

#[tokio::test]
async fn room_lessons_bundle_contains_room() {
    let app = app();
    let room = create_room(&app, "Gym", 30).await;
    let bundle: Value = body_json(send(&app, get(&format!("/api/rooms/{}/lessons", room.id))).await).await;
    assert_eq!(bundle["rooms"][0]["id"], room.id.as_str());
    assert!(bundle["lessons"].as_array().unwrap().is_empty());
}

// --- student groups ---

#[tokio::test]
async fn group_membership_responses_differ() {
    let app = app();
    let student: Value = body_json(
        send(
            &app,
            json_request("POST", "/api/students", r#"{"firstName":"Ada","lastName":"L","tagIds":[]}"#),
        )
        .await,
    )
    .await;
    let student_id = student["id"].as_str().unwrap().to_string();
    let group: StudentGroup = body_json(
        send(&app, json_request("POST", "/api/student-groups", r#"{"name":"5a"}"#)).await,
    )
    .await;

    let uri = format!("/api/student-groups/{}/students", group.id);
    let ids = format!(r#"["{student_id}"]"#);
    let added: StudentGroup = body_json(send(&app, json_request("POST", &uri, &ids)).await).await;
    assert_eq!(added.students.len(), 1);

    let resp = send(&app, json_request("DELETE", &uri, &ids)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = body_bytes(resp).await;
    assert!(serde_json::from_slice::<StudentGroup>(&text).is_err());

    let group: StudentGroup = body_json(send(&app, get(&format!("/api/student-groups/{}", group.id))).await).await;
    assert!(group.students.is_empty());
}

#[tokio::test]
async fn students_filter_by_group() {
    let app = app();
    let mut ids = Vec::new();
    for name in ["Ada", "Bob"] {
        let body = format!(r#"{{"firstName":"{name}","lastName":"X"}}"#);
        let s: Value = body_json(send(&app, json_request("POST", "/api/students", &body)).await).await;
        ids.push(s["id"].as_str().unwrap().to_string());
    }
    let body = format!(r#"{{"name":"g","studentIds":["{}"]}}"#, ids[0]);
    let group: StudentGroup = body_json(send(&app, json_request("POST", "/api/student-groups", &body)).await).await;

    let page: Value = body_json(send(&app, get(&format!("/api/students?groups={}", group.id))).await).await;
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["content"][0]["firstName"], "Ada");
}

// --- editor ---

#[tokio::test]
async fn editor_serves_default_until_upload() {
    let app = app();
    let text = body_bytes(send(&app, get("/api/editor")).await).await;
    assert_eq!(&text[..], DEFAULT_UCDL.as_bytes());

    let resp = send(&app, upload("PUT", "/api/editor", "name: mine")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = body_bytes(send(&app, get("/api/editor")).await).await;
    assert_eq!(&text[..], b"name: mine");
}

#[tokio::test]
async fn editor_conflict_needs_force() {
    let app = app();
    send(&app, upload("PUT", "/api/editor", "v1")).await;

    let resp = send(&app, upload("PUT", "/api/editor?force=false", "v2")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let diagnostic: SuccessResponse = body_json(resp).await;
    assert!(!diagnostic.success);

    let resp = send(&app, upload("PUT", "/api/editor?force=true", "v2")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn editor_upload_without_file_returns_400() {
    let resp = app()
        .oneshot(Request::builder().method("PUT").uri("/api/editor").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn validate_reports_empty_document() {
    let resp = app().oneshot(upload("PUT", "/api/editor/validate", "  ")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let result: SuccessResponse = body_json(resp).await;
    assert!(!result.success);
}

// --- server ---

#[tokio::test]
async fn email_round_trip() {
    let app = app();
    let resp = send(&app, json_request("PUT", "/api/server/email", r#"{"email":"admin@school.test"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let email: Value = body_json(send(&app, get("/api/server/email")).await).await;
    assert_eq!(email["email"], "admin@school.test");
}

#[tokio::test]
async fn statistics_count_rooms() {
    let app = app();
    create_room(&app, "A", 1).await;
    let stats: Value = body_json(send(&app, get("/api/server/statistics")).await).await;
    assert_eq!(stats["roomCount"], 1);
    assert_eq!(stats["studentCount"], 0);
}

#[tokio::test]
async fn routes_live_under_api_prefix() {
    let resp = app().oneshot(get("/rooms")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
