//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port and drives the typed
//! client over real HTTP, once through `ReqwestTransport` and once with the
//! host doing the I/O itself (ureq). This checks that the endpoint table,
//! query flattening and response decoding agree with an actual server.

use std::net::SocketAddr;

use timetable_core::{
    ApiError, Break, CallOptions, CancellationToken, ClientConfig, Direction, FileUpload, HttpMethod,
    HttpRequest, HttpResponse, NameFilter, Pageable, RequestArgs, RoomFilter, RoomRequest, SearchFilter,
    ServerEmailRequest, Sort, StudentFilter, StudentGroupRequest, StudentRequest, SuccessResponse, TagRequest,
    TaggedSearchFilter, TimetableClient, TimetableMetadata, TimetableRequest, UploadFlags,
};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> TimetableClient {
    TimetableClient::new(ClientConfig::default(), Some(&format!("http://{addr}"))).unwrap()
}

fn room(name: &str, capacity: u32, tag_ids: Vec<String>) -> RoomRequest {
    RoomRequest {
        building_name: "Main".to_string(),
        capacity,
        name: name.to_string(),
        tag_ids,
    }
}

fn student(first: &str) -> StudentRequest {
    StudentRequest {
        first_name: first.to_string(),
        last_name: "Doe".to_string(),
        tag_ids: Vec::new(),
    }
}

#[tokio::test]
async fn room_lifecycle() {
    let c = client(start_server());
    let opts = CallOptions::new();

    let tag = c
        .create_tag(&TagRequest { tag_name: "sports".to_string() }, &opts)
        .await
        .unwrap();
    let created = c.create_room(&room("Gym", 120, vec![tag.id.clone()]), &opts).await.unwrap();
    assert_eq!(created.tags, [tag.clone()]);

    let fetched = c.get_room(&created.id, &opts).await.unwrap();
    assert_eq!(fetched, created);

    // Updating twice with the same payload lands in the same state.
    let update = room("Big gym", 150, vec![tag.id.clone()]);
    let first = c.update_room(&created.id, &update, &opts).await.unwrap();
    let second = c.update_room(&created.id, &update, &opts).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(c.get_room(&created.id, &opts).await.unwrap(), second);

    let filter = RoomFilter {
        search: Some("gym".to_string()),
        capacity: None,
        tags: vec![tag.id.clone()],
    };
    let page = c.get_rooms(&Pageable::new(0, 10), &filter, &opts).await.unwrap();
    assert!(page.is_consistent());
    assert_eq!(page.content, [second.clone()]);

    let lessons = c.get_room_lessons(&created.id, &opts).await.unwrap();
    assert!(lessons.lessons.is_empty());
    assert_eq!(lessons.rooms, [second]);

    let ack = c.delete_rooms(&[created.id.clone()], &opts).await.unwrap();
    assert!(!ack.is_empty());

    let err = c.get_room(&created.id, &opts).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.body(), Some("Could not find a room with this id"));
}

#[tokio::test]
async fn paging_walks_every_room_once() {
    let c = client(start_server());
    let opts = CallOptions::new();
    for name in ["E", "B", "D", "A", "C"] {
        c.create_room(&room(name, 10, Vec::new()), &opts).await.unwrap();
    }

    let mut pageable = Pageable::new(0, 2).sorted_by("name", Direction::Asc);
    let mut names = Vec::new();
    loop {
        let page = c.get_rooms(&pageable, &RoomFilter::default(), &opts).await.unwrap();
        assert!(page.is_consistent());
        assert!(page.content.len() <= 2);
        assert_eq!(page.total_elements, 5);
        names.extend(page.content.iter().map(|r| r.name.clone()));
        match page.next_pageable(&pageable) {
            Some(next) => pageable = next,
            None => break,
        }
    }
    assert_eq!(names, ["A", "B", "C", "D", "E"]);
}

#[tokio::test]
async fn failed_bulk_delete_leaves_everything() {
    let c = client(start_server());
    let opts = CallOptions::new();
    let kept = c.create_room(&room("Lab", 20, Vec::new()), &opts).await.unwrap();

    let err = c
        .delete_rooms(&[kept.id.clone(), "missing".to_string()], &opts)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 400, .. }));
    assert_eq!(c.get_room(&kept.id, &opts).await.unwrap(), kept);
}

#[tokio::test]
async fn tags_are_searched_and_sorted() {
    let c = client(start_server());
    let opts = CallOptions::new();
    for name in ["music", "math", "art"] {
        c.create_tag(&TagRequest { tag_name: name.to_string() }, &opts).await.unwrap();
    }
    let tags = c
        .get_tags(&Sort::by("name", Direction::Desc), &SearchFilter::search("m"), &opts)
        .await
        .unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["music", "math"]);
}

#[tokio::test]
async fn group_membership() {
    let c = client(start_server());
    let opts = CallOptions::new();
    let ada = c.create_student(&student("Ada"), &opts).await.unwrap();
    let bob = c.create_student(&student("Bob"), &opts).await.unwrap();

    let request = StudentGroupRequest {
        grade_ids: Vec::new(),
        name: "5a".to_string(),
        student_ids: vec![ada.id.clone()],
        subject_ids: Vec::new(),
        tag_ids: Vec::new(),
    };
    let group = c.create_student_group(&request, &opts).await.unwrap();
    assert_eq!(group.students, [ada.clone()]);

    let updated = c
        .add_students_to_student_group(&group.id, &[bob.id.clone()], &opts)
        .await
        .unwrap();
    assert_eq!(updated.students.len(), 2);

    let in_group = c
        .get_students(
            &Pageable::default(),
            &StudentFilter {
                groups: vec![group.id.clone()],
                ..StudentFilter::default()
            },
            &opts,
        )
        .await
        .unwrap();
    assert_eq!(in_group.total_elements, 2);

    let ack = c
        .remove_students_from_student_group(&group.id, &[ada.id.clone()], &opts)
        .await
        .unwrap();
    assert!(!ack.is_empty());
    let group = c.get_student_group(&group.id, &opts).await.unwrap();
    assert_eq!(group.students, [bob]);

    let groups = c
        .get_student_groups(&Pageable::new(0, 5), &TaggedSearchFilter::default(), &opts)
        .await
        .unwrap();
    assert_eq!(groups.total_elements, 1);

    c.delete_student_group(&group.id, &opts).await.unwrap();
    let err = c.get_student_group(&group.id, &opts).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn editor_upload_conflict_and_force() {
    let c = client(start_server());
    let opts = CallOptions::new();

    let default_doc = c.get_default_ucdl_file(&opts).await.unwrap();
    assert_eq!(c.get_ucdl_file(&opts).await.unwrap(), default_doc);

    let v1 = FileUpload::new("school.ucdl", "name: v1\n");
    let ok = c.set_ucdl_file(Some(v1), &UploadFlags::default(), &opts).await.unwrap();
    assert!(ok.success);

    let v2 = FileUpload::new("school.ucdl", "name: v2\n");
    let err = c
        .set_ucdl_file(Some(v2.clone()), &UploadFlags::force(false), &opts)
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    let diagnostic: SuccessResponse = err.body_json().unwrap();
    assert!(!diagnostic.success);
    assert_eq!(c.get_ucdl_file(&opts).await.unwrap(), "name: v1\n");

    c.set_ucdl_file(Some(v2), &UploadFlags::force(true), &opts).await.unwrap();
    assert_eq!(c.get_ucdl_file(&opts).await.unwrap(), "name: v2\n");

    let checked = c
        .validate_ucdl_file(Some(FileUpload::new("x.ucdl", "name: x")), &opts)
        .await
        .unwrap();
    assert!(checked.success);

    let err = c.validate_ucdl_file(None, &opts).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn server_settings() {
    let c = client(start_server());
    let opts = CallOptions::new();

    let email = ServerEmailRequest {
        email: Some("office@school.test".to_string()),
    };
    c.set_notification_email(&email, &opts).await.unwrap();
    assert_eq!(c.get_notification_email(&opts).await.unwrap().email, "office@school.test");

    let metadata = TimetableMetadata {
        breaks: vec![Break {
            after_slot: 2,
            length: 15,
            long: Some(true),
        }],
        start_time: "07:45".to_string(),
        timeslot_length: 50,
        timeslots_amount: 8,
    };
    c.set_timetable_metadata(&metadata, &opts).await.unwrap();
    assert_eq!(c.get_timetable_metadata(&opts).await.unwrap(), metadata);

    c.create_student(&student("Ada"), &opts).await.unwrap();
    let stats = c.get_server_stats(&opts).await.unwrap();
    assert_eq!(stats.student_count, 1);
    assert_eq!(stats.room_count, 0);
}

#[tokio::test]
async fn timetables_by_name() {
    let c = client(start_server());
    let opts = CallOptions::new();
    for name in ["Spring 2026", "Autumn 2026"] {
        let ack = c
            .create_timetable(&TimetableRequest { name: name.to_string() }, &opts)
            .await
            .unwrap();
        assert!(ack.success);
    }

    let page = c
        .get_timetables(&Pageable::default(), &NameFilter::name("spring"), &opts)
        .await
        .unwrap();
    assert_eq!(page.content.len(), 1);
    let spring = &page.content[0];
    assert_eq!(c.get_timetable(&spring.id, &opts).await.unwrap(), *spring);

    c.delete_timetable(&spring.id, &opts).await.unwrap();
    let rest = c
        .get_timetables(&Pageable::default(), &NameFilter::default(), &opts)
        .await
        .unwrap();
    assert_eq!(rest.total_elements, 1);
}

#[tokio::test]
async fn cancelled_call_never_reaches_the_server() {
    let c = client(start_server());
    let token = CancellationToken::new();
    token.cancel();

    let err = c
        .create_room(&room("Ghost", 1, Vec::new()), &CallOptions::new().cancel_on(token))
        .await
        .unwrap_err();
    assert!(err.is_cancelled());

    let stats = c.get_server_stats(&CallOptions::new()).await.unwrap();
    assert_eq!(stats.room_count, 0);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr).get_server_stats(&CallOptions::new()).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

// ---------------------------------------------------------------------------
// Host does the I/O
// ---------------------------------------------------------------------------

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Execute an `HttpRequest` with ureq, returning 4xx/5xx as data so the
/// client does the status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let url = &req.url;
    let headers = &req.headers;

    let mut response = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => with_headers(agent.get(url), headers).call(),
        (HttpMethod::Delete, None) => with_headers(agent.delete(url), headers).call(),
        (HttpMethod::Delete, Some(body)) => with_headers(agent.delete(url), headers).force_send_body().send(body),
        (HttpMethod::Post, Some(body)) => with_headers(agent.post(url), headers).send(body),
        (HttpMethod::Post, None) => with_headers(agent.post(url), headers).send_empty(),
        (HttpMethod::Put, Some(body)) => with_headers(agent.put(url), headers).send(body),
        (HttpMethod::Put, None) => with_headers(agent.put(url), headers).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec().unwrap_or_default();
    HttpResponse::new(status, body)
}

/// A transport that is never called: the host drives `prepare`/`parse`.
struct HostIo;

#[test]
fn host_driven_round_trip() {
    let addr = start_server();
    let c = TimetableClient::with_transport(ClientConfig::new(&format!("http://{addr}/api")), HostIo);
    let opts = CallOptions::new();
    use timetable_core::endpoints::{CREATE_ROOM, DELETE_ROOMS, GET_ROOM, GET_ROOMS};

    let args = RequestArgs::new().json(&room("Aula", 300, Vec::new())).unwrap();
    let req = c.prepare(&CREATE_ROOM, args, &opts).unwrap();
    let created = c.parse(&CREATE_ROOM, execute(req)).unwrap();

    let req = c.prepare(&GET_ROOM, RequestArgs::new().path(&created.id), &opts).unwrap();
    assert_eq!(c.parse(&GET_ROOM, execute(req)).unwrap(), created);

    let filter = RoomFilter {
        capacity: Some(200),
        ..RoomFilter::default()
    };
    let args = RequestArgs::new().query(&Pageable::new(0, 10)).query(&filter);
    let req = c.prepare(&GET_ROOMS, args, &opts).unwrap();
    let page = c.parse(&GET_ROOMS, execute(req)).unwrap();
    assert_eq!(page.content, [created.clone()]);

    let ids = vec![created.id.clone()];
    let req = c.prepare(&DELETE_ROOMS, RequestArgs::new().json(&ids).unwrap(), &opts).unwrap();
    c.parse(&DELETE_ROOMS, execute(req)).unwrap();

    let req = c.prepare(&GET_ROOM, RequestArgs::new().path(&created.id), &opts).unwrap();
    let err = c.parse(&GET_ROOM, execute(req)).unwrap_err();
    assert_eq!(err.status(), Some(400));
}
