//! In-memory stand-in for the timetabling server.
//!
//! Serves the subset of the API the client's integration tests drive: tags,
//! rooms, students, student groups with membership, timetables, the schema
//! editor and server settings. Everything lives in one `Store` behind an
//! `RwLock`; each handler takes the lock once, so bulk deletes are atomic.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub mod listing;
pub mod model;

use listing::{paginate, ListQuery, PageBody};
use model::{
    LessonBundle, Room, RoomRequest, ServerEmail, ServerEmailRequest, ServerStatistics, Student, StudentGroup,
    StudentGroupRequest, StudentRequest, SuccessResponse, Tag, TagRequest, Timetable, TimetableMetadata,
    TimetableRequest,
};

pub const DEFAULT_UCDL: &str = "name: default\nconstraints: []\n";

#[derive(Clone, Debug)]
struct RoomRecord {
    id: String,
    name: String,
    building_name: String,
    capacity: u32,
    tag_ids: Vec<String>,
}

#[derive(Clone, Debug)]
struct StudentRecord {
    id: String,
    first_name: String,
    last_name: String,
    tag_ids: Vec<String>,
}

#[derive(Clone, Debug)]
struct GroupRecord {
    id: String,
    name: String,
    student_ids: Vec<String>,
    tag_ids: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    tags: Vec<Tag>,
    rooms: Vec<RoomRecord>,
    students: Vec<StudentRecord>,
    groups: Vec<GroupRecord>,
    timetables: Vec<Timetable>,
    ucdl: Option<String>,
    email: Option<String>,
    metadata: TimetableMetadata,
}

pub type Db = Arc<RwLock<Store>>;

/// Error responses. Lookups of unknown ids answer 400 with a plain-text
/// reason; editor conflicts answer 409 with a `SuccessResponse` body.
#[derive(Debug)]
pub enum ApiFailure {
    NotFound(&'static str),
    BadRequest(String),
    Conflict(SuccessResponse),
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        match self {
            ApiFailure::NotFound(kind) => {
                (StatusCode::BAD_REQUEST, format!("Could not find a {kind} with this id")).into_response()
            }
            ApiFailure::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason).into_response(),
            ApiFailure::Conflict(body) => (StatusCode::CONFLICT, Json(body)).into_response(),
        }
    }
}

type ApiResult<T> = Result<T, ApiFailure>;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl Store {
    fn require_tags(&self, ids: &[String]) -> ApiResult<()> {
        match ids.iter().all(|id| self.tags.iter().any(|t| &t.id == id)) {
            true => Ok(()),
            false => Err(ApiFailure::NotFound("tag")),
        }
    }

    fn require_students(&self, ids: &[String]) -> ApiResult<()> {
        match ids.iter().all(|id| self.students.iter().any(|s| &s.id == id)) {
            true => Ok(()),
            false => Err(ApiFailure::NotFound("student")),
        }
    }

    fn tags_of(&self, ids: &[String]) -> Vec<Tag> {
        self.tags.iter().filter(|t| ids.contains(&t.id)).cloned().collect()
    }

    fn room(&self, record: &RoomRecord) -> Room {
        Room {
            building_name: record.building_name.clone(),
            capacity: record.capacity,
            id: record.id.clone(),
            name: record.name.clone(),
            tags: self.tags_of(&record.tag_ids),
        }
    }

    fn student(&self, record: &StudentRecord) -> Student {
        Student {
            first_name: record.first_name.clone(),
            id: record.id.clone(),
            last_name: record.last_name.clone(),
            tags: self.tags_of(&record.tag_ids),
        }
    }

    fn group(&self, record: &GroupRecord) -> StudentGroup {
        StudentGroup {
            grades: Vec::new(),
            id: record.id.clone(),
            name: record.name.clone(),
            students: self
                .students
                .iter()
                .filter(|s| record.student_ids.contains(&s.id))
                .map(|s| self.student(s))
                .collect(),
            subjects: Vec::new(),
            tags: self.tags_of(&record.tag_ids),
        }
    }
}

/// Remove every entry whose id is listed, or nothing if any id is unknown.
fn remove_all<T>(
    items: &mut Vec<T>,
    ids: &[String],
    id_of: impl Fn(&T) -> &str,
    kind: &'static str,
) -> ApiResult<()> {
    if !ids.iter().all(|id| items.iter().any(|item| id_of(item) == id)) {
        return Err(ApiFailure::NotFound(kind));
    }
    items.retain(|item| !ids.iter().any(|id| id == id_of(item)));
    Ok(())
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/tags", get(list_tags).post(create_tag).delete(delete_tags))
        .route("/tags/{id}", get(get_tag).put(update_tag))
        .route("/rooms", get(list_rooms).post(create_room).delete(delete_rooms))
        .route("/rooms/{id}", get(get_room).put(update_room))
        .route("/rooms/{id}/lessons", get(room_lessons))
        .route("/students", get(list_students).post(create_student).delete(delete_students))
        .route("/students/{id}", get(get_student).put(update_student))
        .route("/student-groups", get(list_groups).post(create_group))
        .route(
            "/student-groups/{id}",
            get(get_group).put(update_group).delete(delete_group),
        )
        .route(
            "/student-groups/{id}/students",
            post(add_group_students).delete(remove_group_students),
        )
        .route("/timetables", get(list_timetables).post(create_timetable))
        .route("/timetables/{id}", get(get_timetable).delete(delete_timetable))
        .route("/editor", get(get_ucdl).put(set_ucdl))
        .route("/editor/default", get(default_ucdl))
        .route("/editor/validate", put(validate_ucdl))
        .route("/server/email", get(get_email).put(set_email))
        .route("/server/statistics", get(statistics))
        .route("/server/timetable-metadata", get(get_metadata).put(set_metadata))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- tags ---

async fn list_tags(State(db): State<Db>, Query(pairs): Query<Vec<(String, String)>>) -> ApiResult<Json<Vec<Tag>>> {
    let query = ListQuery::parse(pairs)?;
    let store = db.read().await;
    let mut tags: Vec<Tag> = store.tags.iter().filter(|t| query.matches_search(&t.name)).cloned().collect();
    query.sort_by_name(&mut tags, |t| &t.name);
    Ok(Json(tags))
}

async fn create_tag(State(db): State<Db>, Json(input): Json<TagRequest>) -> Json<Tag> {
    let tag = Tag {
        id: new_id(),
        name: input.tag_name,
    };
    db.write().await.tags.push(tag.clone());
    tracing::info!(id = %tag.id, "tag created");
    Json(tag)
}

async fn get_tag(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Tag>> {
    let store = db.read().await;
    store.tags.iter().find(|t| t.id == id).cloned().map(Json).ok_or(ApiFailure::NotFound("tag"))
}

async fn update_tag(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TagRequest>,
) -> ApiResult<Json<Tag>> {
    let mut store = db.write().await;
    let tag = store.tags.iter_mut().find(|t| t.id == id).ok_or(ApiFailure::NotFound("tag"))?;
    tag.name = input.tag_name;
    Ok(Json(tag.clone()))
}

async fn delete_tags(State(db): State<Db>, Json(ids): Json<Vec<String>>) -> ApiResult<&'static str> {
    let mut store = db.write().await;
    remove_all(&mut store.tags, &ids, |t| &t.id, "tag")?;
    Ok("Successfully deleted tags")
}

// --- rooms ---

async fn list_rooms(
    State(db): State<Db>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<PageBody<Room>>> {
    let query = ListQuery::parse(pairs)?;
    let store = db.read().await;
    let mut rooms: Vec<Room> = store
        .rooms
        .iter()
        .filter(|r| query.matches_search(&r.name))
        .filter(|r| query.capacity.is_none_or(|min| r.capacity >= min))
        .filter(|r| query.matches_tags(&r.tag_ids))
        .map(|r| store.room(r))
        .collect();
    query.sort_by_name(&mut rooms, |r| &r.name);
    Ok(Json(paginate(rooms, &query)))
}

async fn create_room(State(db): State<Db>, Json(input): Json<RoomRequest>) -> ApiResult<Json<Room>> {
    let mut store = db.write().await;
    store.require_tags(&input.tag_ids)?;
    let record = RoomRecord {
        id: new_id(),
        name: input.name,
        building_name: input.building_name,
        capacity: input.capacity,
        tag_ids: input.tag_ids,
    };
    let room = store.room(&record);
    store.rooms.push(record);
    tracing::info!(id = %room.id, "room created");
    Ok(Json(room))
}

async fn get_room(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Room>> {
    let store = db.read().await;
    let record = store.rooms.iter().find(|r| r.id == id).ok_or(ApiFailure::NotFound("room"))?;
    Ok(Json(store.room(record)))
}

async fn update_room(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<RoomRequest>,
) -> ApiResult<Json<Room>> {
    let mut store = db.write().await;
    store.require_tags(&input.tag_ids)?;
    let record = store.rooms.iter_mut().find(|r| r.id == id).ok_or(ApiFailure::NotFound("room"))?;
    record.name = input.name;
    record.building_name = input.building_name;
    record.capacity = input.capacity;
    record.tag_ids = input.tag_ids;
    let record = record.clone();
    Ok(Json(store.room(&record)))
}

async fn delete_rooms(State(db): State<Db>, Json(ids): Json<Vec<String>>) -> ApiResult<&'static str> {
    let mut store = db.write().await;
    remove_all(&mut store.rooms, &ids, |r| &r.id, "room")?;
    tracing::info!(count = ids.len(), "rooms deleted");
    Ok("Successfully deleted rooms")
}

async fn room_lessons(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<LessonBundle>> {
    let store = db.read().await;
    let record = store.rooms.iter().find(|r| r.id == id).ok_or(ApiFailure::NotFound("room"))?;
    Ok(Json(LessonBundle {
        rooms: vec![store.room(record)],
        ..LessonBundle::default()
    }))
}

// --- students ---

async fn list_students(
    State(db): State<Db>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<PageBody<Student>>> {
    let query = ListQuery::parse(pairs)?;
    let store = db.read().await;
    let in_groups = |student_id: &str| {
        query.groups.iter().all(|gid| {
            store
                .groups
                .iter()
                .any(|g| &g.id == gid && g.student_ids.iter().any(|s| s == student_id))
        })
    };
    let mut students: Vec<Student> = store
        .students
        .iter()
        .filter(|s| query.matches_search(&format!("{} {}", s.first_name, s.last_name)))
        .filter(|s| query.matches_tags(&s.tag_ids))
        .filter(|s| in_groups(&s.id))
        .map(|s| store.student(s))
        .collect();
    query.sort_by_name(&mut students, |s| &s.last_name);
    Ok(Json(paginate(students, &query)))
}

async fn create_student(State(db): State<Db>, Json(input): Json<StudentRequest>) -> ApiResult<Json<Student>> {
    let mut store = db.write().await;
    store.require_tags(&input.tag_ids)?;
    let record = StudentRecord {
        id: new_id(),
        first_name: input.first_name,
        last_name: input.last_name,
        tag_ids: input.tag_ids,
    };
    let student = store.student(&record);
    store.students.push(record);
    Ok(Json(student))
}

async fn get_student(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Student>> {
    let store = db.read().await;
    let record = store.students.iter().find(|s| s.id == id).ok_or(ApiFailure::NotFound("student"))?;
    Ok(Json(store.student(record)))
}

async fn update_student(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<StudentRequest>,
) -> ApiResult<Json<Student>> {
    let mut store = db.write().await;
    store.require_tags(&input.tag_ids)?;
    let record = store.students.iter_mut().find(|s| s.id == id).ok_or(ApiFailure::NotFound("student"))?;
    record.first_name = input.first_name;
    record.last_name = input.last_name;
    record.tag_ids = input.tag_ids;
    let record = record.clone();
    Ok(Json(store.student(&record)))
}

async fn delete_students(State(db): State<Db>, Json(ids): Json<Vec<String>>) -> ApiResult<&'static str> {
    let mut store = db.write().await;
    remove_all(&mut store.students, &ids, |s| &s.id, "student")?;
    for group in &mut store.groups {
        group.student_ids.retain(|s| !ids.contains(s));
    }
    Ok("Successfully deleted students")
}

// --- student groups ---

async fn list_groups(
    State(db): State<Db>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<PageBody<StudentGroup>>> {
    let query = ListQuery::parse(pairs)?;
    let store = db.read().await;
    let mut groups: Vec<StudentGroup> = store
        .groups
        .iter()
        .filter(|g| query.matches_search(&g.name))
        .filter(|g| query.matches_tags(&g.tag_ids))
        .map(|g| store.group(g))
        .collect();
    query.sort_by_name(&mut groups, |g| &g.name);
    Ok(Json(paginate(groups, &query)))
}

async fn create_group(
    State(db): State<Db>,
    Json(input): Json<StudentGroupRequest>,
) -> ApiResult<Json<StudentGroup>> {
    let mut store = db.write().await;
    store.require_tags(&input.tag_ids)?;
    store.require_students(&input.student_ids)?;
    let record = GroupRecord {
        id: new_id(),
        name: input.name,
        student_ids: input.student_ids,
        tag_ids: input.tag_ids,
    };
    let group = store.group(&record);
    store.groups.push(record);
    Ok(Json(group))
}

async fn get_group(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<StudentGroup>> {
    let store = db.read().await;
    let record = store.groups.iter().find(|g| g.id == id).ok_or(ApiFailure::NotFound("student group"))?;
    Ok(Json(store.group(record)))
}

async fn update_group(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<StudentGroupRequest>,
) -> ApiResult<Json<StudentGroup>> {
    let mut store = db.write().await;
    store.require_tags(&input.tag_ids)?;
    store.require_students(&input.student_ids)?;
    let record = store.groups.iter_mut().find(|g| g.id == id).ok_or(ApiFailure::NotFound("student group"))?;
    record.name = input.name;
    record.student_ids = input.student_ids;
    record.tag_ids = input.tag_ids;
    let record = record.clone();
    Ok(Json(store.group(&record)))
}

async fn delete_group(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<&'static str> {
    let mut store = db.write().await;
    remove_all(&mut store.groups, &[id], |g| &g.id, "student group")?;
    Ok("Successfully deleted student group")
}

async fn add_group_students(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(student_ids): Json<Vec<String>>,
) -> ApiResult<Json<StudentGroup>> {
    let mut store = db.write().await;
    store.require_students(&student_ids)?;
    let record = store.groups.iter_mut().find(|g| g.id == id).ok_or(ApiFailure::NotFound("student group"))?;
    for student_id in student_ids {
        if !record.student_ids.contains(&student_id) {
            record.student_ids.push(student_id);
        }
    }
    let record = record.clone();
    Ok(Json(store.group(&record)))
}

async fn remove_group_students(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(student_ids): Json<Vec<String>>,
) -> ApiResult<&'static str> {
    let mut store = db.write().await;
    let record = store.groups.iter_mut().find(|g| g.id == id).ok_or(ApiFailure::NotFound("student group"))?;
    record.student_ids.retain(|s| !student_ids.contains(s));
    Ok("Successfully removed students from student group")
}

// --- timetables ---

async fn list_timetables(
    State(db): State<Db>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<PageBody<Timetable>>> {
    let query = ListQuery::parse(pairs)?;
    let store = db.read().await;
    let needle = query.name.as_deref().map(str::to_lowercase);
    let mut timetables: Vec<Timetable> = store
        .timetables
        .iter()
        .filter(|t| needle.as_deref().is_none_or(|n| t.name.to_lowercase().contains(n)))
        .cloned()
        .collect();
    query.sort_by_name(&mut timetables, |t| &t.name);
    Ok(Json(paginate(timetables, &query)))
}

async fn create_timetable(State(db): State<Db>, Json(input): Json<TimetableRequest>) -> Json<SuccessResponse> {
    let timetable = Timetable {
        id: new_id(),
        name: input.name,
    };
    let message = format!("Successfully created timetable {}", timetable.name);
    db.write().await.timetables.push(timetable);
    Json(SuccessResponse::ok(message))
}

async fn get_timetable(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Timetable>> {
    let store = db.read().await;
    store
        .timetables
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or(ApiFailure::NotFound("timetable"))
}

async fn delete_timetable(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<&'static str> {
    let mut store = db.write().await;
    remove_all(&mut store.timetables, &[id], |t| &t.id, "timetable")?;
    Ok("Successfully deleted timetable")
}

// --- editor ---

#[derive(Deserialize)]
struct UploadQuery {
    force: Option<bool>,
}

/// Text of the `file` field. A request without a multipart body, or without
/// that field, is a 400.
async fn uploaded_file(multipart: Result<Multipart, MultipartRejection>) -> ApiResult<String> {
    let mut multipart = multipart.map_err(|_| ApiFailure::BadRequest("No file uploaded".to_string()))?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiFailure::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            return field.text().await.map_err(|e| ApiFailure::BadRequest(e.to_string()));
        }
    }
    Err(ApiFailure::BadRequest("No file uploaded".to_string()))
}

async fn get_ucdl(State(db): State<Db>) -> String {
    db.read().await.ucdl.clone().unwrap_or_else(|| DEFAULT_UCDL.to_string())
}

async fn default_ucdl() -> &'static str {
    DEFAULT_UCDL
}

/// Replacing a stored document with a different one conflicts unless
/// `force=true`.
async fn set_ucdl(
    State(db): State<Db>,
    Query(upload): Query<UploadQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let document = uploaded_file(multipart).await?;
    let mut store = db.write().await;
    let conflicting = store.ucdl.as_ref().is_some_and(|current| *current != document);
    if conflicting && upload.force != Some(true) {
        tracing::warn!("schema upload rejected without force");
        return Err(ApiFailure::Conflict(SuccessResponse::failed(
            "Uploading this file would delete existing constraint instances",
        )));
    }
    store.ucdl = Some(document);
    Ok(Json(SuccessResponse::ok("Successfully uploaded file")))
}

async fn validate_ucdl(multipart: Result<Multipart, MultipartRejection>) -> ApiResult<Json<SuccessResponse>> {
    let document = uploaded_file(multipart).await?;
    if document.trim().is_empty() {
        return Ok(Json(SuccessResponse::failed("File is empty")));
    }
    Ok(Json(SuccessResponse::ok("File is valid")))
}

// --- server ---

async fn get_email(State(db): State<Db>) -> Json<ServerEmail> {
    let email = db.read().await.email.clone().unwrap_or_default();
    Json(ServerEmail { email })
}

async fn set_email(State(db): State<Db>, Json(input): Json<ServerEmailRequest>) -> &'static str {
    db.write().await.email = input.email;
    "Successfully updated email"
}

async fn statistics(State(db): State<Db>) -> Json<ServerStatistics> {
    let store = db.read().await;
    Json(ServerStatistics {
        constraint_count: 0,
        grade_count: 0,
        room_count: store.rooms.len() as u64,
        student_count: store.students.len() as u64,
        teacher_count: 0,
    })
}

async fn get_metadata(State(db): State<Db>) -> Json<TimetableMetadata> {
    Json(db.read().await.metadata.clone())
}

async fn set_metadata(State(db): State<Db>, Json(input): Json<TimetableMetadata>) -> &'static str {
    db.write().await.metadata = input;
    "Successfully updated timetable metadata"
}
