//! Stateless client for the timetabling API.
//!
//! # Design
//! `TimetableClient` holds an immutable `ClientConfig` and a `Transport`;
//! nothing changes between calls. Every operation goes through the same two
//! halves the host-does-IO pattern needs: `prepare` turns an endpoint from
//! the table plus its arguments into an `HttpRequest`, `parse` turns an
//! `HttpResponse` into the endpoint's declared output. `dispatch` runs both
//! around the transport and adds cancellation. The typed operations at the
//! bottom of this file only bind their arguments to a table entry.

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::endpoint::{BodyKind, Endpoint, ResponseShape};
use crate::endpoints;
use crate::error::ApiError;
use crate::filters::{
    ArgumentFilter, NameFilter, RoomFilter, SearchFilter, StudentFilter, TaggedSearchFilter, TeacherFilter,
    TimeslotFilter, UploadFlags,
};
use crate::http::{merge_headers, FileUpload, HttpRequest, HttpResponse, MultipartForm};
use crate::paging::{Page, Pageable, Sort};
use crate::query::{expand_path, Explode, QueryParams};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{
    ConstraintInstance, ConstraintInstanceRequest, ConstraintInstancesResponse, ConstraintSignature,
    CurriculumRequest, CurriculumResponse, GradeRequest, GradeResponse, LessonResponse, Room, RoomRequest,
    ServerEmailRequest, ServerEmailResponse, ServerStatistics, Student, StudentGroupRequest,
    StudentGroupResponse, StudentRequest, Subject, SubjectRequest, SuccessResponse, Tag, TagRequest, Teacher,
    TeacherRequest, Timeslot, TimeslotRequest, Timetable, TimetableMetadata, TimetableRequest,
};

/// Per-call options: extra headers and a cancellation token.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub headers: Vec<(String, String)>,
    pub cancel: Option<CancellationToken>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Json(Vec<u8>),
    Multipart(MultipartForm),
}

impl Body {
    fn kind(&self) -> BodyKind {
        match self {
            Body::Json(_) => BodyKind::Json,
            Body::Multipart(_) => BodyKind::Multipart,
        }
    }
}

/// Arguments bound to an endpoint: path segments in template order, the
/// exploded query and an optional body.
#[derive(Debug, Clone, Default)]
pub struct RequestArgs<'a> {
    path: Vec<&'a str>,
    query: QueryParams,
    body: Option<Body>,
}

impl<'a> RequestArgs<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, segment: &'a str) -> Self {
        self.path.push(segment);
        self
    }

    pub fn query(mut self, params: &impl Explode) -> Self {
        self.query.extend(params);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.body = Some(Body::Json(bytes));
        Ok(self)
    }

    /// Attach `file` as the `file` field of a multipart body. `None` sends
    /// no body at all.
    pub fn file(mut self, file: Option<FileUpload>) -> Self {
        self.body = file.map(|file| Body::Multipart(MultipartForm::new().file("file", file)));
        self
    }
}

/// Client for the timetabling REST API.
#[derive(Debug, Clone)]
pub struct TimetableClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl TimetableClient<ReqwestTransport> {
    /// Client over `reqwest`. `origin` resolves a relative base URL such as
    /// the default `/api`.
    pub fn new(config: ClientConfig, origin: Option<&str>) -> Result<Self, ApiError> {
        let transport = match origin {
            Some(origin) => ReqwestTransport::new().with_origin(origin)?,
            None => ReqwestTransport::new(),
        };
        Ok(Self::with_transport(config, transport))
    }
}

impl<T> TimetableClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `endpoint` without sending it.
    pub fn prepare<S: ResponseShape>(
        &self,
        endpoint: &Endpoint<S>,
        args: RequestArgs<'_>,
        opts: &CallOptions,
    ) -> Result<HttpRequest, ApiError> {
        let path = expand_path(endpoint.path, &args.path)?;
        let url = format!("{}{}{}", self.config.base(), path, args.query.to_query_string());

        match (endpoint.body, args.body.as_ref().map(Body::kind)) {
            (BodyKind::Empty, None)
            | (BodyKind::Json, Some(BodyKind::Json))
            | (BodyKind::Multipart, None | Some(BodyKind::Multipart)) => {}
            (expected, got) => {
                return Err(ApiError::InvalidRequest(format!(
                    "{} takes a {expected:?} body, got {got:?}",
                    endpoint.name
                )));
            }
        }

        let mut endpoint_headers = Vec::new();
        if let Some(accept) = S::ACCEPT {
            endpoint_headers.push(("accept".to_string(), accept.to_string()));
        }
        let body = match args.body {
            Some(Body::Json(bytes)) => {
                endpoint_headers.push(("content-type".to_string(), "application/json".to_string()));
                Some(bytes)
            }
            Some(Body::Multipart(form)) => {
                endpoint_headers.push(("content-type".to_string(), form.content_type()));
                Some(form.to_bytes())
            }
            None => None,
        };

        let headers = merge_headers(
            &merge_headers(&self.config.default_headers, &endpoint_headers),
            &opts.headers,
        );

        Ok(HttpRequest {
            method: endpoint.method,
            url,
            headers,
            body,
        })
    }

    /// Classify a response for `endpoint` and decode its body.
    pub fn parse<S: ResponseShape>(
        &self,
        endpoint: &Endpoint<S>,
        response: HttpResponse,
    ) -> Result<S::Output, ApiError> {
        check_status(&response)?;
        S::decode(&response.body).map_err(|e| {
            tracing::debug!(operation = endpoint.name, error = %e, "response did not match declared shape");
            e
        })
    }
}

impl<T: Transport> TimetableClient<T> {
    /// Prepare, send and parse a call to `endpoint`.
    ///
    /// A cancelled token, before or while the transport is awaited, yields
    /// `ApiError::Cancelled` and drops the in-flight request.
    pub async fn dispatch<S: ResponseShape>(
        &self,
        endpoint: &Endpoint<S>,
        args: RequestArgs<'_>,
        opts: &CallOptions,
    ) -> Result<S::Output, ApiError> {
        let request = self.prepare(endpoint, args, opts)?;
        tracing::debug!(
            operation = endpoint.name,
            method = %request.method,
            url = %request.url,
            "dispatching request"
        );

        let sent = match &opts.cancel {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    tracing::debug!(operation = endpoint.name, "request cancelled");
                    return Err(ApiError::Cancelled);
                }
                sent = self.transport.send(request) => sent,
            },
            None => self.transport.send(request).await,
        };

        let response = sent.map_err(|e| {
            tracing::warn!(operation = endpoint.name, error = %e, "request failed without response");
            e
        })?;
        tracing::debug!(operation = endpoint.name, status = response.status, "response received");
        self.parse(endpoint, response)
    }

    // -----------------------------------------------------------------------
    // Constraints
    // -----------------------------------------------------------------------

    pub async fn get_constraint_signatures(
        &self,
        pageable: &Pageable,
        filter: &NameFilter,
        opts: &CallOptions,
    ) -> Result<Page<ConstraintSignature>, ApiError> {
        let args = RequestArgs::new().query(pageable).query(filter);
        self.dispatch(&endpoints::GET_CONSTRAINT_SIGNATURES, args, opts).await
    }

    pub async fn get_constraint_signature(
        &self,
        signature_id: &str,
        opts: &CallOptions,
    ) -> Result<ConstraintSignature, ApiError> {
        let args = RequestArgs::new().path(signature_id);
        self.dispatch(&endpoints::GET_CONSTRAINT_SIGNATURE, args, opts).await
    }

    /// Deletes the listed instances. The request is sent even for an empty
    /// list; the server decides what that means.
    pub async fn delete_constraint_instance(
        &self,
        signature_id: &str,
        ids: &[String],
        opts: &CallOptions,
    ) -> Result<String, ApiError> {
        let args = RequestArgs::new().path(signature_id).json(ids)?;
        self.dispatch(&endpoints::DELETE_CONSTRAINT_INSTANCE, args, opts).await
    }

    pub async fn get_constraint_instances(
        &self,
        signature_id: &str,
        pageable: &Pageable,
        filter: &ArgumentFilter,
        opts: &CallOptions,
    ) -> Result<ConstraintInstancesResponse, ApiError> {
        let args = RequestArgs::new().path(signature_id).query(pageable).query(filter);
        self.dispatch(&endpoints::GET_CONSTRAINT_INSTANCES, args, opts).await
    }

    pub async fn create_constraint_instance(
        &self,
        signature_id: &str,
        body: &ConstraintInstanceRequest,
        opts: &CallOptions,
    ) -> Result<ConstraintInstance, ApiError> {
        let args = RequestArgs::new().path(signature_id).json(body)?;
        self.dispatch(&endpoints::CREATE_CONSTRAINT_INSTANCE, args, opts).await
    }

    pub async fn get_constraint_instance_by_id(
        &self,
        signature_id: &str,
        id: &str,
        opts: &CallOptions,
    ) -> Result<ConstraintInstancesResponse, ApiError> {
        let args = RequestArgs::new().path(signature_id).path(id);
        self.dispatch(&endpoints::GET_CONSTRAINT_INSTANCE_BY_ID, args, opts).await
    }

    pub async fn update_constraint_instance_by_id(
        &self,
        signature_id: &str,
        id: &str,
        body: &ConstraintInstanceRequest,
        opts: &CallOptions,
    ) -> Result<ConstraintInstance, ApiError> {
        let args = RequestArgs::new().path(signature_id).path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_CONSTRAINT_INSTANCE_BY_ID, args, opts).await
    }

    // -----------------------------------------------------------------------
    // Curriculum
    // -----------------------------------------------------------------------

    pub async fn get_curriculums(
        &self,
        pageable: &Pageable,
        filter: &NameFilter,
        opts: &CallOptions,
    ) -> Result<Page<CurriculumResponse>, ApiError> {
        let args = RequestArgs::new().query(pageable).query(filter);
        self.dispatch(&endpoints::GET_CURRICULUMS, args, opts).await
    }

    pub async fn create_curriculum(
        &self,
        body: &CurriculumRequest,
        opts: &CallOptions,
    ) -> Result<CurriculumResponse, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_CURRICULUM, args, opts).await
    }

    pub async fn delete_curriculum(&self, id: &str, opts: &CallOptions) -> Result<String, ApiError> {
        self.dispatch(&endpoints::DELETE_CURRICULUM, RequestArgs::new().path(id), opts).await
    }

    pub async fn get_curriculum(&self, id: &str, opts: &CallOptions) -> Result<CurriculumResponse, ApiError> {
        self.dispatch(&endpoints::GET_CURRICULUM, RequestArgs::new().path(id), opts).await
    }

    pub async fn update_curriculum(
        &self,
        id: &str,
        body: &CurriculumRequest,
        opts: &CallOptions,
    ) -> Result<CurriculumResponse, ApiError> {
        let args = RequestArgs::new().path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_CURRICULUM, args, opts).await
    }

    // -----------------------------------------------------------------------
    // Editor
    // -----------------------------------------------------------------------

    pub async fn get_ucdl_file(&self, opts: &CallOptions) -> Result<String, ApiError> {
        self.dispatch(&endpoints::GET_UCDL_FILE, RequestArgs::new(), opts).await
    }

    /// Replace the schema document. A conflict is reported as
    /// `ApiError::Status` (409) unless `flags.force` is set.
    pub async fn set_ucdl_file(
        &self,
        file: Option<FileUpload>,
        flags: &UploadFlags,
        opts: &CallOptions,
    ) -> Result<SuccessResponse, ApiError> {
        let args = RequestArgs::new().query(flags).file(file);
        self.dispatch(&endpoints::SET_UCDL_FILE, args, opts).await
    }

    pub async fn get_default_ucdl_file(&self, opts: &CallOptions) -> Result<String, ApiError> {
        self.dispatch(&endpoints::GET_DEFAULT_UCDL_FILE, RequestArgs::new(), opts).await
    }

    pub async fn validate_ucdl_file(
        &self,
        file: Option<FileUpload>,
        opts: &CallOptions,
    ) -> Result<SuccessResponse, ApiError> {
        let args = RequestArgs::new().file(file);
        self.dispatch(&endpoints::VALIDATE_UCDL_FILE, args, opts).await
    }

    // -----------------------------------------------------------------------
    // Grades
    // -----------------------------------------------------------------------

    pub async fn delete_grades(&self, ids: &[String], opts: &CallOptions) -> Result<SuccessResponse, ApiError> {
        let args = RequestArgs::new().json(ids)?;
        self.dispatch(&endpoints::DELETE_GRADES, args, opts).await
    }

    pub async fn get_grades(
        &self,
        sort: &Sort,
        filter: &TaggedSearchFilter,
        opts: &CallOptions,
    ) -> Result<Vec<GradeResponse>, ApiError> {
        let args = RequestArgs::new().query(sort).query(filter);
        self.dispatch(&endpoints::GET_GRADES, args, opts).await
    }

    pub async fn create_grade(&self, body: &GradeRequest, opts: &CallOptions) -> Result<GradeResponse, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_GRADE, args, opts).await
    }

    pub async fn get_grade(&self, id: &str, opts: &CallOptions) -> Result<GradeResponse, ApiError> {
        self.dispatch(&endpoints::GET_GRADE, RequestArgs::new().path(id), opts).await
    }

    pub async fn update_grade(
        &self,
        id: &str,
        body: &GradeRequest,
        opts: &CallOptions,
    ) -> Result<GradeResponse, ApiError> {
        let args = RequestArgs::new().path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_GRADE, args, opts).await
    }

    pub async fn get_grade_lessons(&self, id: &str, opts: &CallOptions) -> Result<LessonResponse, ApiError> {
        self.dispatch(&endpoints::GET_GRADE_LESSONS, RequestArgs::new().path(id), opts).await
    }

    // -----------------------------------------------------------------------
    // Rooms
    // -----------------------------------------------------------------------

    pub async fn delete_rooms(&self, ids: &[String], opts: &CallOptions) -> Result<String, ApiError> {
        let args = RequestArgs::new().json(ids)?;
        self.dispatch(&endpoints::DELETE_ROOMS, args, opts).await
    }

    pub async fn get_rooms(
        &self,
        pageable: &Pageable,
        filter: &RoomFilter,
        opts: &CallOptions,
    ) -> Result<Page<Room>, ApiError> {
        let args = RequestArgs::new().query(pageable).query(filter);
        self.dispatch(&endpoints::GET_ROOMS, args, opts).await
    }

    pub async fn create_room(&self, body: &RoomRequest, opts: &CallOptions) -> Result<Room, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_ROOM, args, opts).await
    }

    pub async fn get_room(&self, id: &str, opts: &CallOptions) -> Result<Room, ApiError> {
        self.dispatch(&endpoints::GET_ROOM, RequestArgs::new().path(id), opts).await
    }

    pub async fn update_room(&self, id: &str, body: &RoomRequest, opts: &CallOptions) -> Result<Room, ApiError> {
        let args = RequestArgs::new().path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_ROOM, args, opts).await
    }

    pub async fn get_room_lessons(&self, id: &str, opts: &CallOptions) -> Result<LessonResponse, ApiError> {
        self.dispatch(&endpoints::GET_ROOM_LESSONS, RequestArgs::new().path(id), opts).await
    }

    // -----------------------------------------------------------------------
    // Server
    // -----------------------------------------------------------------------

    pub async fn get_notification_email(&self, opts: &CallOptions) -> Result<ServerEmailResponse, ApiError> {
        self.dispatch(&endpoints::GET_NOTIFICATION_EMAIL, RequestArgs::new(), opts).await
    }

    pub async fn set_notification_email(
        &self,
        body: &ServerEmailRequest,
        opts: &CallOptions,
    ) -> Result<String, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::SET_NOTIFICATION_EMAIL, args, opts).await
    }

    pub async fn get_server_stats(&self, opts: &CallOptions) -> Result<ServerStatistics, ApiError> {
        self.dispatch(&endpoints::GET_SERVER_STATS, RequestArgs::new(), opts).await
    }

    pub async fn get_timetable_metadata(&self, opts: &CallOptions) -> Result<TimetableMetadata, ApiError> {
        self.dispatch(&endpoints::GET_TIMETABLE_METADATA, RequestArgs::new(), opts).await
    }

    pub async fn set_timetable_metadata(
        &self,
        body: &TimetableMetadata,
        opts: &CallOptions,
    ) -> Result<String, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::SET_TIMETABLE_METADATA, args, opts).await
    }

    // -----------------------------------------------------------------------
    // Student groups
    // -----------------------------------------------------------------------

    pub async fn get_student_groups(
        &self,
        pageable: &Pageable,
        filter: &TaggedSearchFilter,
        opts: &CallOptions,
    ) -> Result<Page<StudentGroupResponse>, ApiError> {
        let args = RequestArgs::new().query(pageable).query(filter);
        self.dispatch(&endpoints::GET_STUDENT_GROUPS, args, opts).await
    }

    pub async fn create_student_group(
        &self,
        body: &StudentGroupRequest,
        opts: &CallOptions,
    ) -> Result<StudentGroupResponse, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_STUDENT_GROUP, args, opts).await
    }

    pub async fn delete_student_group(&self, id: &str, opts: &CallOptions) -> Result<String, ApiError> {
        self.dispatch(&endpoints::DELETE_STUDENT_GROUP, RequestArgs::new().path(id), opts).await
    }

    pub async fn get_student_group(&self, id: &str, opts: &CallOptions) -> Result<StudentGroupResponse, ApiError> {
        self.dispatch(&endpoints::GET_STUDENT_GROUP, RequestArgs::new().path(id), opts).await
    }

    pub async fn update_student_group(
        &self,
        id: &str,
        body: &StudentGroupRequest,
        opts: &CallOptions,
    ) -> Result<StudentGroupResponse, ApiError> {
        let args = RequestArgs::new().path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_STUDENT_GROUP, args, opts).await
    }

    pub async fn get_student_group_lessons(&self, id: &str, opts: &CallOptions) -> Result<LessonResponse, ApiError> {
        self.dispatch(&endpoints::GET_STUDENT_GROUP_LESSONS, RequestArgs::new().path(id), opts).await
    }

    /// Returns the server's plain-text acknowledgment, not the updated
    /// group: the API answers removal and addition differently.
    pub async fn remove_students_from_student_group(
        &self,
        id: &str,
        student_ids: &[String],
        opts: &CallOptions,
    ) -> Result<String, ApiError> {
        let args = RequestArgs::new().path(id).json(student_ids)?;
        self.dispatch(&endpoints::REMOVE_STUDENTS_FROM_STUDENT_GROUP, args, opts).await
    }

    pub async fn add_students_to_student_group(
        &self,
        id: &str,
        student_ids: &[String],
        opts: &CallOptions,
    ) -> Result<StudentGroupResponse, ApiError> {
        let args = RequestArgs::new().path(id).json(student_ids)?;
        self.dispatch(&endpoints::ADD_STUDENTS_TO_STUDENT_GROUP, args, opts).await
    }

    // -----------------------------------------------------------------------
    // Students
    // -----------------------------------------------------------------------

    pub async fn delete_students(&self, ids: &[String], opts: &CallOptions) -> Result<String, ApiError> {
        let args = RequestArgs::new().json(ids)?;
        self.dispatch(&endpoints::DELETE_STUDENTS, args, opts).await
    }

    pub async fn get_students(
        &self,
        pageable: &Pageable,
        filter: &StudentFilter,
        opts: &CallOptions,
    ) -> Result<Page<Student>, ApiError> {
        let args = RequestArgs::new().query(pageable).query(filter);
        self.dispatch(&endpoints::GET_STUDENTS, args, opts).await
    }

    pub async fn create_student(&self, body: &StudentRequest, opts: &CallOptions) -> Result<Student, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_STUDENT, args, opts).await
    }

    pub async fn get_student(&self, id: &str, opts: &CallOptions) -> Result<Student, ApiError> {
        self.dispatch(&endpoints::GET_STUDENT, RequestArgs::new().path(id), opts).await
    }

    pub async fn update_student(
        &self,
        id: &str,
        body: &StudentRequest,
        opts: &CallOptions,
    ) -> Result<Student, ApiError> {
        let args = RequestArgs::new().path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_STUDENT, args, opts).await
    }

    pub async fn get_student_lessons(&self, id: &str, opts: &CallOptions) -> Result<LessonResponse, ApiError> {
        self.dispatch(&endpoints::GET_STUDENT_LESSONS, RequestArgs::new().path(id), opts).await
    }

    // -----------------------------------------------------------------------
    // Subjects
    // -----------------------------------------------------------------------

    pub async fn delete_subjects(&self, ids: &[String], opts: &CallOptions) -> Result<String, ApiError> {
        let args = RequestArgs::new().json(ids)?;
        self.dispatch(&endpoints::DELETE_SUBJECTS, args, opts).await
    }

    pub async fn get_subjects(
        &self,
        sort: &Sort,
        filter: &SearchFilter,
        opts: &CallOptions,
    ) -> Result<Vec<Subject>, ApiError> {
        let args = RequestArgs::new().query(sort).query(filter);
        self.dispatch(&endpoints::GET_SUBJECTS, args, opts).await
    }

    pub async fn create_subject(&self, body: &SubjectRequest, opts: &CallOptions) -> Result<Subject, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_SUBJECT, args, opts).await
    }

    pub async fn get_subject(&self, id: &str, opts: &CallOptions) -> Result<Subject, ApiError> {
        self.dispatch(&endpoints::GET_SUBJECT, RequestArgs::new().path(id), opts).await
    }

    pub async fn update_subject(
        &self,
        id: &str,
        body: &SubjectRequest,
        opts: &CallOptions,
    ) -> Result<Subject, ApiError> {
        let args = RequestArgs::new().path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_SUBJECT, args, opts).await
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    pub async fn delete_tags(&self, ids: &[String], opts: &CallOptions) -> Result<String, ApiError> {
        let args = RequestArgs::new().json(ids)?;
        self.dispatch(&endpoints::DELETE_TAGS, args, opts).await
    }

    pub async fn get_tags(&self, sort: &Sort, filter: &SearchFilter, opts: &CallOptions) -> Result<Vec<Tag>, ApiError> {
        let args = RequestArgs::new().query(sort).query(filter);
        self.dispatch(&endpoints::GET_TAGS, args, opts).await
    }

    pub async fn create_tag(&self, body: &TagRequest, opts: &CallOptions) -> Result<Tag, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_TAG, args, opts).await
    }

    pub async fn get_tag(&self, id: &str, opts: &CallOptions) -> Result<Tag, ApiError> {
        self.dispatch(&endpoints::GET_TAG, RequestArgs::new().path(id), opts).await
    }

    pub async fn update_tag(&self, id: &str, body: &TagRequest, opts: &CallOptions) -> Result<Tag, ApiError> {
        let args = RequestArgs::new().path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_TAG, args, opts).await
    }

    // -----------------------------------------------------------------------
    // Teachers
    // -----------------------------------------------------------------------

    pub async fn delete_teachers(&self, ids: &[String], opts: &CallOptions) -> Result<String, ApiError> {
        let args = RequestArgs::new().json(ids)?;
        self.dispatch(&endpoints::DELETE_TEACHERS, args, opts).await
    }

    pub async fn get_teachers(
        &self,
        pageable: &Pageable,
        filter: &TeacherFilter,
        opts: &CallOptions,
    ) -> Result<Page<Teacher>, ApiError> {
        let args = RequestArgs::new().query(pageable).query(filter);
        self.dispatch(&endpoints::GET_TEACHERS, args, opts).await
    }

    pub async fn create_teacher(&self, body: &TeacherRequest, opts: &CallOptions) -> Result<Teacher, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_TEACHER, args, opts).await
    }

    pub async fn get_teacher(&self, id: &str, opts: &CallOptions) -> Result<Teacher, ApiError> {
        self.dispatch(&endpoints::GET_TEACHER, RequestArgs::new().path(id), opts).await
    }

    pub async fn update_teacher(
        &self,
        id: &str,
        body: &TeacherRequest,
        opts: &CallOptions,
    ) -> Result<Teacher, ApiError> {
        let args = RequestArgs::new().path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_TEACHER, args, opts).await
    }

    pub async fn get_teacher_lessons(&self, id: &str, opts: &CallOptions) -> Result<LessonResponse, ApiError> {
        self.dispatch(&endpoints::GET_TEACHER_LESSONS, RequestArgs::new().path(id), opts).await
    }

    // -----------------------------------------------------------------------
    // Timeslots
    // -----------------------------------------------------------------------

    pub async fn get_timeslots(&self, filter: &TimeslotFilter, opts: &CallOptions) -> Result<Vec<Timeslot>, ApiError> {
        self.dispatch(&endpoints::GET_TIMESLOTS, RequestArgs::new().query(filter), opts).await
    }

    pub async fn create_timeslot(&self, body: &TimeslotRequest, opts: &CallOptions) -> Result<Timeslot, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_TIMESLOT, args, opts).await
    }

    pub async fn delete_timeslot(&self, id: &str, opts: &CallOptions) -> Result<String, ApiError> {
        self.dispatch(&endpoints::DELETE_TIMESLOT, RequestArgs::new().path(id), opts).await
    }

    pub async fn get_timeslot(&self, id: &str, opts: &CallOptions) -> Result<Timeslot, ApiError> {
        self.dispatch(&endpoints::GET_TIMESLOT, RequestArgs::new().path(id), opts).await
    }

    pub async fn update_timeslot(
        &self,
        id: &str,
        body: &TimeslotRequest,
        opts: &CallOptions,
    ) -> Result<Timeslot, ApiError> {
        let args = RequestArgs::new().path(id).json(body)?;
        self.dispatch(&endpoints::UPDATE_TIMESLOT, args, opts).await
    }

    // -----------------------------------------------------------------------
    // Timetables
    // -----------------------------------------------------------------------

    pub async fn get_timetables(
        &self,
        pageable: &Pageable,
        filter: &NameFilter,
        opts: &CallOptions,
    ) -> Result<Page<Timetable>, ApiError> {
        let args = RequestArgs::new().query(pageable).query(filter);
        self.dispatch(&endpoints::GET_TIMETABLES, args, opts).await
    }

    pub async fn create_timetable(
        &self,
        body: &TimetableRequest,
        opts: &CallOptions,
    ) -> Result<SuccessResponse, ApiError> {
        let args = RequestArgs::new().json(body)?;
        self.dispatch(&endpoints::CREATE_TIMETABLE, args, opts).await
    }

    pub async fn delete_timetable(&self, id: &str, opts: &CallOptions) -> Result<String, ApiError> {
        self.dispatch(&endpoints::DELETE_TIMETABLE, RequestArgs::new().path(id), opts).await
    }

    pub async fn get_timetable(&self, id: &str, opts: &CallOptions) -> Result<Timetable, ApiError> {
        self.dispatch(&endpoints::GET_TIMETABLE, RequestArgs::new().path(id), opts).await
    }
}

/// Non-2xx responses become `ApiError::Status` with the raw body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
