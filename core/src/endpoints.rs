//! The endpoint table: one entry per API operation.

use crate::endpoint::{BodyKind, Endpoint, Json, Text};
use crate::http::HttpMethod::{Delete, Get, Post, Put};
use crate::paging::Page;
use crate::types::{
    ConstraintInstance, ConstraintInstancesResponse, ConstraintSignature, CurriculumResponse,
    GradeResponse, LessonResponse, Room, ServerEmailResponse, ServerStatistics, Student,
    StudentGroupResponse, Subject, SuccessResponse, Tag, Teacher, Timeslot, Timetable,
    TimetableMetadata,
};

use BodyKind::{Empty, Json as JsonBody, Multipart};

// constraints
pub const GET_CONSTRAINT_SIGNATURES: Endpoint<Json<Page<ConstraintSignature>>> =
    Endpoint::new("get_constraint_signatures", Get, "/constraints", Empty);
pub const GET_CONSTRAINT_SIGNATURE: Endpoint<Json<ConstraintSignature>> =
    Endpoint::new("get_constraint_signature", Get, "/constraints/{signatureId}", Empty);
pub const DELETE_CONSTRAINT_INSTANCE: Endpoint<Text> =
    Endpoint::new("delete_constraint_instance", Delete, "/constraints/{signatureId}/instances", JsonBody);
pub const GET_CONSTRAINT_INSTANCES: Endpoint<Json<ConstraintInstancesResponse>> =
    Endpoint::new("get_constraint_instances", Get, "/constraints/{signatureId}/instances", Empty);
pub const CREATE_CONSTRAINT_INSTANCE: Endpoint<Json<ConstraintInstance>> =
    Endpoint::new("create_constraint_instance", Post, "/constraints/{signatureId}/instances", JsonBody);
pub const GET_CONSTRAINT_INSTANCE_BY_ID: Endpoint<Json<ConstraintInstancesResponse>> =
    Endpoint::new("get_constraint_instance_by_id", Get, "/constraints/{signatureId}/instances/{id}", Empty);
pub const UPDATE_CONSTRAINT_INSTANCE_BY_ID: Endpoint<Json<ConstraintInstance>> =
    Endpoint::new("update_constraint_instance_by_id", Put, "/constraints/{signatureId}/instances/{id}", JsonBody);

// curriculum
pub const GET_CURRICULUMS: Endpoint<Json<Page<CurriculumResponse>>> =
    Endpoint::new("get_curriculums", Get, "/curriculum", Empty);
pub const CREATE_CURRICULUM: Endpoint<Json<CurriculumResponse>> =
    Endpoint::new("create_curriculum", Post, "/curriculum", JsonBody);
pub const DELETE_CURRICULUM: Endpoint<Text> =
    Endpoint::new("delete_curriculum", Delete, "/curriculum/{id}", Empty);
pub const GET_CURRICULUM: Endpoint<Json<CurriculumResponse>> =
    Endpoint::new("get_curriculum", Get, "/curriculum/{id}", Empty);
pub const UPDATE_CURRICULUM: Endpoint<Json<CurriculumResponse>> =
    Endpoint::new("update_curriculum", Put, "/curriculum/{id}", JsonBody);

// editor
pub const GET_UCDL_FILE: Endpoint<Text> = Endpoint::new("get_ucdl_file", Get, "/editor", Empty);
pub const SET_UCDL_FILE: Endpoint<Json<SuccessResponse>> =
    Endpoint::new("set_ucdl_file", Put, "/editor", Multipart);
pub const GET_DEFAULT_UCDL_FILE: Endpoint<Text> =
    Endpoint::new("get_default_ucdl_file", Get, "/editor/default", Empty);
pub const VALIDATE_UCDL_FILE: Endpoint<Json<SuccessResponse>> =
    Endpoint::new("validate_ucdl_file", Put, "/editor/validate", Multipart);

// grades
pub const DELETE_GRADES: Endpoint<Json<SuccessResponse>> =
    Endpoint::new("delete_grades", Delete, "/grades", JsonBody);
pub const GET_GRADES: Endpoint<Json<Vec<GradeResponse>>> = Endpoint::new("get_grades", Get, "/grades", Empty);
pub const CREATE_GRADE: Endpoint<Json<GradeResponse>> = Endpoint::new("create_grade", Post, "/grades", JsonBody);
pub const GET_GRADE: Endpoint<Json<GradeResponse>> = Endpoint::new("get_grade", Get, "/grades/{id}", Empty);
pub const UPDATE_GRADE: Endpoint<Json<GradeResponse>> =
    Endpoint::new("update_grade", Put, "/grades/{id}", JsonBody);
pub const GET_GRADE_LESSONS: Endpoint<Json<LessonResponse>> =
    Endpoint::new("get_grade_lessons", Get, "/grades/{id}/lessons", Empty);

// rooms
pub const DELETE_ROOMS: Endpoint<Text> = Endpoint::new("delete_rooms", Delete, "/rooms", JsonBody);
pub const GET_ROOMS: Endpoint<Json<Page<Room>>> = Endpoint::new("get_rooms", Get, "/rooms", Empty);
pub const CREATE_ROOM: Endpoint<Json<Room>> = Endpoint::new("create_room", Post, "/rooms", JsonBody);
pub const GET_ROOM: Endpoint<Json<Room>> = Endpoint::new("get_room", Get, "/rooms/{id}", Empty);
pub const UPDATE_ROOM: Endpoint<Json<Room>> = Endpoint::new("update_room", Put, "/rooms/{id}", JsonBody);
pub const GET_ROOM_LESSONS: Endpoint<Json<LessonResponse>> =
    Endpoint::new("get_room_lessons", Get, "/rooms/{id}/lessons", Empty);

// server
pub const GET_NOTIFICATION_EMAIL: Endpoint<Json<ServerEmailResponse>> =
    Endpoint::new("get_notification_email", Get, "/server/email", Empty);
pub const SET_NOTIFICATION_EMAIL: Endpoint<Text> =
    Endpoint::new("set_notification_email", Put, "/server/email", JsonBody);
pub const GET_SERVER_STATS: Endpoint<Json<ServerStatistics>> =
    Endpoint::new("get_server_stats", Get, "/server/statistics", Empty);
pub const GET_TIMETABLE_METADATA: Endpoint<Json<TimetableMetadata>> =
    Endpoint::new("get_timetable_metadata", Get, "/server/timetable-metadata", Empty);
pub const SET_TIMETABLE_METADATA: Endpoint<Text> =
    Endpoint::new("set_timetable_metadata", Put, "/server/timetable-metadata", JsonBody);

// student groups
pub const GET_STUDENT_GROUPS: Endpoint<Json<Page<StudentGroupResponse>>> =
    Endpoint::new("get_student_groups", Get, "/student-groups", Empty);
pub const CREATE_STUDENT_GROUP: Endpoint<Json<StudentGroupResponse>> =
    Endpoint::new("create_student_group", Post, "/student-groups", JsonBody);
pub const DELETE_STUDENT_GROUP: Endpoint<Text> =
    Endpoint::new("delete_student_group", Delete, "/student-groups/{id}", Empty);
pub const GET_STUDENT_GROUP: Endpoint<Json<StudentGroupResponse>> =
    Endpoint::new("get_student_group", Get, "/student-groups/{id}", Empty);
pub const UPDATE_STUDENT_GROUP: Endpoint<Json<StudentGroupResponse>> =
    Endpoint::new("update_student_group", Put, "/student-groups/{id}", JsonBody);
pub const GET_STUDENT_GROUP_LESSONS: Endpoint<Json<LessonResponse>> =
    Endpoint::new("get_student_group_lessons", Get, "/student-groups/{id}/lessons", Empty);
/// Acknowledged with plain text, unlike the matching add operation.
pub const REMOVE_STUDENTS_FROM_STUDENT_GROUP: Endpoint<Text> = Endpoint::new(
    "remove_students_from_student_group",
    Delete,
    "/student-groups/{id}/students",
    JsonBody,
);
/// Answers with the updated group.
pub const ADD_STUDENTS_TO_STUDENT_GROUP: Endpoint<Json<StudentGroupResponse>> = Endpoint::new(
    "add_students_to_student_group",
    Post,
    "/student-groups/{id}/students",
    JsonBody,
);

// students
pub const DELETE_STUDENTS: Endpoint<Text> = Endpoint::new("delete_students", Delete, "/students", JsonBody);
pub const GET_STUDENTS: Endpoint<Json<Page<Student>>> = Endpoint::new("get_students", Get, "/students", Empty);
pub const CREATE_STUDENT: Endpoint<Json<Student>> =
    Endpoint::new("create_student", Post, "/students", JsonBody);
pub const GET_STUDENT: Endpoint<Json<Student>> = Endpoint::new("get_student", Get, "/students/{id}", Empty);
pub const UPDATE_STUDENT: Endpoint<Json<Student>> =
    Endpoint::new("update_student", Put, "/students/{id}", JsonBody);
pub const GET_STUDENT_LESSONS: Endpoint<Json<LessonResponse>> =
    Endpoint::new("get_student_lessons", Get, "/students/{id}/lessons", Empty);

// subjects
pub const DELETE_SUBJECTS: Endpoint<Text> = Endpoint::new("delete_subjects", Delete, "/subjects", JsonBody);
pub const GET_SUBJECTS: Endpoint<Json<Vec<Subject>>> = Endpoint::new("get_subjects", Get, "/subjects", Empty);
pub const CREATE_SUBJECT: Endpoint<Json<Subject>> =
    Endpoint::new("create_subject", Post, "/subjects", JsonBody);
pub const GET_SUBJECT: Endpoint<Json<Subject>> = Endpoint::new("get_subject", Get, "/subjects/{id}", Empty);
pub const UPDATE_SUBJECT: Endpoint<Json<Subject>> =
    Endpoint::new("update_subject", Put, "/subjects/{id}", JsonBody);

// tags
pub const DELETE_TAGS: Endpoint<Text> = Endpoint::new("delete_tags", Delete, "/tags", JsonBody);
pub const GET_TAGS: Endpoint<Json<Vec<Tag>>> = Endpoint::new("get_tags", Get, "/tags", Empty);
pub const CREATE_TAG: Endpoint<Json<Tag>> = Endpoint::new("create_tag", Post, "/tags", JsonBody);
pub const GET_TAG: Endpoint<Json<Tag>> = Endpoint::new("get_tag", Get, "/tags/{id}", Empty);
pub const UPDATE_TAG: Endpoint<Json<Tag>> = Endpoint::new("update_tag", Put, "/tags/{id}", JsonBody);

// teachers
pub const DELETE_TEACHERS: Endpoint<Text> = Endpoint::new("delete_teachers", Delete, "/teachers", JsonBody);
pub const GET_TEACHERS: Endpoint<Json<Page<Teacher>>> = Endpoint::new("get_teachers", Get, "/teachers", Empty);
pub const CREATE_TEACHER: Endpoint<Json<Teacher>> =
    Endpoint::new("create_teacher", Post, "/teachers", JsonBody);
pub const GET_TEACHER: Endpoint<Json<Teacher>> = Endpoint::new("get_teacher", Get, "/teachers/{id}", Empty);
pub const UPDATE_TEACHER: Endpoint<Json<Teacher>> =
    Endpoint::new("update_teacher", Put, "/teachers/{id}", JsonBody);
pub const GET_TEACHER_LESSONS: Endpoint<Json<LessonResponse>> =
    Endpoint::new("get_teacher_lessons", Get, "/teachers/{id}/lessons", Empty);

// timeslots
pub const GET_TIMESLOTS: Endpoint<Json<Vec<Timeslot>>> = Endpoint::new("get_timeslots", Get, "/timeslots", Empty);
pub const CREATE_TIMESLOT: Endpoint<Json<Timeslot>> =
    Endpoint::new("create_timeslot", Post, "/timeslots", JsonBody);
pub const DELETE_TIMESLOT: Endpoint<Text> =
    Endpoint::new("delete_timeslot", Delete, "/timeslots/{id}", Empty);
pub const GET_TIMESLOT: Endpoint<Json<Timeslot>> = Endpoint::new("get_timeslot", Get, "/timeslots/{id}", Empty);
pub const UPDATE_TIMESLOT: Endpoint<Json<Timeslot>> =
    Endpoint::new("update_timeslot", Put, "/timeslots/{id}", JsonBody);

// timetables
pub const GET_TIMETABLES: Endpoint<Json<Page<Timetable>>> =
    Endpoint::new("get_timetables", Get, "/timetables", Empty);
pub const CREATE_TIMETABLE: Endpoint<Json<SuccessResponse>> =
    Endpoint::new("create_timetable", Post, "/timetables", JsonBody);
pub const DELETE_TIMETABLE: Endpoint<Text> =
    Endpoint::new("delete_timetable", Delete, "/timetables/{id}", Empty);
pub const GET_TIMETABLE: Endpoint<Json<Timetable>> =
    Endpoint::new("get_timetable", Get, "/timetables/{id}", Empty);
