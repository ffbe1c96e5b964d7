//! Domain DTOs for the timetabling API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate; integration tests catch any drift between the
//! two. Identifiers are opaque strings. Response types embed related
//! entities in full, request types reference them by id.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    pub tag_name: String,
}

/// Generic acknowledgment; also the shape of most error diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub message: String,
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub id: String,
    pub name: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub name: String,
    pub tag_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub building_name: String,
    pub capacity: u32,
    pub id: String,
    pub name: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub building_name: String,
    pub capacity: u32,
    pub name: String,
    pub tag_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub first_name: String,
    pub id: String,
    pub last_name: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub tag_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub acronym: String,
    pub first_name: String,
    pub id: String,
    pub last_name: String,
    pub subjects: Vec<Subject>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRequest {
    pub acronym: String,
    pub first_name: String,
    pub last_name: String,
    pub subject_ids: Vec<String>,
    pub tag_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    pub curriculum_id: String,
    pub id: String,
    pub name: String,
    pub student_group_ids: Vec<String>,
    pub student_ids: Vec<String>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    pub name: String,
    pub student_group_ids: Vec<String>,
    pub tag_ids: Vec<String>,
}

/// A student group with its grades, students, subjects and tags embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentGroupResponse {
    pub grades: Vec<GradeResponse>,
    pub id: String,
    pub name: String,
    pub students: Vec<Student>,
    pub subjects: Vec<Subject>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGroupRequest {
    pub grade_ids: Vec<String>,
    pub name: String,
    pub student_ids: Vec<String>,
    pub subject_ids: Vec<String>,
    pub tag_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeslot {
    pub day: Day,
    pub id: String,
    pub slot: u32,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeslotRequest {
    pub day: Day,
    pub slot: u32,
    pub tag_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRequest {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Lessons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkLesson {
    pub grade_ids: Vec<String>,
    pub group_id: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    pub room_id: String,
    pub subject_id: String,
    pub teacher_id: String,
    pub timeslot: Timeslot,
    pub timetable_id: String,
}

/// Lessons matching a resource, bundled with every entity they reference so
/// all foreign ids resolve without further requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonResponse {
    pub grades: Vec<GradeResponse>,
    pub groups: Vec<StudentGroupResponse>,
    pub lessons: Vec<BulkLesson>,
    pub rooms: Vec<Room>,
    pub subjects: Vec<Subject>,
    pub teachers: Vec<Teacher>,
    pub timetables: Vec<Timetable>,
}

/// A lesson with its references looked up in the enclosing bundle. A field
/// is `None` when the server did not include the referenced entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLesson<'a> {
    pub lesson: &'a BulkLesson,
    pub group: Option<&'a StudentGroupResponse>,
    pub room: Option<&'a Room>,
    pub subject: Option<&'a Subject>,
    pub teacher: Option<&'a Teacher>,
    pub timetable: Option<&'a Timetable>,
}

impl LessonResponse {
    pub fn resolve<'a>(&'a self, lesson: &'a BulkLesson) -> ResolvedLesson<'a> {
        ResolvedLesson {
            lesson,
            group: self.groups.iter().find(|g| g.id == lesson.group_id),
            room: self.rooms.iter().find(|r| r.id == lesson.room_id),
            subject: self.subjects.iter().find(|s| s.id == lesson.subject_id),
            teacher: self.teachers.iter().find(|t| t.id == lesson.teacher_id),
            timetable: self.timetables.iter().find(|t| t.id == lesson.timetable_id),
        }
    }

    pub fn resolved(&self) -> impl Iterator<Item = ResolvedLesson<'_>> {
        self.lessons.iter().map(|lesson| self.resolve(lesson))
    }

    /// Grades of `lesson` that are present in the bundle.
    pub fn grades_of<'a>(&'a self, lesson: &'a BulkLesson) -> impl Iterator<Item = &'a GradeResponse> {
        self.grades
            .iter()
            .filter(move |g| lesson.grade_ids.contains(&g.id))
    }
}

// ---------------------------------------------------------------------------
// Curriculum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonsCount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Subject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonsCountRequest {
    pub count: u32,
    pub subject_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumResponse {
    pub grade: GradeResponse,
    pub id: String,
    pub lessons_counts: Vec<LessonsCount>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumRequest {
    pub grade_id: String,
    pub lessons_counts: Vec<LessonsCountRequest>,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Server settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEmailResponse {
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEmailRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatistics {
    pub constraint_count: u64,
    pub grade_count: u64,
    pub room_count: u64,
    pub student_count: u64,
    pub teacher_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    pub after_slot: u32,
    pub length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableMetadata {
    pub breaks: Vec<Break>,
    /// Wall-clock start of the first timeslot, `HH:MM`.
    pub start_time: String,
    /// Minutes.
    pub timeslot_length: u32,
    pub timeslots_amount: u32,
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// Weighting of a constraint instance: soft or hard, reward or penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardPenalize {
    SoftReward,
    HardReward,
    SoftPenalize,
    HardPenalize,
}

impl RewardPenalize {
    pub fn is_hard(self) -> bool {
        matches!(self, RewardPenalize::HardReward | RewardPenalize::HardPenalize)
    }

    pub fn is_reward(self) -> bool {
        matches!(self, RewardPenalize::SoftReward | RewardPenalize::HardReward)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterType {
    Grade,
    Lesson,
    Room,
    Student,
    StudentGroup,
    Subject,
    Tag,
    Teacher,
    Timeslot,
    Number,
    Timetable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintParameter {
    pub id: String,
    pub parameter_name: String,
    pub parameter_type: ParameterType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSignature {
    pub default_type: RewardPenalize,
    pub description: String,
    pub name: String,
    pub parameters: Vec<ConstraintParameter>,
}

impl ConstraintSignature {
    pub fn parameter(&self, name: &str) -> Option<&ConstraintParameter> {
        self.parameters.iter().find(|p| p.parameter_name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlimArgument {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlimInstance {
    pub arguments: Vec<SlimArgument>,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RewardPenalize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintArgumentDisplayName {
    pub display_name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintInstancesResponse {
    pub constraint_instances: Vec<SlimInstance>,
    pub display_names: Vec<ConstraintArgumentDisplayName>,
    pub parameters: Vec<ConstraintParameter>,
    pub total_elements: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintArgumentRequest {
    pub argument_id: String,
    pub parameter_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintInstanceRequest {
    pub arguments: Vec<ConstraintArgumentRequest>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RewardPenalize>,
}

impl ConstraintInstanceRequest {
    /// Names of arguments that do not bind to a parameter of `signature`.
    pub fn unbound_arguments<'a>(&'a self, signature: &ConstraintSignature) -> Vec<&'a str> {
        self.arguments
            .iter()
            .filter(|a| signature.parameter(&a.parameter_name).is_none())
            .map(|a| a.parameter_name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintArgument {
    pub constraint_parameter: ConstraintParameter,
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintInstance {
    pub arguments: Vec<ConstraintArgument>,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RewardPenalize,
}
