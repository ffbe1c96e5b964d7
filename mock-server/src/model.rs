//! Wire types served by the mock. Defined independently of the client core
//! so integration tests catch schema drift.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    pub tag_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub message: String,
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub building_name: String,
    pub capacity: u32,
    pub id: String,
    pub name: String,
    pub tags: Vec<Tag>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub building_name: String,
    pub capacity: u32,
    pub name: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub first_name: String,
    pub id: String,
    pub last_name: String,
    pub tags: Vec<Tag>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

/// Grades and subjects are not modelled here and always serialize empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentGroup {
    pub grades: Vec<Value>,
    pub id: String,
    pub name: String,
    pub students: Vec<Student>,
    pub subjects: Vec<Value>,
    pub tags: Vec<Tag>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGroupRequest {
    pub name: String,
    #[serde(default)]
    pub student_ids: Vec<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct TimetableRequest {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerEmail {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ServerEmailRequest {
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatistics {
    pub constraint_count: u64,
    pub grade_count: u64,
    pub room_count: u64,
    pub student_count: u64,
    pub teacher_count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Break {
    pub after_slot: u32,
    pub length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableMetadata {
    pub breaks: Vec<Break>,
    pub start_time: String,
    pub timeslot_length: u32,
    pub timeslots_amount: u32,
}

impl Default for TimetableMetadata {
    fn default() -> Self {
        Self {
            breaks: Vec::new(),
            start_time: "08:00".to_string(),
            timeslot_length: 45,
            timeslots_amount: 10,
        }
    }
}

/// Lessons touching one resource plus every entity they reference. The mock
/// schedules nothing, so only the requested entity is included.
#[derive(Clone, Debug, Default, Serialize)]
pub struct LessonBundle {
    pub grades: Vec<Value>,
    pub groups: Vec<StudentGroup>,
    pub lessons: Vec<Value>,
    pub rooms: Vec<Room>,
    pub subjects: Vec<Value>,
    pub teachers: Vec<Value>,
    pub timetables: Vec<Timetable>,
}
