//! Optional filter bags accepted by list endpoints.
//!
//! Each bag explodes its fields in declaration order. Unset options and
//! empty id lists are left out of the query.

use serde::{Deserialize, Serialize};

use crate::query::{Explode, QueryParams};

/// Exact-name filter (timetables, curricula, constraint signatures).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFilter {
    #[serde(default)]
    pub name: Option<String>,
}

impl NameFilter {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl Explode for NameFilter {
    fn explode(&self, query: &mut QueryParams) {
        query.push_opt("name", self.name.as_deref());
    }
}

/// Free-text search (subjects, tags).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    pub search: Option<String>,
}

impl SearchFilter {
    pub fn search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
        }
    }
}

impl Explode for SearchFilter {
    fn explode(&self, query: &mut QueryParams) {
        query.push_opt("search", self.search.as_deref());
    }
}

/// Search plus tag ids (grades, student groups).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSearchFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Explode for TaggedSearchFilter {
    fn explode(&self, query: &mut QueryParams) {
        query.push_opt("search", self.search.as_deref());
        query.push_all("tags", &self.tags);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilter {
    #[serde(default)]
    pub search: Option<String>,
    /// Minimum capacity.
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Explode for RoomFilter {
    fn explode(&self, query: &mut QueryParams) {
        query.push_opt("search", self.search.as_deref());
        query.push_opt("capacity", self.capacity);
        query.push_all("tags", &self.tags);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFilter {
    #[serde(default)]
    pub search: Option<String>,
    /// Student group ids.
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Explode for StudentFilter {
    fn explode(&self, query: &mut QueryParams) {
        query.push_opt("search", self.search.as_deref());
        query.push_all("groups", &self.groups);
        query.push_all("tags", &self.tags);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherFilter {
    #[serde(default)]
    pub search: Option<String>,
    /// Subject ids.
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Explode for TeacherFilter {
    fn explode(&self, query: &mut QueryParams) {
        query.push_opt("search", self.search.as_deref());
        query.push_all("subjects", &self.subjects);
        query.push_all("tags", &self.tags);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotFilter {
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Explode for TimeslotFilter {
    fn explode(&self, query: &mut QueryParams) {
        query.push_all("tags", &self.tags);
    }
}

/// Filters constraint instances by the id of one of their arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentFilter {
    #[serde(default)]
    pub argument: Option<String>,
}

impl Explode for ArgumentFilter {
    fn explode(&self, query: &mut QueryParams) {
        query.push_opt("argument", self.argument.as_deref());
    }
}

/// Query flags for schema document uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFlags {
    /// Replace the document even when the server reports a conflict.
    #[serde(default)]
    pub force: Option<bool>,
}

impl UploadFlags {
    pub fn force(force: bool) -> Self {
        Self { force: Some(force) }
    }
}

impl Explode for UploadFlags {
    fn explode(&self, query: &mut QueryParams) {
        query.push_opt("force", self.force);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::Pageable;

    fn encode(parts: &[&dyn Explode]) -> String {
        let mut q = QueryParams::new();
        for part in parts {
            part.explode(&mut q);
        }
        q.to_query_string()
    }

    #[test]
    fn room_listing_scenario() {
        let pageable = Pageable::new(0, 10);
        let filter = RoomFilter {
            search: Some("gym".to_string()),
            capacity: None,
            tags: vec!["t1".to_string()],
        };
        assert_eq!(
            encode(&[&pageable, &filter]),
            "?page=0&size=10&search=gym&tags=t1"
        );
    }

    #[test]
    fn empty_list_filters_leave_no_key() {
        let filter = TeacherFilter {
            search: None,
            subjects: Vec::new(),
            tags: Vec::new(),
        };
        let query = encode(&[&filter]);
        assert!(!query.contains("subjects"));
        assert!(!query.contains("tags"));
        assert_eq!(query, "");
    }

    #[test]
    fn multi_value_filter_repeats_key_in_order() {
        let filter = StudentFilter {
            search: None,
            groups: vec!["g 2".to_string(), "g1".to_string()],
            tags: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            encode(&[&filter]),
            "?groups=g%202&groups=g1&tags=a&tags=b"
        );
    }

    #[test]
    fn room_filter_fields_follow_declaration_order() {
        let filter = RoomFilter {
            search: Some("lab".to_string()),
            capacity: Some(20),
            tags: vec!["x".to_string()],
        };
        assert_eq!(encode(&[&filter]), "?search=lab&capacity=20&tags=x");
    }

    #[test]
    fn force_flag_is_a_query_parameter() {
        assert_eq!(encode(&[&UploadFlags::force(false)]), "?force=false");
        assert_eq!(encode(&[&UploadFlags::default()]), "");
    }

    #[test]
    fn filters_deserialize_from_partial_json() {
        let filter: RoomFilter = serde_json::from_str(r#"{"tags":["a"]}"#).unwrap();
        assert_eq!(filter.tags, ["a"]);
        assert!(filter.search.is_none());
    }
}
