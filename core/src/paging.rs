//! Pagination and sorting envelopes shared by every list endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::{Explode, QueryParams};

/// Sort direction of a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("asc"),
            Direction::Desc => f.write_str("desc"),
        }
    }
}

fn sort_key(property: &str, direction: Direction) -> String {
    format!("{property},{direction}")
}

/// Page request: exploded to `page`, `size` and one `sort` key per entry.
///
/// Sort entries use the server's `property,direction` form and apply in the
/// listed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default)]
    pub sort: Vec<String>,
}

impl Pageable {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, property: &str, direction: Direction) -> Self {
        self.sort.push(sort_key(property, direction));
        self
    }

    /// Same size and sort, one page further.
    pub fn next(&self) -> Self {
        Self {
            page: Some(self.page.unwrap_or(0).saturating_add(1)),
            ..self.clone()
        }
    }
}

impl Explode for Pageable {
    fn explode(&self, query: &mut QueryParams) {
        query.push_opt("page", self.page);
        query.push_opt("size", self.size);
        query.push_all("sort", &self.sort);
    }
}

/// Sort-only request used by the unpaginated list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    #[serde(default)]
    pub sort: Vec<String>,
}

impl Sort {
    pub fn by(property: &str, direction: Direction) -> Self {
        Self {
            sort: vec![sort_key(property, direction)],
        }
    }

    pub fn then_by(mut self, property: &str, direction: Direction) -> Self {
        self.sort.push(sort_key(property, direction));
        self
    }
}

impl Explode for Sort {
    fn explode(&self, query: &mut QueryParams) {
        query.push_all("sort", &self.sort);
    }
}

/// Sort descriptor echoed back by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_case: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_handling: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

/// The server's view of the pageable that produced a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageableObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paged: Option<bool>,
    #[serde(default)]
    pub sort: Vec<SortObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpaged: Option<bool>,
}

/// A bounded window over an ordered collection.
///
/// The server declares every field optional, so absent fields decode to
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pageable: Option<PageableObject>,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub sort: Vec<SortObject>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Check the page metadata against itself:
    /// `empty` matches `numberOfElements`, `last` matches the page index,
    /// the window fits `size` and `totalPages` is `ceil(totalElements / size)`.
    pub fn is_consistent(&self) -> bool {
        if self.empty != (self.number_of_elements == 0) {
            return false;
        }
        if self.total_pages > 0 && self.last != (self.number.checked_add(1) == Some(self.total_pages)) {
            return false;
        }
        if self.size > 0 {
            if self.number_of_elements > self.size {
                return false;
            }
            if u64::from(self.total_pages) != self.total_elements.div_ceil(u64::from(self.size)) {
                return false;
            }
        }
        true
    }

    pub fn has_next(&self) -> bool {
        !self.last && self.number.checked_add(1).is_some_and(|next| next < self.total_pages)
    }

    /// Request for the adjacent following window, `None` on the last page.
    pub fn next_pageable(&self, current: &Pageable) -> Option<Pageable> {
        self.has_next().then(|| Pageable {
            page: Some(self.number + 1),
            ..current.clone()
        })
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            empty: self.empty,
            first: self.first,
            last: self.last,
            number: self.number,
            number_of_elements: self.number_of_elements,
            pageable: self.pageable,
            size: self.size,
            sort: self.sort,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, size: u32, total_elements: u64, len: u32) -> Page<u32> {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(u64::from(size)) as u32
        };
        Page {
            content: (0..len).collect(),
            empty: len == 0,
            first: number == 0,
            last: total_pages == 0 || number + 1 == total_pages,
            number,
            number_of_elements: len,
            pageable: None,
            size,
            sort: Vec::new(),
            total_elements,
            total_pages,
        }
    }

    #[test]
    fn pageable_explodes_into_independent_keys() {
        let pageable = Pageable::new(2, 25)
            .sorted_by("name", Direction::Asc)
            .sorted_by("capacity", Direction::Desc);
        let mut q = QueryParams::new();
        q.extend(&pageable);
        assert_eq!(
            q.to_query_string(),
            "?page=2&size=25&sort=name%2Casc&sort=capacity%2Cdesc"
        );
    }

    #[test]
    fn default_pageable_encodes_nothing() {
        let mut q = QueryParams::new();
        q.extend(&Pageable::default());
        assert!(q.is_empty());
    }

    #[test]
    fn sort_keys_apply_in_listed_order() {
        let sort = Sort::by("name", Direction::Desc).then_by("id", Direction::Asc);
        assert_eq!(sort.sort, ["name,desc", "id,asc"]);
    }

    #[test]
    fn decodes_spring_page() {
        let raw = r#"{
            "content": [1, 2],
            "pageable": {"pageNumber": 0, "pageSize": 2, "sort": [], "offset": 0, "paged": true, "unpaged": false},
            "last": false, "totalElements": 5, "totalPages": 3, "first": true,
            "size": 2, "number": 0, "sort": [], "numberOfElements": 2, "empty": false
        }"#;
        let page: Page<u32> = serde_json::from_str(raw).unwrap();
        assert_eq!(page.content, [1, 2]);
        assert_eq!(page.pageable.as_ref().and_then(|p| p.page_size), Some(2));
        assert!(page.is_consistent());
        assert!(page.has_next());
    }

    #[test]
    fn missing_fields_default() {
        let page: Page<String> = serde_json::from_str("{}").unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn consistency_rules() {
        assert!(page(0, 10, 0, 0).is_consistent());
        assert!(page(1, 10, 25, 10).is_consistent());
        assert!(page(2, 10, 25, 5).is_consistent());

        let mut bad = page(0, 10, 25, 10);
        bad.total_pages = 2;
        assert!(!bad.is_consistent());

        let mut bad = page(0, 10, 25, 10);
        bad.empty = true;
        assert!(!bad.is_consistent());

        let mut bad = page(2, 10, 25, 5);
        bad.last = false;
        assert!(!bad.is_consistent());

        let mut bad = page(0, 2, 25, 3);
        bad.total_pages = 13;
        assert!(!bad.is_consistent());
    }

    #[test]
    fn next_pageable_walks_until_last_page() {
        let request = Pageable::new(0, 10).sorted_by("name", Direction::Asc);
        let next = page(0, 10, 25, 10).next_pageable(&request).unwrap();
        assert_eq!(next.page, Some(1));
        assert_eq!(next.sort, request.sort);
        assert!(page(2, 10, 25, 5).next_pageable(&request).is_none());
        assert_eq!(request.next().page, Some(1));
    }

    #[test]
    fn page_number_at_u32_max_does_not_overflow() {
        let raw = r#"{"number":4294967295,"totalPages":5,"totalElements":50,"size":10,"numberOfElements":10}"#;
        let mut page: Page<u32> = serde_json::from_str(raw).unwrap();
        assert!(!page.has_next());
        assert!(page.next_pageable(&Pageable::new(0, 10)).is_none());
        assert!(page.is_consistent());
        page.last = true;
        assert!(!page.is_consistent());

        let request = Pageable::new(u32::MAX, 10);
        assert_eq!(request.next().page, Some(u32::MAX));
    }

    #[test]
    fn map_preserves_metadata() {
        let mapped = page(1, 10, 25, 3).map(|n| n.to_string());
        assert_eq!(mapped.content, ["0", "1", "2"]);
        assert_eq!(mapped.number, 1);
        assert_eq!(mapped.total_elements, 25);
    }
}
