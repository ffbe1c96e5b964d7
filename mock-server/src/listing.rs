//! Query parsing and pagination for list endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::ApiFailure;

const DEFAULT_PAGE_SIZE: u32 = 20;

/// Everything a list endpoint may be filtered by. Repeated keys collect into
/// the list fields; unknown keys are ignored.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<String>,
    pub search: Option<String>,
    pub name: Option<String>,
    pub capacity: Option<u32>,
    pub tags: Vec<String>,
    pub groups: Vec<String>,
}

impl ListQuery {
    pub fn parse(pairs: Vec<(String, String)>) -> Result<Self, ApiFailure> {
        let mut query = ListQuery {
            size: DEFAULT_PAGE_SIZE,
            ..ListQuery::default()
        };
        for (key, value) in pairs {
            match key.as_str() {
                "page" => query.page = number(&key, &value)?,
                "size" => {
                    query.size = number(&key, &value)?;
                    if query.size == 0 {
                        return Err(ApiFailure::BadRequest("Page size must not be less than one".to_string()));
                    }
                }
                "sort" => query.sort.push(value),
                "search" => query.search = Some(value),
                "name" => query.name = Some(value),
                "capacity" => query.capacity = Some(number(&key, &value)?),
                "tags" => query.tags.push(value),
                "groups" => query.groups.push(value),
                _ => {}
            }
        }
        Ok(query)
    }

    /// Case-insensitive substring match against `search`.
    pub fn matches_search(&self, text: &str) -> bool {
        self.search
            .as_deref()
            .is_none_or(|needle| text.to_lowercase().contains(&needle.to_lowercase()))
    }

    /// Every requested tag must be carried by the item.
    pub fn matches_tags(&self, tag_ids: &[String]) -> bool {
        self.tags.iter().all(|t| tag_ids.contains(t))
    }

    /// Direction requested for `property`: `Some(true)` for descending.
    pub fn descending(&self, property: &str) -> Option<bool> {
        self.sort.iter().find_map(|entry| {
            let mut parts = entry.split(',');
            (parts.next() == Some(property)).then(|| parts.next().is_some_and(|d| d.eq_ignore_ascii_case("desc")))
        })
    }

    /// Order `items` by name when a `name` sort was requested; insertion
    /// order otherwise.
    pub fn sort_by_name<T>(&self, items: &mut [T], name: impl Fn(&T) -> &str) {
        if let Some(descending) = self.descending("name") {
            items.sort_by(|a, b| name(a).cmp(name(b)));
            if descending {
                items.reverse();
            }
        }
    }
}

fn number(key: &str, value: &str) -> Result<u32, ApiFailure> {
    value
        .parse()
        .map_err(|_| ApiFailure::BadRequest(format!("Invalid value `{value}` for `{key}`")))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBody<T> {
    pub content: Vec<T>,
    pub empty: bool,
    pub first: bool,
    pub last: bool,
    pub number: u32,
    pub number_of_elements: u32,
    pub size: u32,
    pub sort: Vec<Value>,
    pub total_elements: u64,
    pub total_pages: u32,
}

/// Cut the window `query` asks for out of `items`.
pub fn paginate<T>(items: Vec<T>, query: &ListQuery) -> PageBody<T> {
    let total = items.len() as u64;
    let size = query.size.max(1);
    let total_pages = total.div_ceil(u64::from(size)) as u32;
    let start = (query.page as usize).saturating_mul(size as usize);
    let content: Vec<T> = items.into_iter().skip(start).take(size as usize).collect();

    PageBody {
        empty: content.is_empty(),
        first: query.page == 0,
        last: total_pages == 0 || query.page.checked_add(1) == Some(total_pages),
        number: query.page,
        number_of_elements: content.len() as u32,
        size,
        sort: Vec::new(),
        total_elements: total,
        total_pages,
        content,
    }
}
