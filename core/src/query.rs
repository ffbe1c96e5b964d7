//! Query-string and path-segment encoding.
//!
//! # Design
//! Structured parameters are flattened ("exploded") into an ordered list of
//! key/value pairs. Lists become one pair per element under the same key, in
//! input order; absent options and empty lists contribute nothing at all, so
//! "no filter" and "empty filter" are encoded identically. Keys and values
//! are percent-encoded with the RFC 3986 unreserved set, which keeps spaces
//! as `%20` rather than `+`.

use std::fmt;

use crate::error::ApiError;

/// Types that flatten themselves into query pairs.
pub trait Explode {
    fn explode(&self, query: &mut QueryParams);
}

impl<T: Explode + ?Sized> Explode for &T {
    fn explode(&self, query: &mut QueryParams) {
        (**self).explode(query);
    }
}

impl<T: Explode> Explode for Option<T> {
    fn explode(&self, query: &mut QueryParams) {
        if let Some(inner) = self {
            inner.explode(query);
        }
    }
}

/// An ordered multimap of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl fmt::Display) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    pub fn push_opt<V: fmt::Display>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Repeated-key encoding; an empty iterator adds nothing.
    pub fn push_all<I>(&mut self, key: &str, values: I)
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for value in values {
            self.push(key, value);
        }
    }

    pub fn extend(&mut self, value: &impl Explode) {
        value.explode(self);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// All values recorded under `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `?k=v&...`, or the empty string when there are no pairs.
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        format!("?{self}")
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", urlencoding::encode(key), urlencoding::encode(value))?;
        }
        Ok(())
    }
}

/// Percent-encode a single path segment. Slashes are encoded too, so an id
/// can never introduce an extra segment.
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Substitute `{placeholder}` slots in `template`, in order, with the
/// encoded `segments`. The number of segments must match exactly.
pub fn expand_path(template: &str, segments: &[&str]) -> Result<String, ApiError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut used = 0;

    while let Some(open) = rest.find('{') {
        let close = rest[open..]
            .find('}')
            .map(|i| open + i)
            .ok_or_else(|| ApiError::InvalidRequest(format!("unterminated placeholder in `{template}`")))?;
        let segment = segments.get(used).ok_or_else(|| {
            ApiError::InvalidRequest(format!(
                "`{template}` expects more than {used} path parameter(s)"
            ))
        })?;
        out.push_str(&rest[..open]);
        out.push_str(&encode_path_segment(segment));
        used += 1;
        rest = &rest[close + 1..];
    }
    out.push_str(rest);

    if used != segments.len() {
        return Err(ApiError::InvalidRequest(format!(
            "`{template}` takes {used} path parameter(s), got {}",
            segments.len()
        )));
    }
    Ok(out)
}
