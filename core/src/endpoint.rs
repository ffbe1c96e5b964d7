//! Declarative endpoint descriptions.
//!
//! # Design
//! An `Endpoint` is pure data: operation name, method, path template and the
//! kind of body it accepts. The response shape is carried in the type
//! parameter, so one generic dispatcher can decode every endpoint while each
//! typed operation still returns its own concrete type.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::HttpMethod;

/// How a successful response body is turned into a value.
pub trait ResponseShape {
    type Output;

    /// Value for the `accept` header, if the shape asks for one.
    const ACCEPT: Option<&'static str>;

    fn decode(body: &[u8]) -> Result<Self::Output, ApiError>;
}

/// JSON body decoded into `T`.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned> ResponseShape for Json<T> {
    type Output = T;

    const ACCEPT: Option<&'static str> = Some("application/json");

    fn decode(body: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Raw text body. Used for documents and for plain acknowledgments.
pub struct Text;

impl ResponseShape for Text {
    type Output = String;

    const ACCEPT: Option<&'static str> = None;

    fn decode(body: &[u8]) -> Result<String, ApiError> {
        String::from_utf8(body.to_vec()).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Request body accepted by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Empty,
    Json,
    /// Multipart form data; the file is optional.
    Multipart,
}

/// One row of the endpoint table.
pub struct Endpoint<S> {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path relative to the base URL, with `{name}` placeholders.
    pub path: &'static str,
    pub body: BodyKind,
    shape: PhantomData<fn() -> S>,
}

impl<S> Endpoint<S> {
    pub const fn new(name: &'static str, method: HttpMethod, path: &'static str, body: BodyKind) -> Self {
        Self {
            name,
            method,
            path,
            body,
            shape: PhantomData,
        }
    }
}

impl<S> std::fmt::Debug for Endpoint<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("path", &self.path)
            .field("body", &self.body)
            .finish()
    }
}
