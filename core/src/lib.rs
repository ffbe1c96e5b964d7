//! Typed client core for the school timetabling API.
//!
//! # Overview
//! Every API operation is a row in a declarative endpoint table
//! (`endpoints`). One generic dispatcher turns a row plus typed arguments
//! into an `HttpRequest`, hands it to a `Transport`, and decodes the
//! `HttpResponse` into the row's declared output. `prepare` and `parse` are
//! public, so a host that does its own I/O can drive the client without any
//! network code of ours.
//!
//! # Design
//! - `TimetableClient` is stateless: an immutable `ClientConfig` plus a
//!   transport. Calls are independent and may run concurrently.
//! - Query strings are flattened from typed filter bags (`Explode`); lists
//!   repeat their key and absent values are omitted.
//! - Every call returns `Result<T, ApiError>`; cancellation through a
//!   `CancellationToken` in `CallOptions` yields `ApiError::Cancelled`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod endpoints;
pub mod error;
pub mod filters;
pub mod http;
pub mod paging;
pub mod query;
pub mod transport;
pub mod types;

pub use client::{CallOptions, RequestArgs, TimetableClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use endpoint::{BodyKind, Endpoint, ResponseShape};
pub use error::ApiError;
pub use filters::{
    ArgumentFilter, NameFilter, RoomFilter, SearchFilter, StudentFilter, TaggedSearchFilter, TeacherFilter,
    TimeslotFilter, UploadFlags,
};
pub use http::{FileUpload, HttpMethod, HttpRequest, HttpResponse, MultipartForm};
pub use paging::{Direction, Page, Pageable, Sort};
pub use query::{Explode, QueryParams};
pub use tokio_util::sync::CancellationToken;
pub use transport::{ReqwestTransport, Transport};
pub use types::*;
