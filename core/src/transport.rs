//! Network execution of prepared requests.
//!
//! # Design
//! `Transport` is the only place the client touches I/O. It turns an
//! `HttpRequest` into an `HttpResponse` and reports a failure only when no
//! response arrived at all; status interpretation stays with the client.
//! Timeouts, pooling and retries belong to the transport or above.

use async_trait::async_trait;
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request).await
    }
}

/// `reqwest`-backed transport.
///
/// Relative request URLs (the default base URL is `/api`) are resolved
/// against `origin`; without one they are rejected.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    origin: Option<Url>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http, origin: None }
    }

    pub fn with_origin(mut self, origin: &str) -> Result<Self, ApiError> {
        let origin = Url::parse(origin).map_err(|e| ApiError::InvalidRequest(format!("origin `{origin}`: {e}")))?;
        self.origin = Some(origin);
        Ok(self)
    }

    fn resolve(&self, url: &str) -> Result<Url, ApiError> {
        match Url::parse(url) {
            Ok(absolute) => Ok(absolute),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = self.origin.as_ref().ok_or_else(|| {
                    ApiError::InvalidRequest(format!("relative url `{url}` and no origin configured"))
                })?;
                origin
                    .join(url)
                    .map_err(|e| ApiError::InvalidRequest(format!("url `{url}`: {e}")))
            }
            Err(e) => Err(ApiError::InvalidRequest(format!("url `{url}`: {e}"))),
        }
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.resolve(&request.url)?;
        let mut builder = self.http.request(to_reqwest(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .to_vec();

        Ok(HttpResponse { status, headers, body })
    }
}
