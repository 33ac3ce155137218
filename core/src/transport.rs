//! Executes `HttpRequest`s.
//!
//! # Design
//! The client never touches the network itself; it hands each request to a
//! `Transport`. `UreqTransport` is the blocking default. Non-2xx statuses
//! are returned as data so the client can map them to `ApiError::HttpError`
//! with the vendor's error body intact. Response bodies are read without a
//! size cap, since signed documents can be large.

use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

use crate::error::ApiError;
use crate::http::{Body, HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a shared `ureq::Agent`.
///
/// TLS is rustls, which never negotiates below TLS 1.2.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.as_str();
        let mut response = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), &request.headers).call()?,
            HttpMethod::Delete => with_headers(self.agent.delete(url), &request.headers).call()?,
            HttpMethod::Post => send(with_headers(self.agent.post(url), &request.headers), &request.body)?,
            HttpMethod::Patch => send(with_headers(self.agent.patch(url), &request.headers), &request.body)?,
            HttpMethod::Put => send(with_headers(self.agent.put(url), &request.headers), &request.body)?,
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: &Body,
) -> Result<ureq::http::Response<ureq::Body>, ApiError> {
    let response = match body {
        Body::Empty => builder.send_empty()?,
        Body::Form(text) => builder.send(text.as_bytes())?,
        Body::Raw(bytes) => builder.send(&bytes[..])?,
        // ureq adds the multipart content type with the form's boundary.
        Body::Multipart(multipart) => builder.send(multipart.to_form()?)?,
    };
    Ok(response)
}
