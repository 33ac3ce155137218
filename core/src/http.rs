//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `SignaturitClient` builds an
//! `HttpRequest`, a `Transport` executes it, and the client parses the
//! resulting `HttpResponse`. Keeping the wire shape as data lets tests
//! assert on exactly what would be sent without opening a socket.
//!
//! Response bodies are bytes rather than `String` because the download
//! endpoints return PDFs.
//!
//! Multipart bodies stay a list of parts until they are sent. The wire
//! framing and boundary come from `ureq`'s multipart form.

use std::fmt;
use std::io::Read;

use ureq::unversioned::multipart::{Form, Part as FormPart};

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET and DELETE carry their parameters in the query string.
    pub fn uses_query(self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute (base URL, path and query string). `headers` already
/// include authorization, user agent and, for form and raw bodies, the
/// content type. A multipart content type carries the boundary, so it is
/// only known once the body is encoded.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    /// `application/x-www-form-urlencoded` text.
    Form(String),
    Multipart(Multipart),
    /// Opaque bytes, sent as `application/octet-stream`.
    Raw(Vec<u8>),
}

impl Body {
    /// Content type known before encoding. `None` for empty and multipart
    /// bodies.
    pub fn content_type(&self) -> Option<String> {
        match self {
            Body::Empty | Body::Multipart(_) => None,
            Body::Form(_) => Some("application/x-www-form-urlencoded".to_string()),
            Body::Raw(_) => Some("application/octet-stream".to_string()),
        }
    }

    /// Serialized wire bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ApiError> {
        match self {
            Body::Empty => Ok(Vec::new()),
            Body::Form(text) => Ok(text.as_bytes().to_vec()),
            Body::Multipart(multipart) => multipart.encode().map(|(_, bytes)| bytes),
            Body::Raw(bytes) => Ok(bytes.clone()),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Body::Empty => "empty",
            Body::Form(_) => "form",
            Body::Multipart(_) => "multipart",
            Body::Raw(_) => "raw",
        }
    }
}

/// One field of a `multipart/form-data` body.
#[derive(Clone, PartialEq, Eq)]
pub enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: String,
        content: Vec<u8>,
    },
}

impl Part {
    pub fn name(&self) -> &str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => name,
        }
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Text { name, value } => f
                .debug_struct("Text")
                .field("name", name)
                .field("value", value)
                .finish(),
            Part::File {
                name,
                filename,
                content_type,
                content,
            } => f
                .debug_struct("File")
                .field("name", name)
                .field("filename", filename)
                .field("content_type", content_type)
                .field("len", &content.len())
                .finish(),
        }
    }
}

/// An ordered list of form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multipart {
    parts: Vec<Part>,
}

impl Multipart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Value of the first text part called `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            Part::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &Part> {
        self.parts
            .iter()
            .filter(|part| matches!(part, Part::File { .. }))
    }

    /// A `ureq` form borrowing these parts, with a fresh boundary.
    pub fn to_form(&self) -> Result<Form<'_>, ApiError> {
        let mut form = Form::new();
        for part in &self.parts {
            form = match part {
                Part::Text { name, value } => form.text(name, value),
                Part::File {
                    name,
                    filename,
                    content_type,
                    content,
                } => form.part(
                    name,
                    FormPart::bytes(content)
                        .file_name(filename)
                        .mime_str(content_type)?,
                ),
            };
        }
        Ok(form)
    }

    /// Content type (with boundary) and RFC 7578 body.
    pub fn encode(&self) -> Result<(String, Vec<u8>), ApiError> {
        let mut form = self.to_form()?;
        let content_type = format!("multipart/form-data; boundary={}", form.boundary());
        let mut body = Vec::new();
        form.read_to_end(&mut body).map_err(ureq::Error::from)?;
        Ok((content_type, body))
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
