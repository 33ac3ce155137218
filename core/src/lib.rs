//! Synchronous client for the Signaturit v3 e-signature / e-delivery API.
//!
//! # Overview
//! One method per vendor endpoint (signatures, emails, SMS, subscriptions,
//! contacts, team users/groups/seats, brandings, templates, account). Each
//! method shapes its parameters and hands them to a single dispatcher that
//! adds the bearer token, encodes the query string or body, and decodes the
//! JSON (or raw download) response.
//!
//! # Design
//! - `SignaturitClient` is stateless beyond its `ClientConfig`.
//! - Building a request and parsing a response are pure (`build_request`,
//!   `parse_response`); a `Transport` does the I/O in between, blocking
//!   `ureq` by default.
//! - Request parameters are a tagged union (`params::Value`) so one encoder
//!   covers query strings, form bodies and multipart uploads.
//! - Only the v3 API surface is implemented.
//!
//! ```no_run
//! use signaturit_core::{Params, SignaturitClient};
//!
//! let client = SignaturitClient::new("a_token", false);
//! let created = client.create_signature("contract.pdf", "ann@example.com", Params::new())?;
//! let count = client.count_signatures(&Params::new().with("status", "completed"))?;
//! # Ok::<(), signaturit_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
mod endpoints;
pub mod error;
pub mod flatten;
pub mod http;
pub mod params;
pub mod transport;
pub mod types;

pub use client::{Payload, SignaturitClient, DEFAULT_LIMIT};
pub use config::{ClientConfig, Environment};
pub use error::ApiError;
pub use http::{Body, HttpMethod, HttpRequest, HttpResponse, Multipart, Part};
pub use params::{FileRef, Params, Value};
pub use transport::{Transport, UreqTransport};
pub use types::{Files, Recipient, Recipients, UserRole};
