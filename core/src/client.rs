//! Request dispatcher for the Signaturit API.
//!
//! # Design
//! `SignaturitClient` holds an immutable `ClientConfig` and a `Transport`,
//! and carries no mutable state between calls. Dispatch is split in three:
//! `build_request` turns (method, path, params) into an `HttpRequest`, the
//! transport executes it, and `parse_response` turns the `HttpResponse` into
//! a `Payload`. The first and last steps are pure, so tests can assert on
//! exact requests and feed canned responses without a network.
//!
//! Endpoint methods live in `crate::endpoints`, one file per resource
//! family, and all funnel through `dispatch`.

use tracing::{debug, warn};

use crate::config::{ClientConfig, USER_AGENT};
use crate::error::ApiError;
use crate::http::{Body, HttpMethod, HttpRequest, HttpResponse};
use crate::params::Params;
use crate::transport::{Transport, UreqTransport};

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: u32 = 100;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    /// Exact response bytes, for download endpoints.
    Raw(Vec<u8>),
}

impl Payload {
    pub fn into_json(self) -> Result<serde_json::Value, ApiError> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Raw(_) => Err(ApiError::DeserializationError(
                "expected a JSON payload, got raw bytes".to_string(),
            )),
        }
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, ApiError> {
        match self {
            Payload::Raw(bytes) => Ok(bytes),
            Payload::Json(value) => {
                serde_json::to_vec(&value).map_err(|e| ApiError::DeserializationError(e.to_string()))
            }
        }
    }
}

/// Synchronous client for the Signaturit v3 API.
#[derive(Debug, Clone)]
pub struct SignaturitClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl SignaturitClient<UreqTransport> {
    /// Client for the production (`true`) or sandbox (`false`) environment.
    pub fn new(token: impl Into<String>, production: bool) -> Self {
        Self::from_config(ClientConfig::new(token, production))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }
}

impl<T: Transport> SignaturitClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `path` (relative to the base URL).
    ///
    /// GET/DELETE put `params` in the query string, appending `?` only when
    /// there is something to append. Other methods send `params` as a
    /// multipart body if any value is a file, as a form body otherwise, and
    /// send nothing when `params` is empty. Multipart requests get their
    /// content type from the transport, once a boundary is chosen.
    pub fn build_request(&self, method: HttpMethod, path: &str, params: &Params) -> HttpRequest {
        let mut url = format!("{}{path}", self.config.base_url());
        let body = if method.uses_query() {
            let query = params.to_urlencoded();
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
            Body::Empty
        } else if params.is_empty() {
            Body::Empty
        } else if params.has_files() {
            Body::Multipart(params.to_multipart())
        } else {
            Body::Form(params.to_urlencoded())
        };
        self.request_with_body(method, url, body)
    }

    /// Build a request whose body is `content` verbatim.
    pub fn build_raw_request(&self, method: HttpMethod, path: &str, content: Vec<u8>) -> HttpRequest {
        let url = format!("{}{path}", self.config.base_url());
        self.request_with_body(method, url, Body::Raw(content))
    }

    fn request_with_body(&self, method: HttpMethod, url: String, body: Body) -> HttpRequest {
        let mut headers = vec![
            ("authorization".to_string(), self.config.authorization()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
        ];
        if let Some(content_type) = body.content_type() {
            headers.push(("content-type".to_string(), content_type));
        }
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    /// Map a response to a `Payload`: non-2xx is `HttpError`, then either
    /// JSON-decode the body or hand back its bytes.
    pub fn parse_response(&self, response: HttpResponse, parse_json: bool) -> Result<Payload, ApiError> {
        if !response.is_success() {
            return Err(ApiError::HttpError {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        if !parse_json {
            return Ok(Payload::Raw(response.body));
        }
        serde_json::from_slice(&response.body)
            .map(Payload::Json)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Build, execute and parse one request.
    pub fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
        parse_json: bool,
    ) -> Result<Payload, ApiError> {
        let request = self.build_request(method, path, params);
        self.execute(request, parse_json)
    }

    /// Like `dispatch`, with `content` as the raw request body.
    pub fn dispatch_raw_body(
        &self,
        method: HttpMethod,
        path: &str,
        content: Vec<u8>,
        parse_json: bool,
    ) -> Result<Payload, ApiError> {
        let request = self.build_raw_request(method, path, content);
        self.execute(request, parse_json)
    }

    fn execute(&self, request: HttpRequest, parse_json: bool) -> Result<Payload, ApiError> {
        debug!(method = %request.method, url = %request.url, body = request.body.kind(), "dispatching request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        if !response.is_success() {
            warn!(method = %request.method, url = %request.url, status = response.status, "request rejected");
        }
        self.parse_response(response, parse_json)
    }

    pub(crate) fn request_json(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<serde_json::Value, ApiError> {
        self.dispatch(method, path, params, true)?.into_json()
    }

    pub(crate) fn download(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        self.dispatch(HttpMethod::Get, path, &Params::new(), false)?
            .into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FileRef;
    use crate::transport::testing::RecordingTransport;

    const BASE: &str = "http://localhost:3000";

    fn client() -> SignaturitClient<RecordingTransport> {
        client_answering(RecordingTransport::json("{}"))
    }

    fn client_answering(transport: RecordingTransport) -> SignaturitClient<RecordingTransport> {
        SignaturitClient::with_transport(
            ClientConfig::new("a_token", false).with_base_url(BASE),
            transport,
        )
    }

    #[test]
    fn get_without_params_has_no_question_mark() {
        let req = client().build_request(HttpMethod::Get, "/v3/account.json", &Params::new());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/v3/account.json");
        assert_eq!(req.body, Body::Empty);
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn get_params_become_query_string() {
        let params = Params::new().with("limit", 5).with("offset", 10);
        let req = client().build_request(HttpMethod::Get, "/v3/signatures.json", &params);
        assert_eq!(req.url, "http://localhost:3000/v3/signatures.json?limit=5&offset=10");
        assert_eq!(req.body, Body::Empty);
    }

    #[test]
    fn delete_params_become_query_string() {
        let params = Params::new().with("force", true);
        let req = client().build_request(HttpMethod::Delete, "/v3/contacts/c1.json", &params);
        assert_eq!(req.url, "http://localhost:3000/v3/contacts/c1.json?force=true");
        assert_eq!(req.body, Body::Empty);
    }

    #[test]
    fn post_without_files_is_a_form() {
        let params = Params::new().with("email", "bob@example.com").with("name", "Bob");
        let req = client().build_request(HttpMethod::Post, "/v3/contacts.json", &params);
        assert_eq!(req.url, "http://localhost:3000/v3/contacts.json");
        assert_eq!(req.body, Body::Form("email=bob%40example.com&name=Bob".to_string()));
        assert_eq!(req.header("content-type"), Some("application/x-www-form-urlencoded"));
    }

    #[test]
    fn post_with_files_is_multipart() {
        let params = Params::new().with(
            "files",
            vec![crate::params::Value::File(FileRef::from_bytes("a.pdf", b"%PDF".to_vec()))],
        );
        let req = client().build_request(HttpMethod::Post, "/v3/signatures.json", &params);
        let Body::Multipart(form) = &req.body else {
            panic!("expected multipart, got {:?}", req.body);
        };
        assert_eq!(form.files().count(), 1);
        // Set by the transport together with the boundary.
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn empty_post_has_no_body() {
        let req = client().build_request(HttpMethod::Patch, "/v3/signatures/s1/cancel.json", &Params::new());
        assert_eq!(req.body, Body::Empty);
    }

    #[test]
    fn every_request_is_authenticated() {
        let c = client();
        let requests = [
            c.build_request(HttpMethod::Get, "/v3/account.json", &Params::new()),
            c.build_request(HttpMethod::Post, "/v3/team/groups.json", &Params::new().with("name", "g")),
            c.build_raw_request(HttpMethod::Put, "/v3/brandings/b/logo.json", vec![1, 2, 3]),
        ];
        for req in &requests {
            assert_eq!(req.header("authorization"), Some("Bearer a_token"));
            assert_eq!(req.header("user-agent"), Some(USER_AGENT));
        }
    }

    #[test]
    fn raw_request_keeps_bytes() {
        let req = client().build_raw_request(HttpMethod::Put, "/v3/brandings/b/logo.json", vec![0, 159, 146]);
        assert_eq!(req.body, Body::Raw(vec![0, 159, 146]));
        assert_eq!(req.header("content-type"), Some("application/octet-stream"));
    }

    #[test]
    fn parse_json_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: br#"{"id":"abc","status":"ready"}"#.to_vec(),
        };
        let payload = client().parse_response(response, true).unwrap();
        assert_eq!(payload, Payload::Json(serde_json::json!({"id": "abc", "status": "ready"})));
    }

    #[test]
    fn parse_raw_returns_exact_bytes() {
        let bytes = vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xff];
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: bytes.clone(),
        };
        let payload = client().parse_response(response, false).unwrap();
        assert_eq!(payload.into_bytes().unwrap(), bytes);
    }

    #[test]
    fn parse_bad_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: b"not json".to_vec(),
        };
        let err = client().parse_response(response, true).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_empty_body_as_json_fails() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: Vec::new(),
        };
        let err = client().parse_response(response, true).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_error_status_keeps_body() {
        let response = HttpResponse {
            status: 422,
            headers: Vec::new(),
            body: br#"{"message":"invalid recipients"}"#.to_vec(),
        };
        let err = client().parse_response(response, true).unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 422);
                assert!(body.contains("invalid recipients"));
            }
            other => panic!("expected HttpError, got {other:?}"),
        }
    }

    #[test]
    fn error_status_wins_over_raw_mode() {
        let c = client_answering(RecordingTransport::with_response(500, b"boom"));
        let err = c
            .dispatch(
                HttpMethod::Get,
                "/v3/sms/s/certificates/c/download/audit_trail",
                &Params::new(),
                false,
            )
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn dispatch_sends_exactly_one_request() {
        let c = client();
        let payload = c
            .dispatch(HttpMethod::Get, "/v3/templates.json", &Params::new(), true)
            .unwrap();
        assert_eq!(payload, Payload::Json(serde_json::json!({})));
        assert_eq!(c.transport().count(), 1);
        assert_eq!(c.transport().last().url, "http://localhost:3000/v3/templates.json");
    }

    #[test]
    fn raw_payload_is_not_json() {
        assert!(Payload::Raw(vec![1]).into_json().is_err());
    }

    #[test]
    fn production_client_targets_vendor_host() {
        let c = SignaturitClient::with_transport(ClientConfig::new("a_token", true), RecordingTransport::json("{}"));
        let req = c.build_request(HttpMethod::Get, "/v3/account.json", &Params::new());
        assert_eq!(req.url, "https://api.signaturit.com/v3/account.json");
    }
}
