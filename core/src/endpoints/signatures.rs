use crate::client::SignaturitClient;
use crate::endpoints::{page_params, segment};
use crate::error::ApiError;
use crate::flatten::{extract_query_params, files_param, recipients_param};
use crate::http::HttpMethod;
use crate::params::Params;
use crate::transport::Transport;
use crate::types::{Files, Recipients};

impl<T: Transport> SignaturitClient<T> {
    pub fn get_signature(&self, signature_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            &format!("/v3/signatures/{}.json", segment(signature_id)),
            &Params::new(),
        )
    }

    /// List signature requests. `conditions` may hold `status`, `since`,
    /// `ids` (a list) and `data` (a map of custom-data filters).
    pub fn get_signatures(
        &self,
        limit: u32,
        offset: u32,
        conditions: &Params,
    ) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            "/v3/signatures.json",
            &page_params(limit, offset, conditions)?,
        )
    }

    pub fn count_signatures(&self, conditions: &Params) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            "/v3/signatures/count.json",
            &extract_query_params(conditions)?,
        )
    }

    pub fn download_audit_trail(&self, signature_id: &str, document_id: &str) -> Result<Vec<u8>, ApiError> {
        self.download(&format!(
            "/v3/signatures/{}/documents/{}/download/audit_trail",
            segment(signature_id),
            segment(document_id)
        ))
    }

    pub fn download_signed_document(&self, signature_id: &str, document_id: &str) -> Result<Vec<u8>, ApiError> {
        self.download(&format!(
            "/v3/signatures/{}/documents/{}/download/signed",
            segment(signature_id),
            segment(document_id)
        ))
    }

    pub fn download_original_file(&self, signature_id: &str, document_id: &str) -> Result<Vec<u8>, ApiError> {
        self.download(&format!(
            "/v3/signatures/{}/documents/{}/download/original",
            segment(signature_id),
            segment(document_id)
        ))
    }

    /// Send one or more documents to be signed.
    ///
    /// `params` takes any vendor option (`subject`, `body`, `delivery_type`,
    /// `branding_id`, `callback_url`, `data`, ...). A single `templates`
    /// value is promoted to a list.
    pub fn create_signature(
        &self,
        files: impl Into<Files>,
        recipients: impl Into<Recipients>,
        mut params: Params,
    ) -> Result<serde_json::Value, ApiError> {
        let files = files.into();
        let recipients = recipients.into();
        if recipients.is_empty() {
            return Err(ApiError::MissingParameter("recipients"));
        }
        if files.is_empty() && !params.contains_key("templates") {
            return Err(ApiError::MissingParameter("files"));
        }

        params.insert("recipients", recipients_param(recipients));
        if !files.is_empty() {
            params.insert("files", files_param(files)?);
        }
        if let Some(templates) = params.get("templates").cloned() {
            params.insert("templates", templates.into_list());
        }

        self.request_json(HttpMethod::Post, "/v3/signatures.json", &params)
    }

    pub fn cancel_signature(&self, signature_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Patch,
            &format!("/v3/signatures/{}/cancel.json", segment(signature_id)),
            &Params::new(),
        )
    }

    pub fn send_signature_reminder(&self, signature_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Post,
            &format!("/v3/signatures/{}/reminder.json", segment(signature_id)),
            &Params::new(),
        )
    }
}
