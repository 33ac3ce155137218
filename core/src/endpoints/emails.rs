use crate::client::SignaturitClient;
use crate::endpoints::{attach, page_params, segment};
use crate::error::ApiError;
use crate::flatten::extract_query_params;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::transport::Transport;
use crate::types::{Files, Recipients};

impl<T: Transport> SignaturitClient<T> {
    pub fn get_emails(
        &self,
        limit: u32,
        offset: u32,
        conditions: &Params,
    ) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Get, "/v3/emails.json", &page_params(limit, offset, conditions)?)
    }

    pub fn count_emails(&self, conditions: &Params) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            "/v3/emails/count.json",
            &extract_query_params(conditions)?,
        )
    }

    pub fn get_email(&self, email_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            &format!("/v3/emails/{}.json", segment(email_id)),
            &Params::new(),
        )
    }

    /// Send a certified email. `files` become `attachments`; pass
    /// `Files::none()` for a message without any.
    pub fn create_email(
        &self,
        files: impl Into<Files>,
        recipients: impl Into<Recipients>,
        subject: &str,
        body: &str,
        mut params: Params,
    ) -> Result<serde_json::Value, ApiError> {
        attach(&mut params, recipients.into(), files.into())?;
        params.insert("subject", subject);
        params.insert("body", body);
        self.request_json(HttpMethod::Post, "/v3/emails.json", &params)
    }

    /// Audit trail of one certificate (one recipient's delivery record).
    pub fn download_email_audit_trail(&self, email_id: &str, certificate_id: &str) -> Result<Vec<u8>, ApiError> {
        self.download(&format!(
            "/v3/emails/{}/certificates/{}/download/audit_trail",
            segment(email_id),
            segment(certificate_id)
        ))
    }
}
