use crate::client::SignaturitClient;
use crate::endpoints::{attach, page_params, segment};
use crate::error::ApiError;
use crate::flatten::extract_query_params;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::transport::Transport;
use crate::types::{Files, Recipient, Recipients};

impl<T: Transport> SignaturitClient<T> {
    pub fn get_sms(
        &self,
        limit: u32,
        offset: u32,
        conditions: &Params,
    ) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Get, "/v3/sms.json", &page_params(limit, offset, conditions)?)
    }

    pub fn count_sms(&self, conditions: &Params) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            "/v3/sms/count.json",
            &extract_query_params(conditions)?,
        )
    }

    pub fn get_single_sms(&self, sms_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            &format!("/v3/sms/{}.json", segment(sms_id)),
            &Params::new(),
        )
    }

    /// Send a certified SMS. Bare string recipients are phone numbers.
    pub fn create_sms(
        &self,
        files: impl Into<Files>,
        recipients: impl Into<Recipients>,
        body: &str,
        mut params: Params,
    ) -> Result<serde_json::Value, ApiError> {
        let recipients = Recipients(
            recipients
                .into()
                .into_iter()
                .map(Recipient::into_sms)
                .collect(),
        );
        attach(&mut params, recipients, files.into())?;
        params.insert("body", body);
        self.request_json(HttpMethod::Post, "/v3/sms.json", &params)
    }

    pub fn download_sms_audit_trail(&self, sms_id: &str, certificate_id: &str) -> Result<Vec<u8>, ApiError> {
        self.download(&format!(
            "/v3/sms/{}/certificates/{}/download/audit_trail",
            segment(sms_id),
            segment(certificate_id)
        ))
    }
}
