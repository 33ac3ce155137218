use crate::client::SignaturitClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::transport::Transport;

impl<T: Transport> SignaturitClient<T> {
    pub fn get_templates(&self, limit: u32, offset: u32) -> Result<serde_json::Value, ApiError> {
        let params = Params::new().with("limit", limit).with("offset", offset);
        self.request_json(HttpMethod::Get, "/v3/templates.json", &params)
    }
}
