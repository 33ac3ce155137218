use crate::client::SignaturitClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::transport::Transport;

impl<T: Transport> SignaturitClient<T> {
    pub fn get_account(&self) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Get, "/v3/account.json", &Params::new())
    }

    /// Keep a copy of every document in your own storage.
    ///
    /// `storage_type` is `sftp` or `s3`; `params` carries the credentials
    /// for that backend (`host`, `port`, `dir`, `user`, `auth_method`, ...
    /// for sftp; `bucket`, `key`, `secret` for s3).
    pub fn set_document_storage(
        &self,
        storage_type: &str,
        mut params: Params,
    ) -> Result<serde_json::Value, ApiError> {
        if storage_type.is_empty() {
            return Err(ApiError::MissingParameter("type"));
        }
        params.insert("type", storage_type);
        self.request_json(HttpMethod::Post, "/v3/account/storage.json", &params)
    }

    pub fn revert_to_default_document_storage(&self) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Delete, "/v3/account/storage.json", &Params::new())
    }
}
