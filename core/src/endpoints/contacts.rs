use crate::client::SignaturitClient;
use crate::endpoints::{page_params, segment};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::transport::Transport;

impl<T: Transport> SignaturitClient<T> {
    pub fn get_contacts(
        &self,
        limit: u32,
        offset: u32,
        conditions: &Params,
    ) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Get, "/v3/contacts.json", &page_params(limit, offset, conditions)?)
    }

    pub fn get_contact(&self, contact_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            &format!("/v3/contacts/{}.json", segment(contact_id)),
            &Params::new(),
        )
    }

    pub fn create_contact(&self, email: &str, name: &str) -> Result<serde_json::Value, ApiError> {
        if email.is_empty() {
            return Err(ApiError::MissingParameter("email"));
        }
        let params = Params::new().with("email", email).with("name", name);
        self.request_json(HttpMethod::Post, "/v3/contacts.json", &params)
    }

    pub fn update_contact(
        &self,
        contact_id: &str,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<serde_json::Value, ApiError> {
        let mut params = Params::new();
        if let Some(email) = email {
            params.insert("email", email);
        }
        if let Some(name) = name {
            params.insert("name", name);
        }
        self.request_json(
            HttpMethod::Patch,
            &format!("/v3/contacts/{}.json", segment(contact_id)),
            &params,
        )
    }

    pub fn delete_contact(&self, contact_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Delete,
            &format!("/v3/contacts/{}.json", segment(contact_id)),
            &Params::new(),
        )
    }
}
