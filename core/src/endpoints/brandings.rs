use std::path::Path;

use crate::client::SignaturitClient;
use crate::endpoints::segment;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::{FileRef, Params};
use crate::transport::Transport;

impl<T: Transport> SignaturitClient<T> {
    pub fn get_branding(&self, branding_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            &format!("/v3/brandings/{}.json", segment(branding_id)),
            &Params::new(),
        )
    }

    pub fn get_brandings(&self) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Get, "/v3/brandings.json", &Params::new())
    }

    /// Create a branding. Common keys: `layout_color`, `text_color`,
    /// `logo`, `show_survey_page`, `application_texts` (a nested map of
    /// button and modal texts), `reminders` (a list of seconds).
    pub fn create_branding(&self, params: &Params) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Post, "/v3/brandings.json", params)
    }

    pub fn update_branding(&self, branding_id: &str, params: &Params) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Patch,
            &format!("/v3/brandings/{}.json", segment(branding_id)),
            params,
        )
    }

    /// Replace the logo with the image at `path`, sent as the raw PUT body.
    pub fn update_branding_logo(
        &self,
        branding_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<serde_json::Value, ApiError> {
        let logo = FileRef::open(path)?;
        self.dispatch_raw_body(
            HttpMethod::Put,
            &format!("/v3/brandings/{}/logo.json", segment(branding_id)),
            logo.into_content(),
            true,
        )?
        .into_json()
    }

    /// Replace one email template (e.g. `signatures_request`) with the
    /// HTML file at `path`, sent as the raw PUT body.
    pub fn update_branding_template(
        &self,
        branding_id: &str,
        template: &str,
        path: impl AsRef<Path>,
    ) -> Result<serde_json::Value, ApiError> {
        if template.is_empty() {
            return Err(ApiError::MissingParameter("template"));
        }
        let html = FileRef::open(path)?;
        self.dispatch_raw_body(
            HttpMethod::Put,
            &format!("/v3/brandings/{}/emails/{}.json", segment(branding_id), segment(template)),
            html.into_content(),
            true,
        )?
        .into_json()
    }
}
