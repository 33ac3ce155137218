use crate::client::SignaturitClient;
use crate::endpoints::{page_params, segment};
use crate::error::ApiError;
use crate::flatten::extract_query_params;
use crate::http::HttpMethod;
use crate::params::{Params, Value};
use crate::transport::Transport;

impl<T: Transport> SignaturitClient<T> {
    pub fn get_subscriptions(
        &self,
        limit: u32,
        offset: u32,
        conditions: &Params,
    ) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            "/v3/subscriptions.json",
            &page_params(limit, offset, conditions)?,
        )
    }

    pub fn count_subscriptions(&self, conditions: &Params) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            "/v3/subscriptions/count.json",
            &extract_query_params(conditions)?,
        )
    }

    pub fn get_subscription(&self, subscription_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            &format!("/v3/subscriptions/{}.json", segment(subscription_id)),
            &Params::new(),
        )
    }

    /// Register `url` to receive webhook calls for `events`
    /// (e.g. `email_processed`, `document_completed`).
    pub fn create_subscription(&self, url: &str, events: &[&str]) -> Result<serde_json::Value, ApiError> {
        if url.is_empty() {
            return Err(ApiError::MissingParameter("url"));
        }
        if events.is_empty() {
            return Err(ApiError::MissingParameter("events"));
        }
        let params = Params::new().with("url", url).with("events", events_value(events));
        self.request_json(HttpMethod::Post, "/v3/subscriptions.json", &params)
    }

    /// Change the url and/or the events; `None` leaves a field untouched.
    pub fn update_subscription(
        &self,
        subscription_id: &str,
        url: Option<&str>,
        events: Option<&[&str]>,
    ) -> Result<serde_json::Value, ApiError> {
        let mut params = Params::new();
        if let Some(url) = url {
            params.insert("url", url);
        }
        if let Some(events) = events {
            params.insert("events", events_value(events));
        }
        self.request_json(
            HttpMethod::Patch,
            &format!("/v3/subscriptions/{}.json", segment(subscription_id)),
            &params,
        )
    }

    pub fn delete_subscription(&self, subscription_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Delete,
            &format!("/v3/subscriptions/{}.json", segment(subscription_id)),
            &Params::new(),
        )
    }
}

fn events_value(events: &[&str]) -> Value {
    Value::List(events.iter().map(|event| Value::from(*event)).collect())
}
