//! Team users, seats and groups.

use crate::client::SignaturitClient;
use crate::endpoints::segment;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::params::Params;
use crate::transport::Transport;
use crate::types::UserRole;

impl<T: Transport> SignaturitClient<T> {
    pub fn get_users(&self) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Get, "/v3/team/users.json", &Params::new())
    }

    pub fn get_user(&self, user_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            &format!("/v3/team/users/{}.json", segment(user_id)),
            &Params::new(),
        )
    }

    pub fn invite_user(&self, email: &str, role: UserRole) -> Result<serde_json::Value, ApiError> {
        if email.is_empty() {
            return Err(ApiError::MissingParameter("email"));
        }
        let params = Params::new().with("email", email).with("role", role);
        self.request_json(HttpMethod::Post, "/v3/team/users.json", &params)
    }

    pub fn change_user_role(&self, user_id: &str, role: UserRole) -> Result<serde_json::Value, ApiError> {
        let params = Params::new().with("role", role);
        self.request_json(
            HttpMethod::Patch,
            &format!("/v3/team/users/{}.json", segment(user_id)),
            &params,
        )
    }

    pub fn remove_user(&self, user_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Delete,
            &format!("/v3/team/users/{}.json", segment(user_id)),
            &Params::new(),
        )
    }

    pub fn get_seats(&self) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Get, "/v3/team/seats.json", &Params::new())
    }

    pub fn remove_seat(&self, seat_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Delete,
            &format!("/v3/team/seats/{}.json", segment(seat_id)),
            &Params::new(),
        )
    }

    pub fn get_groups(&self) -> Result<serde_json::Value, ApiError> {
        self.request_json(HttpMethod::Get, "/v3/team/groups.json", &Params::new())
    }

    pub fn get_group(&self, group_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Get,
            &format!("/v3/team/groups/{}.json", segment(group_id)),
            &Params::new(),
        )
    }

    pub fn create_group(&self, name: &str) -> Result<serde_json::Value, ApiError> {
        if name.is_empty() {
            return Err(ApiError::MissingParameter("name"));
        }
        let params = Params::new().with("name", name);
        self.request_json(HttpMethod::Post, "/v3/team/groups.json", &params)
    }

    pub fn update_group(&self, group_id: &str, name: &str) -> Result<serde_json::Value, ApiError> {
        let params = Params::new().with("name", name);
        self.request_json(
            HttpMethod::Patch,
            &format!("/v3/team/groups/{}.json", segment(group_id)),
            &params,
        )
    }

    pub fn delete_group(&self, group_id: &str) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            HttpMethod::Delete,
            &format!("/v3/team/groups/{}.json", segment(group_id)),
            &Params::new(),
        )
    }

    pub fn add_manager_to_group(&self, group_id: &str, user_id: &str) -> Result<serde_json::Value, ApiError> {
        self.group_membership(HttpMethod::Post, group_id, "managers", user_id)
    }

    pub fn remove_manager_from_group(&self, group_id: &str, user_id: &str) -> Result<serde_json::Value, ApiError> {
        self.group_membership(HttpMethod::Delete, group_id, "managers", user_id)
    }

    pub fn add_member_to_group(&self, group_id: &str, user_id: &str) -> Result<serde_json::Value, ApiError> {
        self.group_membership(HttpMethod::Post, group_id, "members", user_id)
    }

    pub fn remove_member_from_group(&self, group_id: &str, user_id: &str) -> Result<serde_json::Value, ApiError> {
        self.group_membership(HttpMethod::Delete, group_id, "members", user_id)
    }

    fn group_membership(
        &self,
        method: HttpMethod,
        group_id: &str,
        kind: &str,
        user_id: &str,
    ) -> Result<serde_json::Value, ApiError> {
        self.request_json(
            method,
            &format!("/v3/team/groups/{}/{}/{}.json", segment(group_id), segment(kind), segment(user_id)),
            &Params::new(),
        )
    }
}
