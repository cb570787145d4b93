use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::client::BacklogClient;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::query::{EncodeQuery, QueryParams};
use crate::types::User;

/// Form body for `POST /users`. All fields are required by Backlog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub user_id: String,
    pub password: String,
    pub name: String,
    pub mail_address: String,
    pub role_type: i64,
}

impl EncodeQuery for NewUser {
    fn encode_query(&self, params: &mut QueryParams) {
        params
            .push_str("userId", &self.user_id)
            .push_str("password", &self.password)
            .push_str("name", &self.name)
            .push_str("mailAddress", &self.mail_address)
            .push_int("roleType", self.role_type);
    }
}

/// Form body for `PATCH /users/{id}`. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserUpdate {
    pub password: Option<String>,
    pub name: Option<String>,
    pub mail_address: Option<String>,
    pub role_type: Option<i64>,
}

impl EncodeQuery for UserUpdate {
    fn encode_query(&self, params: &mut QueryParams) {
        params
            .push_opt_str("password", self.password.as_deref())
            .push_opt_str("name", self.name.as_deref())
            .push_opt_str("mailAddress", self.mail_address.as_deref());
        if let Some(role_type) = self.role_type {
            params.push_int("roleType", role_type);
        }
    }
}

impl BacklogClient {
    pub fn get_users(&self) -> Result<Vec<User>> {
        self.get_json("/users", &())
    }

    pub fn get_user(&self, id: i64) -> Result<User> {
        self.get_json(&format!("/users/{id}"), &())
    }

    /// The user that owns the API key.
    pub fn get_myself(&self) -> Result<User> {
        self.get_json("/users/myself", &())
    }

    pub fn add_user(&self, user: &NewUser) -> Result<User> {
        self.call_json(self.build_form_request(HttpMethod::Post, "/users", user))
    }

    pub fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User> {
        self.call_json(self.build_form_request(HttpMethod::Patch, &format!("/users/{id}"), update))
    }

    /// Delete a user. Backlog echoes the deleted user back.
    pub fn delete_user(&self, id: i64) -> Result<User> {
        self.call_json(self.build_request(HttpMethod::Delete, &format!("/users/{id}"), &()))
    }

    /// Fetch and decode the user's icon (PNG, JPEG or GIF).
    pub fn get_user_icon(&self, id: i64) -> Result<DynamicImage> {
        self.call_image(self.build_request(HttpMethod::Get, &format!("/users/{id}/icon"), &()))
    }
}
