use finledger_core::{User, UserId, UserUpdate};

use crate::error::ClientResult;
use crate::http::ApiClient;

#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<User>> {
        self.client.get("/users").await
    }

    pub async fn get(&self, id: UserId) -> ClientResult<User> {
        self.client.get(&format!("/users/{id}")).await
    }

    /// Update the profile fields a user may change (email, avatar).
    pub async fn update(&self, id: UserId, update: &UserUpdate) -> ClientResult<User> {
        self.client.put(&format!("/users/{id}"), Some(update), &[]).await
    }
}
