use finledger_core::{AuthResponse, LoginRequest, RegisterRequest};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// `/auth`: credential exchange.
///
/// These calls only talk to the backend; adopting the returned identity is
/// the session store's job (see [`FinLedgerApp::login`](crate::FinLedgerApp::login)).
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        self.client.post("/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.client.post("/auth/register", request).await
    }
}
