//! Built-in pipeline stages: default headers, bearer token, auth failure.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;

use crate::config::ForbiddenPolicy;
use crate::error::{ClientError, ClientResult};
use crate::guard::LOGIN_PATH;
use crate::headers::{DefaultHeaders, bearer_value};
use crate::navigation::{Navigation, Navigator, Notice};
use crate::pipeline::{InboundResponse, OutboundRequest, RequestStage, ResponseStage};
use crate::session_store::SessionStore;
use crate::storage::{SessionStorage, TOKEN_KEY};

/// Copies the shared default headers onto every request.
pub struct DefaultHeadersStage {
    headers: DefaultHeaders,
}

impl DefaultHeadersStage {
    pub fn new(headers: DefaultHeaders) -> Self {
        Self { headers }
    }
}

impl RequestStage for DefaultHeadersStage {
    fn name(&self) -> &'static str {
        "default-headers"
    }

    fn apply(&self, mut request: OutboundRequest) -> OutboundRequest {
        for (name, value) in self.headers.snapshot().iter() {
            if !request.headers.contains_key(name) {
                request.headers.insert(name.clone(), value.clone());
            }
        }
        request
    }
}

/// Attaches `Authorization: Bearer <token>` from durable storage.
///
/// The token is read from storage rather than the in-memory session.
/// Without a token the request goes out unauthenticated.
pub struct BearerTokenStage {
    storage: Arc<dyn SessionStorage>,
}

impl BearerTokenStage {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }
}

impl RequestStage for BearerTokenStage {
    fn name(&self) -> &'static str {
        "bearer-token"
    }

    fn apply(&self, mut request: OutboundRequest) -> OutboundRequest {
        let Some(token) = self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) else {
            request.headers.remove(AUTHORIZATION);
            return request;
        };

        match bearer_value(&token) {
            Some(value) => {
                request.headers.insert(AUTHORIZATION, value);
            }
            None => {
                tracing::warn!("persisted token is not a valid header value; sending request without it");
                request.headers.remove(AUTHORIZATION);
            }
        }
        request
    }
}

/// Ends the session when the backend rejects it.
///
/// On 401 (and 403 under [`ForbiddenPolicy::Logout`]) the session is cleared
/// first, then a hard navigation to the login page is issued. The original
/// error is always returned to the caller.
pub struct AuthFailureStage {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    policy: ForbiddenPolicy,
}

impl AuthFailureStage {
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>, policy: ForbiddenPolicy) -> Self {
        Self {
            session,
            navigator,
            policy,
        }
    }

    fn ends_session(&self, status: StatusCode) -> bool {
        status == StatusCode::UNAUTHORIZED
            || (status == StatusCode::FORBIDDEN && self.policy == ForbiddenPolicy::Logout)
    }
}

impl ResponseStage for AuthFailureStage {
    fn name(&self) -> &'static str {
        "auth-failure"
    }

    fn apply(&self, outcome: ClientResult<InboundResponse>) -> ClientResult<InboundResponse> {
        let status = match &outcome {
            Err(ClientError::Api { status, .. }) if self.ends_session(*status) => *status,
            _ => return outcome,
        };

        tracing::warn!(%status, "backend rejected the session; signing out");
        if let Err(err) = self.session.clear_auth() {
            tracing::warn!("session cleared in memory but storage cleanup failed: {err}");
        }
        self.navigator
            .navigate(Navigation::hard(LOGIN_PATH).with_notice(Notice::SessionExpired));

        outcome
    }
}
