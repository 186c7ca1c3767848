//! Application context: wires the session store, HTTP client, route guard
//! and navigator together once, at startup.

use std::sync::Arc;

use finledger_auth::{Role, Session, UserProfile};
use finledger_core::{LoginRequest, RegisterRequest};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::guard::{GuardDecision, LOGIN_PATH, RouteGuard};
use crate::headers::DefaultHeaders;
use crate::http::ApiClient;
use crate::navigation::{Navigation, Navigator};
use crate::pipeline::Pipeline;
use crate::router::RouteTable;
use crate::session_store::SessionStore;
use crate::stages::{AuthFailureStage, BearerTokenStage, DefaultHeadersStage};
use crate::storage::SessionStorage;

pub struct FinLedgerApp {
    config: ClientConfig,
    session: SessionStore,
    client: ApiClient,
    guard: RouteGuard,
    navigator: Arc<dyn Navigator>,
}

impl FinLedgerApp {
    /// Rehydrate the session and compose the request pipeline.
    ///
    /// Request stages: default headers, then the bearer token from durable
    /// storage. Response stages: auth-failure handling.
    pub fn start(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let headers = DefaultHeaders::new();
        let session = SessionStore::initialize(storage.clone(), headers.clone());

        let pipeline = Pipeline::builder()
            .request_stage(DefaultHeadersStage::new(headers))
            .request_stage(BearerTokenStage::new(storage))
            .response_stage(AuthFailureStage::new(
                session.clone(),
                navigator.clone(),
                config.forbidden_policy,
            ))
            .build();

        let client = ApiClient::new(&config, pipeline)?;
        let guard = RouteGuard::new(RouteTable::finledger(), config.role_denial);

        tracing::info!(
            api = %client.api_base(),
            authenticated = session.is_authenticated(),
            "finledger client started"
        );

        Ok(Self {
            config,
            session,
            client,
            guard,
            navigator,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Sign in and adopt the returned identity.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserProfile> {
        let response = self
            .client
            .auth()
            .login(&LoginRequest::new(username, password))
            .await?;
        Ok(self.session.establish(&response)?)
    }

    /// Create an account and sign in as it.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
        email: Option<String>,
    ) -> ClientResult<UserProfile> {
        let request = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
            email,
        };
        let response = self.client.auth().register(&request).await?;
        Ok(self.session.establish(&response)?)
    }

    /// Explicit sign-out: clear the session and return to the login page.
    pub fn logout(&self) -> ClientResult<()> {
        let cleared = self.session.clear_auth();
        self.navigator.navigate(Navigation::soft(LOGIN_PATH));
        Ok(cleared?)
    }

    /// Run the route guard for `target` against the current session and
    /// issue the redirect, if any.
    pub fn navigate(&self, target: &str) -> GuardDecision {
        let decision = self.guard.evaluate(target, &self.session.current());
        match &decision {
            GuardDecision::Allow => self.navigator.navigate(Navigation::soft(target)),
            GuardDecision::Redirect(nav) => self.navigator.navigate(nav.clone()),
        }
        decision
    }

    pub fn current_session(&self) -> Session {
        self.session.current()
    }

    /// Tear down the context. The persisted session is left in place so the
    /// next start resumes it.
    pub fn shutdown(self) {
        tracing::info!(
            authenticated = self.session.is_authenticated(),
            "finledger client shut down"
        );
    }
}

impl std::fmt::Debug for FinLedgerApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinLedgerApp")
            .field("api", &self.client.api_base())
            .field("session", &self.session)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}
