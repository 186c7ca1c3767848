//! Persisted session store.
//!
//! Holds the current [`Session`] in memory, mirrors it into durable storage
//! and keeps the default `Authorization` header in step. Every transition is
//! a single atomic replacement of the session value; subscribers observe
//! each one through a `watch` channel.

use std::sync::Arc;

use tokio::sync::watch;

use finledger_auth::{Session, UserProfile};
use finledger_core::AuthResponse;

use crate::headers::DefaultHeaders;
use crate::storage::{SessionStorage, StorageError, TOKEN_KEY, USER_KEY};

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<Session>,
    storage: Arc<dyn SessionStorage>,
    headers: DefaultHeaders,
}

impl SessionStore {
    /// Rehydrate the session from durable storage.
    ///
    /// A missing or empty token, or a missing or unparseable user, yields an
    /// anonymous session. Leftover keys of an incomplete or unreadable
    /// session are logged and dropped, so no stored token outlives it.
    pub fn initialize(storage: Arc<dyn SessionStorage>, headers: DefaultHeaders) -> Self {
        let session = rehydrate(storage.as_ref());

        match session.token() {
            Some(token) => {
                headers.set_bearer(token);
                tracing::info!(
                    user = session.user().map(|u| u.username.as_str()).unwrap_or_default(),
                    "restored persisted session"
                );
            }
            None => headers.clear_bearer(),
        }

        let (state, _) = watch::channel(session);
        Self {
            inner: Arc::new(Inner {
                state,
                storage,
                headers,
            }),
        }
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user().cloned()
    }

    /// Receiver that observes every session transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    pub fn headers(&self) -> &DefaultHeaders {
        &self.inner.headers
    }

    /// Replace the session with an authenticated one and persist it.
    ///
    /// An empty token clears the session instead. The in-memory session is
    /// replaced before storage is written; a storage failure is returned but
    /// does not roll the session back.
    pub fn set_auth(&self, token: &str, user: UserProfile) -> Result<(), StorageError> {
        let session = Session::authenticated(token, user);
        let Session::Authenticated { token, user } = &session else {
            return self.clear_auth();
        };

        let user_json = serde_json::to_string(user)?;
        tracing::info!(user = %user.username, role = ?user.role, "session established");

        self.inner.headers.set_bearer(token);
        let token = token.clone();
        self.inner.state.send_replace(session);

        let storage = &self.inner.storage;
        storage
            .set(TOKEN_KEY, &token)
            .and_then(|()| storage.set(USER_KEY, &user_json))
            .inspect_err(|err| tracing::warn!("failed to persist session: {err}"))
    }

    /// Adopt the identity returned by a login or register call.
    pub fn establish(&self, response: &AuthResponse) -> Result<UserProfile, StorageError> {
        let profile = UserProfile::from_auth(response);
        self.set_auth(&response.token, profile.clone())?;
        Ok(profile)
    }

    /// Drop the session, its durable keys and the default bearer header.
    ///
    /// Idempotent. Both keys are removed even if the first removal fails;
    /// the first failure is returned.
    pub fn clear_auth(&self) -> Result<(), StorageError> {
        let previous = self.inner.state.send_replace(Session::Anonymous);
        self.inner.headers.clear_bearer();
        if previous.is_authenticated() {
            tracing::info!("session cleared");
        }

        let token = self.inner.storage.remove(TOKEN_KEY);
        let user = self.inner.storage.remove(USER_KEY);
        token
            .and(user)
            .inspect_err(|err| tracing::warn!("failed to remove persisted session: {err}"))
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

fn rehydrate(storage: &dyn SessionStorage) -> Session {
    let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
    let raw_user = storage.get(USER_KEY);

    let (token, raw_user) = match (token, raw_user) {
        (Some(token), Some(raw_user)) => (token, raw_user),
        (None, None) if storage.get(TOKEN_KEY).is_none() => return Session::Anonymous,
        _ => {
            tracing::warn!("discarding incomplete persisted session");
            discard(storage);
            return Session::Anonymous;
        }
    };

    match serde_json::from_str::<UserProfile>(&raw_user) {
        Ok(user) => Session::authenticated(token, user),
        Err(err) => {
            tracing::warn!("discarding persisted session with unreadable user: {err}");
            discard(storage);
            Session::Anonymous
        }
    }
}

/// Remove both session keys so storage agrees with an anonymous session.
fn discard(storage: &dyn SessionStorage) {
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(err) = storage.remove(key) {
            tracing::warn!(key, "failed to remove persisted session key: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{OutboundRequest, RequestStage};
    use crate::stages::BearerTokenStage;
    use crate::storage::MemoryStorage;
    use finledger_auth::Role;
    use finledger_core::UserId;
    use proptest::prelude::*;

    fn accountant() -> UserProfile {
        UserProfile::new(UserId::new(3), "alice", Some(Role::Accountant))
    }

    fn fresh() -> (SessionStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::initialize(storage.clone(), DefaultHeaders::new());
        (store, storage)
    }

    proptest! {
        #[test]
        fn set_auth_persists_token_and_user(token in "[A-Za-z0-9._-]{1,64}", id in 1i32..10_000) {
            let (store, storage) = fresh();
            let user = UserProfile::new(UserId::new(id), "u", Some(Role::Manager));

            store.set_auth(&token, user.clone()).unwrap();

            prop_assert!(store.is_authenticated());
            prop_assert_eq!(storage.get(TOKEN_KEY), Some(token.clone()));
            let persisted: UserProfile = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
            prop_assert_eq!(persisted, user);
            prop_assert_eq!(store.headers().authorization(), Some(format!("Bearer {token}")));
        }
    }

    #[test]
    fn clear_auth_is_idempotent() {
        let (store, storage) = fresh();
        store.set_auth("tok", accountant()).unwrap();

        store.clear_auth().unwrap();
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
        assert_eq!(store.headers().authorization(), None);

        store.clear_auth().unwrap();
        assert_eq!(store.current(), Session::Anonymous);
    }

    #[test]
    fn empty_token_clears() {
        let (store, storage) = fresh();
        store.set_auth("tok", accountant()).unwrap();
        store.set_auth("", accountant()).unwrap();
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn rehydrates_persisted_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "persisted").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&accountant()).unwrap())
            .unwrap();

        let headers = DefaultHeaders::new();
        let store = SessionStore::initialize(storage, headers.clone());
        assert_eq!(store.current().token(), Some("persisted"));
        assert_eq!(store.user(), Some(accountant()));
        assert_eq!(headers.authorization().as_deref(), Some("Bearer persisted"));
    }

    #[test]
    fn unreadable_user_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "persisted").unwrap();
        storage.set(USER_KEY, "{broken").unwrap();

        let store = SessionStore::initialize(storage.clone(), DefaultHeaders::new());
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn token_without_user_is_anonymous() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "orphan").unwrap();

        let store = SessionStore::initialize(storage.clone(), DefaultHeaders::new());
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());

        let stage = BearerTokenStage::new(storage);
        let url = reqwest::Url::parse("http://localhost/api/accounts").unwrap();
        let prepared = stage.apply(OutboundRequest::new(reqwest::Method::GET, url));
        assert!(prepared.headers.get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn user_without_token_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "").unwrap();
        storage
            .set(USER_KEY, &serde_json::to_string(&accountant()).unwrap())
            .unwrap();

        let store = SessionStore::initialize(storage.clone(), DefaultHeaders::new());
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn establish_uses_login_response() {
        let (store, _) = fresh();
        let profile = store
            .establish(&AuthResponse {
                token: "jwt".into(),
                username: "bob".into(),
                role: Some("BOSS".into()),
                user_id: UserId::new(9),
            })
            .unwrap();

        assert_eq!(profile.role, Some(Role::Boss));
        assert_eq!(store.current().role(), Some(Role::Boss));
    }

    #[tokio::test]
    async fn subscribers_see_every_transition() {
        let (store, _) = fresh();
        let mut rx = store.subscribe();

        store.set_auth("tok", accountant()).unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        store.clear_auth().unwrap();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_authenticated());
    }
}
