//! Default headers shared by every request of an [`ApiClient`](crate::ApiClient).
//!
//! The session store keeps the default bearer header in step with the
//! session, for call paths that do not go through the bearer-token stage.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    inner: Arc<RwLock<HeaderMap>>,
}

impl DefaultHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `Authorization: Bearer <token>`.
    ///
    /// Returns `false` (and leaves no header) when the token cannot be sent
    /// as a header value.
    pub fn set_bearer(&self, token: &str) -> bool {
        let mut headers = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match bearer_value(token) {
            Some(value) => {
                headers.insert(AUTHORIZATION, value);
                true
            }
            None => {
                headers.remove(AUTHORIZATION);
                false
            }
        }
    }

    pub fn clear_bearer(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(AUTHORIZATION);
    }

    pub fn authorization(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn snapshot(&self) -> HeaderMap {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// `Bearer <token>` as a sensitive header value; `None` for empty or
/// non-visible-ASCII tokens.
pub fn bearer_value(token: &str) -> Option<HeaderValue> {
    if token.is_empty() {
        return None;
    }
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).ok()?;
    value.set_sensitive(true);
    Some(value)
}
