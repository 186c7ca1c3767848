//! The client-side session value.

use crate::{Role, UserProfile};

/// Current authenticated identity of the client.
///
/// A session is an immutable value: every login/logout replaces it whole, so
/// a token without a user (or a user without a token) cannot be represented.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { token: String, user: UserProfile },
}

impl Session {
    /// Build a session from a token and profile.
    ///
    /// An empty token means "no session" and yields [`Session::Anonymous`].
    pub fn authenticated(token: impl Into<String>, user: UserProfile) -> Self {
        let token = token.into();
        if token.is_empty() {
            return Session::Anonymous;
        }
        Session::Authenticated { token, user }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Session::Authenticated { user, .. } => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().and_then(|u| u.role)
    }
}

// Tokens are credentials; keep them out of logs.
impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Session::Anonymous => f.write_str("Anonymous"),
            Session::Authenticated { user, .. } => f
                .debug_struct("Authenticated")
                .field("token", &"<redacted>")
                .field("user", user)
                .finish(),
        }
    }
}
