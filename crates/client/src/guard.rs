//! Route guard: decides whether a navigation may proceed.
//!
//! Rules are evaluated in order and the first that fires wins:
//! 1. a protected route without a session goes to `/login`;
//! 2. `/login` or `/register` with a session goes to `/`;
//! 3. a role-gated route the user's role does not satisfy goes to `/`;
//! 4. everything else is allowed.

use finledger_auth::Session;

use crate::navigation::{Navigation, Notice};
use crate::router::{RouteMeta, RouteTable, normalize};

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const HOME_PATH: &str = "/";

const LOGIN_ROUTE: &str = "Login";
const REGISTER_ROUTE: &str = "Register";

/// Feedback given when a role gate turns the user away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleDenial {
    /// Redirect home without explanation.
    #[default]
    Silent,
    /// Redirect home with a [`Notice::Forbidden`].
    Notify,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(Navigation),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Redirect(nav) => Some(&nav.to),
            GuardDecision::Allow => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    table: RouteTable,
    role_denial: RoleDenial,
}

impl RouteGuard {
    pub fn new(table: RouteTable, role_denial: RoleDenial) -> Self {
        Self { table, role_denial }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Metadata for `target`; unknown paths are treated as protected.
    pub fn meta_for(&self, target: &str) -> RouteMeta {
        self.table
            .resolve(target)
            .map(|m| m.route.meta.clone())
            .unwrap_or(RouteMeta::PROTECTED)
    }

    pub fn evaluate(&self, target: &str, session: &Session) -> GuardDecision {
        let path = normalize(target);
        let route = self.table.resolve(&path).map(|m| m.route);
        let meta = route.map(|r| r.meta.clone()).unwrap_or(RouteMeta::PROTECTED);

        if meta.requires_auth && !session.is_authenticated() {
            tracing::debug!(%path, "guard: not signed in");
            return GuardDecision::Redirect(Navigation::soft(LOGIN_PATH));
        }

        let entry_page = route.is_some_and(|r| matches!(r.name, LOGIN_ROUTE | REGISTER_ROUTE));
        if entry_page && session.is_authenticated() {
            return GuardDecision::Redirect(Navigation::soft(HOME_PATH));
        }

        if let Some(required) = &meta.required_role {
            if !required.admits(session.role()) {
                tracing::debug!(%path, role = ?session.role(), "guard: role not permitted");
                let nav = Navigation::soft(HOME_PATH);
                return GuardDecision::Redirect(match self.role_denial {
                    RoleDenial::Silent => nav,
                    RoleDenial::Notify => nav.with_notice(Notice::Forbidden { path }),
                });
            }
        }

        GuardDecision::Allow
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(RouteTable::finledger(), RoleDenial::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finledger_auth::{Role, UserProfile};
    use finledger_core::UserId;

    fn signed_in(role: Option<Role>) -> Session {
        Session::authenticated("tok", UserProfile::new(UserId::new(1), "u", role))
    }

    #[test]
    fn anonymous_users_are_sent_to_login() {
        let guard = RouteGuard::default();
        for target in ["/", "/accounts", "/entries/create/7", "/profile/"] {
            assert_eq!(
                guard.evaluate(target, &Session::Anonymous).redirect_target(),
                Some(LOGIN_PATH),
                "{target}"
            );
        }
        assert!(guard.evaluate("/login", &Session::Anonymous).is_allowed());
        assert!(guard.evaluate("/register?invite=1", &Session::Anonymous).is_allowed());
    }

    #[test]
    fn signed_in_users_skip_login_pages() {
        let guard = RouteGuard::default();
        let session = signed_in(Some(Role::Boss));
        assert_eq!(guard.evaluate("/login", &session).redirect_target(), Some(HOME_PATH));
        assert_eq!(guard.evaluate("/register/", &session).redirect_target(), Some(HOME_PATH));
        assert_eq!(guard.evaluate("//login", &session).redirect_target(), Some(HOME_PATH));
        assert_eq!(guard.evaluate("/register//?next=/", &session).redirect_target(), Some(HOME_PATH));
    }

    #[test]
    fn role_gate_redirects_home_silently() {
        let guard = RouteGuard::default();

        let decision = guard.evaluate("/accounts", &signed_in(Some(Role::Accountant)));
        assert_eq!(decision, GuardDecision::Redirect(Navigation::soft(HOME_PATH)));

        assert!(guard.evaluate("/accounts", &signed_in(Some(Role::Manager))).is_allowed());
        assert!(guard.evaluate("/payments", &signed_in(Some(Role::Accountant))).is_allowed());
    }

    #[test]
    fn role_gate_can_notify() {
        let guard = RouteGuard::new(RouteTable::finledger(), RoleDenial::Notify);
        let GuardDecision::Redirect(nav) = guard.evaluate("/accounts", &signed_in(Some(Role::Boss))) else {
            panic!("expected redirect");
        };
        assert_eq!(nav.to, HOME_PATH);
        assert_eq!(
            nav.notice,
            Some(Notice::Forbidden {
                path: "/accounts".into()
            })
        );
    }

    #[test]
    fn user_without_role_fails_role_gate() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.evaluate("/accounts", &signed_in(None)).redirect_target(),
            Some(HOME_PATH)
        );
        assert!(guard.evaluate("/reports", &signed_in(None)).is_allowed());
    }

    #[test]
    fn unknown_paths_are_protected() {
        let guard = RouteGuard::default();
        assert_eq!(
            guard.evaluate("/no/such/page", &Session::Anonymous).redirect_target(),
            Some(LOGIN_PATH)
        );
        assert!(guard.evaluate("/no/such/page", &signed_in(Some(Role::Accountant))).is_allowed());
    }
}
