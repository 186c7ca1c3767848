use thiserror::Error;

use crate::{Capability, Role, Session};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("signed-in user has no recognised role")]
    MissingRole,

    #[error("forbidden: role {role} lacks capability '{capability}'")]
    Forbidden { capability: Capability, role: Role },
}

/// Authorize the session's user for a capability.
///
/// - No IO
/// - No panics
/// - Advisory only (the backend re-checks every call)
pub fn authorize(session: &Session, capability: Capability) -> Result<(), AuthzError> {
    let user = session.user().ok_or(AuthzError::Unauthenticated)?;
    let role = user.role.ok_or(AuthzError::MissingRole)?;

    if capability.check(Some(user)) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden { capability, role })
    }
}

/// Capabilities the session's user holds, in declaration order.
pub fn granted_capabilities(session: &Session) -> Vec<Capability> {
    Capability::ALL
        .iter()
        .copied()
        .filter(|cap| cap.check(session.user()))
        .collect()
}
