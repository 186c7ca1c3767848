//! `finledger-auth`: pure client-side authorization model.
//!
//! Roles, the signed-in user's profile, the immutable session value and the
//! role predicates views use to hide actions. This crate is intentionally
//! decoupled from HTTP and storage.

pub mod authorize;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod session;

pub use authorize::{AuthzError, authorize, granted_capabilities};
pub use permissions::Capability;
pub use principal::UserProfile;
pub use roles::{Role, RoleRequirement};
pub use session::Session;
