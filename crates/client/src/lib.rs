//! `finledger-client`: session-aware client for the FinLedger backend.
//!
//! Owns the client side of the access gate: the persisted session, the
//! request/response pipeline that attaches bearer tokens and reacts to auth
//! failures, and the route guard that decides which views a user may open.
//! [`FinLedgerApp`] wires these together.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod guard;
pub mod headers;
pub mod http;
pub mod navigation;
pub mod pipeline;
pub mod router;
pub mod session_store;
pub mod stages;
pub mod storage;

pub use app::FinLedgerApp;
pub use config::{ClientConfig, ConfigError, ForbiddenPolicy};
pub use error::{ClientError, ClientResult};
pub use guard::{GuardDecision, RoleDenial, RouteGuard};
pub use http::ApiClient;
pub use navigation::{ChannelNavigator, Navigation, NavigationKind, Navigator, Notice};
pub use router::{RouteMeta, RouteTable};
pub use session_store::SessionStore;
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
