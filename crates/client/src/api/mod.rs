//! Typed endpoint groups of the FinLedger REST API.
//!
//! Each group borrows the [`ApiClient`] and maps one backend resource; obtain
//! them through the accessors on the client, e.g. `client.payments()`.

mod accounts;
mod auth;
mod entries;
mod health;
mod payments;
mod transactions;
mod users;

pub use accounts::AccountsApi;
pub use auth::AuthApi;
pub use entries::EntriesApi;
pub use health::Health;
pub use payments::PaymentsApi;
pub use transactions::TransactionsApi;
pub use users::UsersApi;

use crate::http::ApiClient;

impl ApiClient {
    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn entries(&self) -> EntriesApi<'_> {
        EntriesApi::new(self)
    }

    pub fn payments(&self) -> PaymentsApi<'_> {
        PaymentsApi::new(self)
    }

    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// Backend liveness check, served on the origin outside the API prefix.
    pub async fn health(&self) -> crate::ClientResult<Health> {
        self.get_from_origin("/health").await
    }
}
