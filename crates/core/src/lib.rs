//! `finledger-core`: ledger payload types shared by the client crates.
//!
//! This crate contains **wire types only** (no I/O, no HTTP). Ledger rules
//! such as debit/credit balancing are enforced by the backend.

pub mod account;
pub mod api_error;
pub mod entry;
pub mod error;
pub mod id;
pub mod payment;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountCategory, AccountDraft};
pub use api_error::ApiErrorBody;
pub use entry::{CreateEntryRequest, Entry, EntryDraft, EntryStatus, Split, SplitDraft};
pub use error::ParseError;
pub use id::{AccountId, EntryId, PaymentId, SplitId, TransactionId, UserId};
pub use payment::{Payment, PaymentDraft, PaymentStatus};
pub use transaction::{Transaction, TransactionDraft, TransactionStatus};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User, UserUpdate};
