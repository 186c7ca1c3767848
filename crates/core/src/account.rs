//! Chart-of-accounts payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::AccountId;
use crate::wire_enum;

/// High-level account category (determines normal balance side server-side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountCategory {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

wire_enum!(AccountCategory, "account category", {
    Asset => "ASSET",
    Liability => "LIABILITY",
    Equity => "EQUITY",
    Revenue => "REVENUE",
    Expense => "EXPENSE",
});

/// An account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    /// Unique account code, e.g. "1001".
    pub code: String,
    pub name: String,
    pub category: AccountCategory,
    #[serde(default)]
    pub debit_amount: Decimal,
    #[serde(default)]
    pub credit_amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "parentID", default)]
    pub parent_id: Option<AccountId>,
}

impl Account {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Body of `POST /accounts` and `PUT /accounts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    pub code: String,
    pub name: String,
    pub category: AccountCategory,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "parentID", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<AccountId>,
}

impl AccountDraft {
    pub fn new(code: impl Into<String>, name: impl Into<String>, category: AccountCategory) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category,
            currency: default_currency(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: AccountId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

fn default_currency() -> String {
    "CNY".to_string()
}
