//! Journal entry and split payloads.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::{AccountId, EntryId, SplitId, TransactionId, UserId};
use crate::wire_enum;

/// Review lifecycle of a journal entry.
///
/// `DRAFT -> SUBMITTED -> APPROVED | REJECTED`; transitions are enforced by
/// the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

wire_enum!(EntryStatus, "entry status", {
    Draft => "DRAFT",
    Submitted => "SUBMITTED",
    Approved => "APPROVED",
    Rejected => "REJECTED",
});

/// A journal entry header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub summary: String,
    pub total_amount: Decimal,
    pub created_date: NaiveDateTime,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(rename = "transactionID")]
    pub transaction_id: TransactionId,
    #[serde(rename = "userID")]
    pub user_id: UserId,
}

/// One debit/credit line of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub id: SplitId,
    #[serde(rename = "entryID")]
    pub entry_id: EntryId,
    #[serde(rename = "accountID")]
    pub account_id: AccountId,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub debit_amount: Decimal,
    #[serde(default)]
    pub credit_amount: Decimal,
    #[serde(default)]
    pub tax_amount: Decimal,
}

/// Entry header as sent when creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub summary: String,
    pub total_amount: Decimal,
    #[serde(rename = "transactionID")]
    pub transaction_id: TransactionId,
    #[serde(rename = "userID")]
    pub user_id: UserId,
}

/// Split line as sent when creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitDraft {
    #[serde(rename = "accountID")]
    pub account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub debit_amount: Decimal,
    #[serde(default)]
    pub credit_amount: Decimal,
    #[serde(default)]
    pub tax_amount: Decimal,
}

impl SplitDraft {
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            quantity: None,
            unit_price: None,
            debit_amount: amount,
            credit_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
        }
    }

    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            quantity: None,
            unit_price: None,
            debit_amount: Decimal::ZERO,
            credit_amount: amount,
            tax_amount: Decimal::ZERO,
        }
    }
}

/// Body of `POST /entries`: the header plus its splits.
///
/// Balancing (debits == credits) is validated by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    pub entry: EntryDraft,
    pub splits: Vec<SplitDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_entry_with_local_timestamp() {
        let entry: Entry = serde_json::from_value(json!({
            "id": 9,
            "summary": "Office rent",
            "totalAmount": 3000,
            "createdDate": "2024-03-01T09:30:00",
            "status": "SUBMITTED",
            "transactionID": 4,
            "userID": 2
        }))
        .unwrap();

        assert_eq!(entry.status, EntryStatus::Submitted);
        assert_eq!(entry.transaction_id, TransactionId::new(4));
        assert_eq!(entry.created_date.to_string(), "2024-03-01 09:30:00");
    }

    #[test]
    fn create_request_uses_backend_property_names() {
        let request = CreateEntryRequest {
            entry: EntryDraft {
                summary: "Sale".into(),
                total_amount: Decimal::new(100, 0),
                transaction_id: TransactionId::new(1),
                user_id: UserId::new(2),
            },
            splits: vec![
                SplitDraft::debit(AccountId::new(10), Decimal::new(100, 0)),
                SplitDraft::credit(AccountId::new(20), Decimal::new(100, 0)),
            ],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["entry"]["transactionID"], 1);
        assert_eq!(value["splits"][0]["accountID"], 10);
        assert!(value["splits"][1].get("quantity").is_none());
    }

    #[test]
    fn status_defaults_to_draft() {
        assert_eq!(EntryStatus::default(), EntryStatus::Draft);
        assert_eq!(EntryStatus::Approved.as_str(), "APPROVED");
    }
}
