//! Payment payloads.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::{AccountId, PaymentId, TransactionId, UserId};
use crate::wire_enum;

/// Approval lifecycle of a payment.
///
/// `PENDING -> APPROVED | REJECTED`, then `APPROVED -> PAID` on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Paid,
}

wire_enum!(PaymentStatus, "payment status", {
    Pending => "PENDING",
    Approved => "APPROVED",
    Rejected => "REJECTED",
    Paid => "PAID",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    #[serde(rename = "transactionID")]
    pub transaction_id: TransactionId,
    #[serde(rename = "accountID")]
    pub account_id: AccountId,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub approved_by: Option<UserId>,
}

impl Payment {
    pub fn is_awaiting_approval(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    #[serde(rename = "transactionID")]
    pub transaction_id: TransactionId,
    #[serde(rename = "accountID")]
    pub account_id: AccountId,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDateTime>,
}
