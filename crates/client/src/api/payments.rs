use finledger_core::{Payment, PaymentDraft, PaymentId, TransactionId, UserId};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// `/payments`: payment requests and their approval workflow.
#[derive(Debug, Clone, Copy)]
pub struct PaymentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Payment>> {
        self.client.get("/payments").await
    }

    pub async fn pending(&self) -> ClientResult<Vec<Payment>> {
        self.client.get("/payments/pending").await
    }

    pub async fn get(&self, id: PaymentId) -> ClientResult<Payment> {
        self.client.get(&format!("/payments/{id}")).await
    }

    pub async fn for_transaction(&self, transaction: TransactionId) -> ClientResult<Vec<Payment>> {
        self.client.get(&format!("/payments/transaction/{transaction}")).await
    }

    pub async fn create(&self, draft: &PaymentDraft) -> ClientResult<Payment> {
        self.client.post("/payments", draft).await
    }

    pub async fn approve(&self, id: PaymentId, approver: UserId) -> ClientResult<Payment> {
        self.client
            .put_query(&format!("/payments/{id}/approve"), &[("approverId", approver.to_string())])
            .await
    }

    pub async fn reject(&self, id: PaymentId, approver: UserId) -> ClientResult<Payment> {
        self.client
            .put_query(&format!("/payments/{id}/reject"), &[("approverId", approver.to_string())])
            .await
    }

    /// Mark an approved payment as paid.
    pub async fn complete(&self, id: PaymentId) -> ClientResult<Payment> {
        self.client.put_query(&format!("/payments/{id}/complete"), &[]).await
    }

    pub async fn delete(&self, id: PaymentId) -> ClientResult<()> {
        self.client.delete(&format!("/payments/{id}")).await
    }
}
