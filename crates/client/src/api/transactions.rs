use finledger_core::{Transaction, TransactionDraft, TransactionId, UserId};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// `/transactions`: the business documents entries are booked from.
#[derive(Debug, Clone, Copy)]
pub struct TransactionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TransactionsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Transaction>> {
        self.client.get("/transactions").await
    }

    pub async fn pending(&self) -> ClientResult<Vec<Transaction>> {
        self.client.get("/transactions/pending").await
    }

    pub async fn get(&self, id: TransactionId) -> ClientResult<Transaction> {
        self.client.get(&format!("/transactions/{id}")).await
    }

    pub async fn by_user(&self, user: UserId) -> ClientResult<Vec<Transaction>> {
        self.client.get(&format!("/transactions/user/{user}")).await
    }

    pub async fn create(&self, draft: &TransactionDraft) -> ClientResult<Transaction> {
        self.client.post("/transactions", draft).await
    }

    pub async fn update(&self, id: TransactionId, draft: &TransactionDraft) -> ClientResult<Transaction> {
        self.client.put(&format!("/transactions/{id}"), Some(draft), &[]).await
    }

    pub async fn delete(&self, id: TransactionId) -> ClientResult<()> {
        self.client.delete(&format!("/transactions/{id}")).await
    }
}
