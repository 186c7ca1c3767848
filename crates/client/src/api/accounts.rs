use finledger_core::{Account, AccountCategory, AccountDraft, AccountId};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// `/accounts`: the chart of accounts.
#[derive(Debug, Clone, Copy)]
pub struct AccountsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AccountsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Account>> {
        self.client.get("/accounts").await
    }

    pub async fn get(&self, id: AccountId) -> ClientResult<Account> {
        self.client.get(&format!("/accounts/{id}")).await
    }

    pub async fn by_category(&self, category: AccountCategory) -> ClientResult<Vec<Account>> {
        self.client.get(&format!("/accounts/category/{category}")).await
    }

    /// Top-level accounts (no parent).
    pub async fn roots(&self) -> ClientResult<Vec<Account>> {
        self.client.get("/accounts/root").await
    }

    pub async fn children(&self, parent: AccountId) -> ClientResult<Vec<Account>> {
        self.client.get(&format!("/accounts/parent/{parent}")).await
    }

    pub async fn create(&self, draft: &AccountDraft) -> ClientResult<Account> {
        self.client.post("/accounts", draft).await
    }

    pub async fn update(&self, id: AccountId, draft: &AccountDraft) -> ClientResult<Account> {
        self.client.put(&format!("/accounts/{id}"), Some(draft), &[]).await
    }

    pub async fn delete(&self, id: AccountId) -> ClientResult<()> {
        self.client.delete(&format!("/accounts/{id}")).await
    }
}
