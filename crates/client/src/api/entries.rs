use finledger_core::{CreateEntryRequest, Entry, EntryId, EntryStatus, Split, TransactionId};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// `/entries`: journal entries and their splits.
#[derive(Debug, Clone, Copy)]
pub struct EntriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EntriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<Vec<Entry>> {
        self.client.get("/entries").await
    }

    /// Entries waiting for a manager's review.
    pub async fn submitted(&self) -> ClientResult<Vec<Entry>> {
        self.client.get("/entries/submitted").await
    }

    pub async fn get(&self, id: EntryId) -> ClientResult<Entry> {
        self.client.get(&format!("/entries/{id}")).await
    }

    pub async fn for_transaction(&self, transaction: TransactionId) -> ClientResult<Vec<Entry>> {
        self.client.get(&format!("/entries/transaction/{transaction}")).await
    }

    pub async fn splits(&self, id: EntryId) -> ClientResult<Vec<Split>> {
        self.client.get(&format!("/entries/{id}/splits")).await
    }

    pub async fn create(&self, request: &CreateEntryRequest) -> ClientResult<Entry> {
        self.client.post("/entries", request).await
    }

    pub async fn update_status(&self, id: EntryId, status: EntryStatus) -> ClientResult<Entry> {
        self.client
            .put_query(&format!("/entries/{id}/status"), &[("status", status.to_string())])
            .await
    }

    pub async fn delete(&self, id: EntryId) -> ClientResult<()> {
        self.client.delete(&format!("/entries/{id}")).await
    }
}
