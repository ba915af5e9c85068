//! Port for the append-only wallet ledger.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::wallet::LedgerEntry;

use super::StoreError;

/// Transactional, append-only store for ledger entries.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Stages a new ledger entry. Entries are never updated or removed.
    async fn append(&self, entry: &LedgerEntry) -> Result<(), StoreError>;

    /// Returns the entries recorded for `wallet_id`, oldest first.
    async fn list_for_wallet(&self, wallet_id: Uuid) -> Result<Vec<LedgerEntry>, StoreError>;
}
