//! Port for wallet persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::UserId;
use crate::domain::wallet::Wallet;

use super::StoreError;

/// Transactional store for wallet aggregates.
///
/// Updates are optimistic: the staged wallet carries the version it was
/// loaded with, and the unit of work refuses to commit over a newer one.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Finds the wallet owned by `user_id`. One wallet exists per user.
    async fn get_by_user_id(&self, user_id: UserId) -> Result<Option<Wallet>, StoreError>;

    /// Finds a wallet by id.
    async fn get_by_id(&self, wallet_id: Uuid) -> Result<Option<Wallet>, StoreError>;

    /// Stages an update to an existing wallet.
    async fn update(&self, wallet: &Wallet) -> Result<(), StoreError>;
}
