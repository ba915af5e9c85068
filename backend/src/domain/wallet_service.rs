//! Wallet workflows: top-ups and read access to balances and history.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::money::Money;
use super::ports::{TxScope, UnitOfWorkFactory};
use super::user::UserId;
use super::wallet::{LedgerEntry, Wallet};
use super::workflow_error::WorkflowError;

/// Top-up and read operations over wallets and their ledgers.
#[derive(Clone)]
pub struct WalletService {
    uow: Arc<dyn UnitOfWorkFactory>,
    clock: Arc<dyn Clock>,
}

impl WalletService {
    /// Creates the service with its collaborators.
    pub fn new(uow: Arc<dyn UnitOfWorkFactory>, clock: Arc<dyn Clock>) -> Self {
        Self { uow, clock }
    }

    /// Credits a wallet and records the paired ledger entry in the same
    /// transaction.
    pub async fn add_funds(
        &self,
        user_id: UserId,
        amount: Money,
    ) -> Result<Wallet, WorkflowError> {
        let uow = self.uow.begin(TxScope::WalletOwner(user_id)).await?;
        let now = self.clock.utc();

        let mut wallet = uow
            .wallets()
            .get_by_user_id(user_id)
            .await?
            .ok_or(WorkflowError::WalletNotFound { user_id })?;
        let entry = wallet.add_funds(&amount, "wallet top-up", now)?;
        uow.wallets().update(&wallet).await?;
        uow.ledger().append(&entry).await?;
        uow.commit().await?;

        info!(
            wallet_id = %wallet.id(),
            amount = %amount,
            balance = %wallet.balance(),
            "wallet credited",
        );
        Ok(wallet)
    }

    /// Reads the wallet owned by `user_id`.
    pub async fn wallet_of(&self, user_id: UserId) -> Result<Wallet, WorkflowError> {
        let read = self.uow.begin(TxScope::ReadOnly).await?;
        read.wallets()
            .get_by_user_id(user_id)
            .await?
            .ok_or(WorkflowError::WalletNotFound { user_id })
    }

    /// Reads the ledger history for the wallet owned by `user_id`, oldest
    /// entry first.
    pub async fn ledger_of(&self, user_id: UserId) -> Result<Vec<LedgerEntry>, WorkflowError> {
        let read = self.uow.begin(TxScope::ReadOnly).await?;
        let wallet = read
            .wallets()
            .get_by_user_id(user_id)
            .await?
            .ok_or(WorkflowError::WalletNotFound { user_id })?;
        Ok(read.ledger().list_for_wallet(wallet.id()).await?)
    }
}

#[cfg(test)]
#[path = "wallet_service_tests.rs"]
mod tests;
