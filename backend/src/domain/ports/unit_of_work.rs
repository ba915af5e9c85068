//! Port for the transactional boundary around one workflow invocation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::UserId;

use super::{BookingStore, LedgerStore, PropertyStore, StoreError, WalletStore};

/// Errors raised when opening or committing a unit of work.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitOfWorkError {
    /// Another transaction committed over state this one read. Retryable
    /// after reloading.
    #[error("transaction conflict: {message}")]
    Conflict {
        /// Adapter-supplied context.
        message: String,
    },
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UnitOfWorkError {
    /// Builds a [`UnitOfWorkError::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

/// The shared-mutable-state region a transaction serialises on.
///
/// Mutating workflows take an advisory lock keyed by this scope for their
/// whole duration, so two confirmations for the same property cannot
/// interleave; wallet versioning at commit covers cross-scope wallet races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxScope {
    /// Serialise on a property: its bookings and unavailable-date set.
    Property(Uuid),
    /// Serialise on the wallet owned by a user.
    WalletOwner(UserId),
    /// No lock; the transaction only reads.
    ReadOnly,
}

/// One atomic persistence boundary.
///
/// Store handles obtained from a unit of work stage their mutations; nothing
/// becomes visible until [`UnitOfWork::commit`] succeeds. Dropping the unit
/// of work uncommitted discards every staged mutation.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Booking store scoped to this transaction.
    fn bookings(&self) -> &dyn BookingStore;

    /// Property store scoped to this transaction.
    fn properties(&self) -> &dyn PropertyStore;

    /// Wallet store scoped to this transaction.
    fn wallets(&self) -> &dyn WalletStore;

    /// Ledger store scoped to this transaction.
    fn ledger(&self) -> &dyn LedgerStore;

    /// Atomically applies every staged mutation.
    ///
    /// Fails with [`UnitOfWorkError::Conflict`] when optimistic version
    /// checks detect a concurrent committed update; in that case nothing is
    /// applied.
    async fn commit(self: Box<Self>) -> Result<(), UnitOfWorkError>;
}

/// Opens units of work.
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    /// Begins a transaction, waiting for the advisory lock `scope` names.
    async fn begin(&self, scope: TxScope) -> Result<Box<dyn UnitOfWork>, UnitOfWorkError>;
}
