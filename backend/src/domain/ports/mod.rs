//! Driven ports: the collaborator interfaces the booking core depends on.
//!
//! Store handles are obtained from an active [`UnitOfWork`] so that every
//! mutation issued during one workflow invocation commits or rolls back
//! together. The directory and the notification sink are free-standing:
//! the former is read-only, the latter is a best-effort side channel that
//! deliberately sits outside the transactional boundary.

pub mod booking_store;
pub mod ledger_store;
pub mod notification_sink;
pub mod property_store;
pub mod unit_of_work;
pub mod user_directory;
pub mod wallet_store;

pub use self::booking_store::BookingStore;
pub use self::ledger_store::LedgerStore;
pub use self::notification_sink::{NotificationSink, NotificationSinkError};
pub use self::property_store::PropertyStore;
pub use self::unit_of_work::{TxScope, UnitOfWork, UnitOfWorkError, UnitOfWorkFactory};
pub use self::user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
pub use self::wallet_store::WalletStore;

#[cfg(test)]
pub use self::notification_sink::MockNotificationSink;
#[cfg(test)]
pub use self::user_directory::MockUserDirectory;

/// Errors raised by transactional store adapters.
///
/// All stores reached through one [`UnitOfWork`] share a backend, so they
/// share a failure vocabulary too.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("store connection failed: {message}")]
    Connection {
        /// Adapter-supplied context.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("store query failed: {message}")]
    Query {
        /// Adapter-supplied context.
        message: String,
    },
}

impl StoreError {
    /// Builds a [`StoreError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Builds a [`StoreError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}
