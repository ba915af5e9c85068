//! Failure vocabulary of the booking and wallet workflows.

use uuid::Uuid;

use super::booking::{BookingTransitionError, BookingValidationError};
use super::date_range::InvalidDateRange;
use super::error::Error;
use super::money::MoneyError;
use super::ports::{StoreError, UnitOfWorkError, UserDirectoryError};
use super::user::UserId;
use super::wallet::WalletError;

/// Errors raised by workflow orchestration.
///
/// Not-found and domain-invariant failures are terminal for the request;
/// [`WorkflowError::Conflict`] is retryable after reloading state. Every
/// variant aborts the surrounding transaction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    /// The target booking does not exist.
    #[error("booking {booking_id} not found")]
    BookingNotFound {
        /// Requested booking.
        booking_id: Uuid,
    },
    /// The booked property does not exist.
    #[error("property {property_id} not found")]
    PropertyNotFound {
        /// Requested property.
        property_id: Uuid,
    },
    /// The property's business owner is missing from the directory.
    #[error("owner {owner_id} not found")]
    OwnerNotFound {
        /// Missing owner.
        owner_id: UserId,
    },
    /// The client has no wallet.
    #[error("wallet for user {user_id} not found")]
    WalletNotFound {
        /// Wallet owner.
        user_id: UserId,
    },
    /// The requested stay collides with the property's unavailable set.
    #[error("requested dates are no longer available")]
    RangeUnavailable,
    /// The requested stay range is empty or inverted.
    #[error(transparent)]
    InvalidRange(#[from] InvalidDateRange),
    /// The reservation payload failed validation.
    #[error(transparent)]
    Validation(#[from] BookingValidationError),
    /// The requested status change is illegal.
    #[error(transparent)]
    StatusChange(#[from] BookingTransitionError),
    /// The wallet ledger refused the movement.
    #[error(transparent)]
    Ledger(#[from] WalletError),
    /// Money construction or arithmetic failed outside the ledger.
    #[error(transparent)]
    Money(#[from] MoneyError),
    /// The user directory is unreachable.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// A concurrent transaction won; retry after reloading.
    #[error("transaction conflict: {message}")]
    Conflict {
        /// Adapter-supplied context.
        message: String,
    },
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<UnitOfWorkError> for WorkflowError {
    fn from(value: UnitOfWorkError) -> Self {
        match value {
            UnitOfWorkError::Conflict { message } => Self::Conflict { message },
            UnitOfWorkError::Store(error) => Self::Store(error),
        }
    }
}

impl From<WorkflowError> for Error {
    fn from(value: WorkflowError) -> Self {
        let message = value.to_string();
        match value {
            WorkflowError::BookingNotFound { .. }
            | WorkflowError::PropertyNotFound { .. }
            | WorkflowError::OwnerNotFound { .. }
            | WorkflowError::WalletNotFound { .. } => Self::not_found(message),
            WorkflowError::RangeUnavailable | WorkflowError::Conflict { .. } => {
                Self::conflict(message)
            }
            WorkflowError::InvalidRange(_) | WorkflowError::Validation(_) => {
                Self::invalid_request(message)
            }
            WorkflowError::StatusChange(_) => Self::invalid_transition(message),
            WorkflowError::Ledger(WalletError::InsufficientBalance { .. }) => {
                Self::insufficient_balance(message)
            }
            WorkflowError::Ledger(WalletError::Money(_))
            | WorkflowError::Money(MoneyError::CurrencyMismatch { .. }) => {
                Self::currency_mismatch(message)
            }
            WorkflowError::Money(_) => Self::invalid_request(message),
            WorkflowError::Directory(_) | WorkflowError::Store(StoreError::Connection { .. }) => {
                Self::service_unavailable(message)
            }
            WorkflowError::Store(StoreError::Query { .. }) => Self::internal(message),
        }
    }
}
