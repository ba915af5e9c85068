//! Domain core: value types, aggregates, and the booking workflows.
//!
//! Purpose: hold every business rule of the rental marketplace — money
//! arithmetic, the booking state machine, the wallet ledger, overlap
//! resolution, and the confirmation workflow — behind strongly typed
//! entities. Everything effectful is reached through the traits in
//! [`ports`]; adapters live under `crate::outbound`.
//!
//! Public surface:
//! - Money, CurrencyCode, DiscountPercent (`money`) — exact-decimal money.
//! - DateRange (`date_range`) — half-open stay interval.
//! - Booking, BookingStatus (`booking`) — booking aggregate and lifecycle.
//! - Wallet, LedgerEntry (`wallet`) — balance plus append-only audit trail.
//! - Property, ContactPolicy (`property`) — the subset bookings read.
//! - BookingService, WalletService — workflow orchestration.
//! - Error, ErrorCode (`error`) — API error response payload.

pub mod booking;
pub mod booking_service;
pub mod completion_sweep;
pub mod date_range;
pub mod error;
pub mod events;
pub mod money;
pub mod notifications;
pub mod ports;
pub mod pricing;
pub mod property;
pub mod user;
pub mod wallet;
pub mod wallet_service;
pub mod workflow_error;

pub use self::booking::{
    Booking, BookingDraft, BookingStatus, BookingTransitionError, BookingValidationError,
};
pub use self::booking_service::{BookingPolicy, BookingService, ReserveBookingRequest};
pub use self::date_range::{DateRange, InvalidDateRange};
pub use self::error::{Error, ErrorCode};
pub use self::events::{BookingLifecycle, BookingLifecycleEvent};
pub use self::money::{CurrencyCode, DiscountPercent, InvalidDiscount, Money, MoneyError};
pub use self::notifications::{Notification, NotificationKind};
pub use self::property::{ContactPolicy, Property};
pub use self::user::{UserId, UserProfile};
pub use self::wallet::{LedgerDirection, LedgerEntry, Wallet, WalletError};
pub use self::wallet_service::WalletService;
pub use self::workflow_error::WorkflowError;
