//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain services and remain testable without real
//! infrastructure.

use std::sync::Arc;

use crate::domain::{BookingService, WalletService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Booking reservation and lifecycle workflows.
    pub bookings: Arc<BookingService>,
    /// Wallet top-ups and ledger reads.
    pub wallets: Arc<WalletService>,
}

impl HttpState {
    /// Bundles the services handlers depend on.
    pub fn new(bookings: Arc<BookingService>, wallets: Arc<WalletService>) -> Self {
        Self { bookings, wallets }
    }
}
