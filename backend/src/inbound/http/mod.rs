//! HTTP inbound adapter exposing REST endpoints.

pub mod bookings;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod wallets;

use actix_web::web;

pub use error::ApiResult;

/// Mounts every endpoint under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health)
            .service(bookings::reserve)
            .service(bookings::get_booking)
            .service(bookings::confirm)
            .service(bookings::reject)
            .service(bookings::cancel)
            .service(bookings::complete)
            .service(wallets::top_up)
            .service(wallets::get_wallet)
            .service(wallets::get_ledger),
    );
}
