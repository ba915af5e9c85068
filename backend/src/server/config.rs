//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use clap::Parser;
use rust_decimal::Decimal;

/// Command-line and environment configuration for the backend server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "backend",
    about = "Rental marketplace booking and wallet backend",
    version
)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,
    /// Flat fee charged to the client's wallet when a booking is confirmed,
    /// denominated in the property's currency.
    #[arg(long, env = "CONFIRMATION_FEE", default_value = "50")]
    pub confirmation_fee: Decimal,
    /// Seconds between completion sweep passes.
    #[arg(long, env = "SWEEP_INTERVAL_SECS", default_value_t = 3600)]
    pub sweep_interval_secs: u64,
    /// Seed demonstration data (an owner, a property, and a funded client
    /// wallet) at startup.
    #[arg(long, env = "SEED_DEMO_DATA", default_value_t = false)]
    pub seed_demo_data: bool,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = ServerConfig::parse_from(["backend"]);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.confirmation_fee, Decimal::from(50));
        assert_eq!(config.sweep_interval_secs, 3600);
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "backend",
            "--bind-addr",
            "127.0.0.1:9999",
            "--confirmation-fee",
            "12.50",
            "--sweep-interval-secs",
            "60",
            "--seed-demo-data",
        ]);
        assert_eq!(config.bind_addr.port(), 9999);
        assert_eq!(config.confirmation_fee, "12.50".parse().expect("valid decimal"));
        assert_eq!(config.sweep_interval_secs, 60);
        assert!(config.seed_demo_data);
    }
}
