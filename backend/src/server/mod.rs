//! Server construction and wiring.
//!
//! Assembles the in-memory adapters, the domain services, and the HTTP
//! state the handlers consume. The entry-point owns the actix server loop
//! and the background completion sweep.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use mockable::DefaultClock;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::money::{CurrencyCode, Money};
use crate::domain::property::{ContactPolicy, Property};
use crate::domain::user::{UserId, UserProfile};
use crate::domain::wallet::Wallet;
use crate::domain::{BookingPolicy, BookingService, WalletService};
use crate::inbound::http::state::HttpState;
use crate::outbound::directory::MemoryUserDirectory;
use crate::outbound::notify::TracingNotificationSink;
use crate::outbound::persistence::MemoryBackend;

/// Everything the entry-point needs to run the server and its background
/// tasks.
pub struct Services {
    /// Store backend; kept around for seeding.
    pub backend: MemoryBackend,
    /// User directory; kept around for seeding.
    pub directory: Arc<MemoryUserDirectory>,
    /// Booking workflows, shared between HTTP and the sweep task.
    pub bookings: Arc<BookingService>,
    /// Wallet workflows.
    pub wallets: Arc<WalletService>,
}

impl Services {
    /// HTTP handler state over these services.
    pub fn http_state(&self) -> HttpState {
        HttpState::new(self.bookings.clone(), self.wallets.clone())
    }
}

/// Builds the adapter stack and the domain services from configuration.
pub fn build_services(config: &ServerConfig) -> Services {
    let backend = MemoryBackend::new();
    let directory = Arc::new(MemoryUserDirectory::new());
    let clock = Arc::new(DefaultClock);
    let factory = Arc::new(backend.clone());

    let bookings = Arc::new(BookingService::new(
        factory.clone(),
        directory.clone(),
        Arc::new(TracingNotificationSink),
        clock.clone(),
        BookingPolicy {
            confirmation_fee: config.confirmation_fee,
        },
    ));
    let wallets = Arc::new(WalletService::new(factory, clock));

    Services {
        backend,
        directory,
        bookings,
        wallets,
    }
}

/// Seeds a demonstration owner, property, and funded client wallet so the
/// API is explorable out of the box. The generated identifiers are logged.
pub fn seed_demo_data(services: &Services) {
    let Ok(currency) = CurrencyCode::try_new("EUR") else {
        return;
    };
    let Ok(nightly_rate) = Money::try_new(Decimal::from(100), currency.clone()) else {
        return;
    };
    let Ok(opening_balance) = Money::try_new(Decimal::from(500), currency) else {
        return;
    };

    let owner = UserProfile {
        id: UserId::random(),
        display_name: "Demo Owner".into(),
        phone_number: "+49 30 123456".into(),
    };
    services.directory.upsert(owner.clone());

    let property = Property::new(
        Uuid::new_v4(),
        owner.id,
        nightly_rate,
        None,
        ContactPolicy::OwnerPhoneShared,
    );
    let property_id = property.id();
    services.backend.seed_property(property);

    let client = UserId::random();
    services
        .backend
        .seed_wallet(Wallet::new(Uuid::new_v4(), client, opening_balance));

    info!(
        owner_id = %owner.id,
        property_id = %property_id,
        client_id = %client,
        "demo data seeded",
    );
}
