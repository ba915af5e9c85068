//! End-to-end coverage of the booking lifecycle over the full service stack.
//!
//! These tests exercise the real services against the in-memory backend,
//! checking the money and state invariants the workflows promise: the fee is
//! charged exactly once, every movement has exactly one ledger entry, and a
//! failed confirmation leaves no partial state behind.

use std::sync::Arc;

use backend::domain::money::{CurrencyCode, Money};
use backend::domain::ports::{TxScope, UnitOfWorkFactory};
use backend::domain::property::{ContactPolicy, Property};
use backend::domain::user::{UserId, UserProfile};
use backend::domain::wallet::{LedgerDirection, Wallet};
use backend::domain::{
    BookingPolicy, BookingService, BookingStatus, ReserveBookingRequest, WalletService,
    WorkflowError,
};
use backend::outbound::directory::MemoryUserDirectory;
use backend::outbound::notify::RecordingNotificationSink;
use backend::outbound::persistence::MemoryBackend;
use backend::test_support::MutableClock;
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

struct Stack {
    backend: MemoryBackend,
    bookings: BookingService,
    wallets: WalletService,
    sink: Arc<RecordingNotificationSink>,
    clock: Arc<MutableClock>,
    owner: UserProfile,
    property_id: Uuid,
}

fn eur(amount: Decimal) -> Money {
    Money::try_new(amount, CurrencyCode::try_new("EUR").expect("valid code"))
        .expect("non-negative amount")
}

fn june(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).single().expect("valid date")
}

#[fixture]
fn stack() -> Stack {
    let backend = MemoryBackend::new();
    let sink = Arc::new(RecordingNotificationSink::new());
    let clock = Arc::new(MutableClock::new(june(1)));
    let directory = Arc::new(MemoryUserDirectory::new());

    let owner = UserProfile {
        id: UserId::random(),
        display_name: "Margot the Host".into(),
        phone_number: "+33 1 23 45 67 89".into(),
    };
    directory.upsert(owner.clone());

    let property = Property::new(
        Uuid::new_v4(),
        owner.id,
        eur(dec!(100)),
        None,
        ContactPolicy::OwnerPhoneShared,
    );
    let property_id = property.id();
    backend.seed_property(property);

    let factory = Arc::new(backend.clone());
    let bookings = BookingService::new(
        factory.clone(),
        directory,
        sink.clone(),
        clock.clone(),
        BookingPolicy {
            confirmation_fee: dec!(50),
        },
    );
    let wallets = WalletService::new(factory, clock.clone());

    Stack {
        backend,
        bookings,
        wallets,
        sink,
        clock,
        owner,
        property_id,
    }
}

impl Stack {
    fn seed_client(&self, balance: Decimal) -> UserId {
        let client = UserId::random();
        self.backend
            .seed_wallet(Wallet::new(Uuid::new_v4(), client, eur(balance)));
        client
    }

    async fn reserve(&self, client: UserId, start_day: u32, end_day: u32) -> Uuid {
        self.bookings
            .reserve(ReserveBookingRequest {
                client_id: client,
                property_id: self.property_id,
                guest_name: "Ada Lovelace".into(),
                phone_number: "+44 20 7946 0000".into(),
                start: june(start_day),
                end: june(end_day),
            })
            .await
            .expect("reservation succeeds")
            .id()
    }

    async fn status_of(&self, booking_id: Uuid) -> BookingStatus {
        self.bookings
            .get(booking_id)
            .await
            .expect("booking exists")
            .status()
    }
}

#[rstest]
#[tokio::test]
async fn full_lifecycle_from_reservation_to_completion(stack: Stack) {
    let client = stack.seed_client(dec!(0));
    stack
        .wallets
        .add_funds(client, eur(dec!(80)))
        .await
        .expect("top-up succeeds");

    let booking_id = stack.reserve(client, 10, 14).await;
    assert_eq!(stack.status_of(booking_id).await, BookingStatus::Pending);

    stack
        .bookings
        .confirm(booking_id)
        .await
        .expect("confirmation succeeds");
    assert_eq!(stack.status_of(booking_id).await, BookingStatus::Confirmed);

    // 80 top-up minus the 50 fee, with one ledger entry per movement.
    let wallet = stack.wallets.wallet_of(client).await.expect("wallet readable");
    assert_eq!(wallet.balance().amount(), dec!(30));
    let entries = stack.wallets.ledger_of(client).await.expect("ledger readable");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].direction(), LedgerDirection::Credit);
    assert_eq!(entries[1].direction(), LedgerDirection::Debit);
    assert_eq!(entries[1].amount(), &eur(dec!(50)));

    // Once the stay is over, the sweep closes it out.
    stack.clock.advance_days(20);
    let completed = stack
        .bookings
        .sweep_completions()
        .await
        .expect("sweep succeeds");
    assert_eq!(completed, 1);
    assert_eq!(stack.status_of(booking_id).await, BookingStatus::Completed);
}

#[rstest]
#[tokio::test]
async fn concurrent_confirmations_elect_exactly_one_winner(stack: Stack) {
    let first = stack.seed_client(dec!(200));
    let second = stack.seed_client(dec!(200));
    let a = stack.reserve(first, 10, 14).await;
    let b = stack.reserve(second, 12, 16).await;

    let service_a = stack.bookings.clone();
    let service_b = stack.bookings.clone();
    let (result_a, result_b) = tokio::join!(
        tokio::spawn(async move { service_a.confirm(a).await }),
        tokio::spawn(async move { service_b.confirm(b).await }),
    );
    let result_a = result_a.expect("task completes");
    let result_b = result_b.expect("task completes");

    assert_ne!(
        result_a.is_ok(),
        result_b.is_ok(),
        "exactly one confirmation must win",
    );

    let status_a = stack.status_of(a).await;
    let status_b = stack.status_of(b).await;
    let statuses = (status_a, status_b);
    assert!(
        statuses == (BookingStatus::Confirmed, BookingStatus::Rejected)
            || statuses == (BookingStatus::Rejected, BookingStatus::Confirmed),
        "one booking confirmed, the other auto-rejected: {statuses:?}",
    );

    // Only the winner paid the fee.
    let balance_a = stack
        .wallets
        .wallet_of(first)
        .await
        .expect("wallet readable")
        .balance()
        .amount();
    let balance_b = stack
        .wallets
        .wallet_of(second)
        .await
        .expect("wallet readable")
        .balance()
        .amount();
    let mut charged: Vec<Decimal> = vec![balance_a, balance_b];
    charged.sort();
    assert_eq!(charged, vec![dec!(150), dec!(200)]);
}

#[rstest]
#[tokio::test]
async fn failed_confirmation_leaves_no_partial_state(stack: Stack) {
    let rich = stack.seed_client(dec!(200));
    let poor = stack.seed_client(dec!(10));

    let doomed = stack.reserve(poor, 10, 14).await;
    let rival = stack.reserve(rich, 12, 16).await;

    let err = stack
        .bookings
        .confirm(doomed)
        .await
        .expect_err("fee exceeds balance");
    assert!(matches!(err, WorkflowError::Ledger(_)));

    // The failed confirmation neither blocked the dates nor rejected the
    // rival, so the rival can still be confirmed.
    assert_eq!(stack.status_of(doomed).await, BookingStatus::Pending);
    stack
        .bookings
        .confirm(rival)
        .await
        .expect("rival confirmation succeeds");
    assert_eq!(stack.status_of(rival).await, BookingStatus::Confirmed);
    assert_eq!(stack.status_of(doomed).await, BookingStatus::Rejected);

    // The poor client's wallet never moved.
    let untouched = stack.wallets.wallet_of(poor).await.expect("wallet readable");
    assert_eq!(untouched.balance().amount(), dec!(10));
    assert!(stack
        .wallets
        .ledger_of(poor)
        .await
        .expect("ledger readable")
        .is_empty());
}

#[rstest]
#[tokio::test]
async fn confirmation_notifies_winner_and_losers(stack: Stack) {
    let winner = stack.seed_client(dec!(200));
    let loser = stack.seed_client(dec!(200));
    let a = stack.reserve(winner, 10, 14).await;
    let _b = stack.reserve(loser, 12, 16).await;

    stack.bookings.confirm(a).await.expect("confirmation succeeds");

    let recipients: Vec<UserId> = stack.sink.sent().iter().map(|n| n.recipient).collect();
    // Two reservation notices to the owner, then the confirmation to the
    // winner and the conflict notice to the loser.
    assert_eq!(
        recipients,
        vec![stack.owner.id, stack.owner.id, winner, loser],
    );

    // A read-only transaction confirms the dates are now blocked.
    let read = stack
        .backend
        .begin(TxScope::ReadOnly)
        .await
        .expect("begin succeeds");
    let property = read
        .properties()
        .get_by_id(stack.property_id)
        .await
        .expect("read succeeds")
        .expect("property seeded");
    assert!(!property.is_available_for(
        &backend::domain::DateRange::new(june(10), june(14)).expect("valid range"),
    ));
}
