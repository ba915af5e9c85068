//! In-memory transactional store backend.
//!
//! [`MemoryBackend`] implements [`UnitOfWorkFactory`] over process-local
//! state. Transactions stage their mutations in a buffer and apply it
//! atomically under a single write lock at commit; a transaction dropped
//! without committing leaves no trace. Mutating scopes additionally hold an
//! advisory [`tokio::sync::Mutex`] keyed by [`TxScope`] for the life of the
//! unit of work, so two workflows over the same property or wallet owner
//! serialise instead of interleaving. Wallet updates are checked against the
//! version they were loaded with; a lost race surfaces as
//! [`UnitOfWorkError::Conflict`].

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::date_range::DateRange;
use crate::domain::ports::{
    BookingStore, LedgerStore, PropertyStore, StoreError, TxScope, UnitOfWork, UnitOfWorkError,
    UnitOfWorkFactory, WalletStore,
};
use crate::domain::property::Property;
use crate::domain::user::UserId;
use crate::domain::wallet::{LedgerEntry, Wallet};

#[derive(Debug, Default)]
struct State {
    bookings: HashMap<Uuid, Booking>,
    properties: HashMap<Uuid, Property>,
    wallets: HashMap<Uuid, Wallet>,
    ledger: Vec<LedgerEntry>,
}

/// Mutations staged by one unit of work, applied wholesale at commit.
#[derive(Debug, Default)]
struct TxBuffer {
    bookings: HashMap<Uuid, Booking>,
    removed_bookings: HashSet<Uuid>,
    unavailable_appends: Vec<(Uuid, DateRange)>,
    // Staged wallets carry the version they were loaded with; commit
    // refuses to apply over a newer one.
    wallets: HashMap<Uuid, Wallet>,
    ledger: Vec<LedgerEntry>,
}

/// Process-local store backend.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<RwLock<State>>,
    locks: Arc<StdMutex<HashMap<TxScope, Arc<AsyncMutex<()>>>>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property directly, bypassing any transaction. Seeding and
    /// test setup only.
    pub fn seed_property(&self, property: Property) {
        if let Ok(mut state) = self.state.write() {
            state.properties.insert(property.id(), property);
        }
    }

    /// Inserts a wallet directly, bypassing any transaction. Seeding and
    /// test setup only.
    pub fn seed_wallet(&self, wallet: Wallet) {
        if let Ok(mut state) = self.state.write() {
            state.wallets.insert(wallet.id(), wallet);
        }
    }

    /// Inserts a booking directly, bypassing any transaction. Seeding and
    /// test setup only.
    pub fn seed_booking(&self, booking: Booking) {
        if let Ok(mut state) = self.state.write() {
            state.bookings.insert(booking.id(), booking);
        }
    }

    async fn advisory_lock(&self, scope: TxScope) -> Result<OwnedMutexGuard<()>, UnitOfWorkError> {
        let lock = {
            let mut registry = self
                .locks
                .lock()
                .map_err(|_| StoreError::connection("lock registry poisoned"))?;
            Arc::clone(registry.entry(scope).or_default())
        };
        Ok(lock.lock_owned().await)
    }
}

#[async_trait]
impl UnitOfWorkFactory for MemoryBackend {
    async fn begin(&self, scope: TxScope) -> Result<Box<dyn UnitOfWork>, UnitOfWorkError> {
        let guard = match scope {
            TxScope::ReadOnly => None,
            TxScope::Property(_) | TxScope::WalletOwner(_) => {
                Some(self.advisory_lock(scope).await?)
            }
        };
        let shared = Shared {
            state: Arc::clone(&self.state),
            buffer: Arc::new(StdMutex::new(TxBuffer::default())),
        };
        Ok(Box::new(MemoryUnitOfWork {
            bookings: MemoryBookingStore(shared.clone()),
            properties: MemoryPropertyStore(shared.clone()),
            wallets: MemoryWalletStore(shared.clone()),
            ledger: MemoryLedgerStore(shared.clone()),
            shared,
            _guard: guard,
        }))
    }
}

/// State handle shared by one unit of work and its store views.
#[derive(Clone)]
struct Shared {
    state: Arc<RwLock<State>>,
    buffer: Arc<StdMutex<TxBuffer>>,
}

impl Shared {
    fn with_state<T>(&self, read: impl FnOnce(&State) -> T) -> Result<T, StoreError> {
        let state = self
            .state
            .read()
            .map_err(|_| StoreError::connection("state lock poisoned"))?;
        Ok(read(&state))
    }

    fn with_buffer<T>(&self, access: impl FnOnce(&mut TxBuffer) -> T) -> Result<T, StoreError> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| StoreError::connection("transaction buffer poisoned"))?;
        Ok(access(&mut buffer))
    }

    /// Reads a booking as this transaction sees it: staged copy first, then
    /// committed state, honouring staged removals.
    fn booking(&self, booking_id: Uuid) -> Result<Option<Booking>, StoreError> {
        let staged = self.with_buffer(|buffer| {
            if buffer.removed_bookings.contains(&booking_id) {
                return Some(None);
            }
            buffer.bookings.get(&booking_id).cloned().map(Some)
        })?;
        if let Some(resolved) = staged {
            return Ok(resolved);
        }
        self.with_state(|state| state.bookings.get(&booking_id).cloned())
    }

    /// Merges committed and staged bookings, staged winning, removals
    /// excluded.
    fn merged_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let mut merged: HashMap<Uuid, Booking> =
            self.with_state(|state| state.bookings.clone())?;
        self.with_buffer(|buffer| {
            for (id, booking) in &buffer.bookings {
                merged.insert(*id, booking.clone());
            }
            for removed in &buffer.removed_bookings {
                merged.remove(removed);
            }
        })?;
        Ok(merged.into_values().collect())
    }

    /// Reads a property with this transaction's staged unavailable-range
    /// appends applied.
    fn property(&self, property_id: Uuid) -> Result<Option<Property>, StoreError> {
        let Some(mut property) =
            self.with_state(|state| state.properties.get(&property_id).cloned())?
        else {
            return Ok(None);
        };
        self.with_buffer(|buffer| {
            for (id, range) in &buffer.unavailable_appends {
                if *id == property_id {
                    property.mark_unavailable(*range);
                }
            }
        })?;
        Ok(Some(property))
    }

    fn wallet_by(
        &self,
        matches: impl Fn(&Wallet) -> bool,
    ) -> Result<Option<Wallet>, StoreError> {
        let staged =
            self.with_buffer(|buffer| buffer.wallets.values().find(|w| matches(w)).cloned())?;
        if staged.is_some() {
            return Ok(staged);
        }
        self.with_state(|state| state.wallets.values().find(|w| matches(w)).cloned())
    }
}

struct MemoryUnitOfWork {
    shared: Shared,
    bookings: MemoryBookingStore,
    properties: MemoryPropertyStore,
    wallets: MemoryWalletStore,
    ledger: MemoryLedgerStore,
    // Held for the whole transaction; released on drop, commit or not.
    _guard: Option<OwnedMutexGuard<()>>,
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    fn bookings(&self) -> &dyn BookingStore {
        &self.bookings
    }

    fn properties(&self) -> &dyn PropertyStore {
        &self.properties
    }

    fn wallets(&self) -> &dyn WalletStore {
        &self.wallets
    }

    fn ledger(&self) -> &dyn LedgerStore {
        &self.ledger
    }

    async fn commit(self: Box<Self>) -> Result<(), UnitOfWorkError> {
        let buffer = self
            .shared
            .buffer
            .lock()
            .map_err(|_| StoreError::connection("transaction buffer poisoned"))?;
        let mut state = self
            .shared
            .state
            .write()
            .map_err(|_| StoreError::connection("state lock poisoned"))?;

        // Validate before applying anything: the commit is all or nothing.
        for (wallet_id, staged) in &buffer.wallets {
            let current = state.wallets.get(wallet_id).map(Wallet::version);
            if current != Some(staged.version()) {
                return Err(UnitOfWorkError::conflict(format!(
                    "wallet {wallet_id} changed since it was read",
                )));
            }
        }
        for (property_id, _) in &buffer.unavailable_appends {
            if !state.properties.contains_key(property_id) {
                return Err(StoreError::query(format!("property {property_id} not found")).into());
            }
        }

        for (id, booking) in &buffer.bookings {
            state.bookings.insert(*id, booking.clone());
        }
        for removed in &buffer.removed_bookings {
            state.bookings.remove(removed);
        }
        for (property_id, range) in &buffer.unavailable_appends {
            if let Some(property) = state.properties.get_mut(property_id) {
                property.mark_unavailable(*range);
            }
        }
        for (wallet_id, staged) in &buffer.wallets {
            let bumped = Wallet::from_parts(
                staged.id(),
                staged.owner_id(),
                staged.balance().clone(),
                staged.version() + 1,
            );
            state.wallets.insert(*wallet_id, bumped);
        }
        state.ledger.extend(buffer.ledger.iter().cloned());

        Ok(())
    }
}

struct MemoryBookingStore(Shared);

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn get_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, StoreError> {
        self.0.booking(booking_id)
    }

    async fn get_overlapping(
        &self,
        property_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<Booking>, StoreError> {
        let mut found: Vec<Booking> = self
            .0
            .merged_bookings()?
            .into_iter()
            .filter(|b| b.property_id() == property_id && b.range().overlaps(&range))
            .collect();
        found.sort_by_key(Booking::reserved_at);
        Ok(found)
    }

    async fn get_confirmed_ending_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Booking>, StoreError> {
        let mut found: Vec<Booking> = self
            .0
            .merged_bookings()?
            .into_iter()
            .filter(|b| b.status() == BookingStatus::Confirmed && b.range().ended_by(cutoff))
            .collect();
        found.sort_by_key(Booking::reserved_at);
        Ok(found)
    }

    async fn add(&self, booking: &Booking) -> Result<(), StoreError> {
        let booking = booking.clone();
        self.0.with_buffer(|buffer| {
            buffer.removed_bookings.remove(&booking.id());
            buffer.bookings.insert(booking.id(), booking);
        })
    }

    async fn update(&self, booking: &Booking) -> Result<(), StoreError> {
        let booking = booking.clone();
        self.0
            .with_buffer(|buffer| buffer.bookings.insert(booking.id(), booking))?;
        Ok(())
    }

    async fn remove(&self, booking_id: Uuid) -> Result<(), StoreError> {
        self.0.with_buffer(|buffer| {
            buffer.bookings.remove(&booking_id);
            buffer.removed_bookings.insert(booking_id);
        })?;
        Ok(())
    }
}

struct MemoryPropertyStore(Shared);

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn get_by_id(&self, property_id: Uuid) -> Result<Option<Property>, StoreError> {
        self.0.property(property_id)
    }

    async fn append_unavailable_range(
        &self,
        property_id: Uuid,
        range: DateRange,
    ) -> Result<(), StoreError> {
        if self.0.property(property_id)?.is_none() {
            return Err(StoreError::query(format!("property {property_id} not found")));
        }
        self.0
            .with_buffer(|buffer| buffer.unavailable_appends.push((property_id, range)))
    }
}

struct MemoryWalletStore(Shared);

#[async_trait]
impl WalletStore for MemoryWalletStore {
    async fn get_by_user_id(&self, user_id: UserId) -> Result<Option<Wallet>, StoreError> {
        self.0.wallet_by(|wallet| wallet.owner_id() == user_id)
    }

    async fn get_by_id(&self, wallet_id: Uuid) -> Result<Option<Wallet>, StoreError> {
        self.0.wallet_by(|wallet| wallet.id() == wallet_id)
    }

    async fn update(&self, wallet: &Wallet) -> Result<(), StoreError> {
        let wallet = wallet.clone();
        self.0
            .with_buffer(|buffer| buffer.wallets.insert(wallet.id(), wallet))?;
        Ok(())
    }
}

struct MemoryLedgerStore(Shared);

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn append(&self, entry: &LedgerEntry) -> Result<(), StoreError> {
        let entry = entry.clone();
        self.0.with_buffer(|buffer| buffer.ledger.push(entry))
    }

    async fn list_for_wallet(&self, wallet_id: Uuid) -> Result<Vec<LedgerEntry>, StoreError> {
        let mut entries: Vec<LedgerEntry> = self.0.with_state(|state| {
            state
                .ledger
                .iter()
                .filter(|entry| entry.wallet_id() == wallet_id)
                .cloned()
                .collect()
        })?;
        self.0.with_buffer(|buffer| {
            entries.extend(
                buffer
                    .ledger
                    .iter()
                    .filter(|entry| entry.wallet_id() == wallet_id)
                    .cloned(),
            );
        })?;
        Ok(entries)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
