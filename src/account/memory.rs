//! In-memory account store
//!
//! Behaves like the PostgreSQL store at read committed: autocommit outside a
//! transaction, staged deltas inside one that are replayed onto the shared
//! map on commit. Faults can be injected per operation to exercise the
//! engine's failure paths.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::StoreError;
use super::models::{Account, AccountId, BASELINE, Balance};
use super::store::{AccountSession, AccountStore};

/// Store operation a fault can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPoint {
    Acquire,
    GetAll,
    Exists,
    GetBalance,
    ApplyDelta,
    Reset,
    Begin,
    Commit,
    Rollback,
}

#[derive(Debug)]
struct Fault {
    point: FaultPoint,
    /// Calls at `point` to let through before failing
    skip: usize,
}

#[derive(Default)]
struct Shared {
    accounts: Mutex<BTreeMap<AccountId, Balance>>,
    faults: Mutex<Vec<Fault>>,
}

/// Mutex-guarded map implementing [`AccountStore`]
#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    shared: Arc<Shared>,
}

impl MemoryAccountStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the reset baseline
    pub fn with_baseline() -> Self {
        Self::with_accounts(BASELINE)
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.shared.accounts.lock() {
            map.extend(accounts.into_iter().map(|a| (a.id, a.balance)));
        }
        store
    }

    /// Fail the next call at `point`
    pub fn inject_fault(&self, point: FaultPoint) {
        self.inject_fault_after(point, 0);
    }

    /// Let `skip` calls at `point` succeed, then fail the one after
    pub fn inject_fault_after(&self, point: FaultPoint, skip: usize) {
        if let Ok(mut faults) = self.shared.faults.lock() {
            faults.push(Fault { point, skip });
        }
    }

    /// Committed accounts, ordered by id
    pub fn snapshot(&self) -> Vec<Account> {
        self.shared
            .accounts
            .lock()
            .map(|map| to_accounts(&map))
            .unwrap_or_default()
    }
}

impl Shared {
    fn check(&self, point: FaultPoint) -> Result<(), StoreError> {
        let mut faults = self.faults.lock().map_err(poisoned)?;
        if let Some(pos) = faults.iter().position(|f| f.point == point) {
            if faults[pos].skip == 0 {
                faults.remove(pos);
                return Err(StoreError::Unavailable(format!(
                    "injected fault at {:?}",
                    point
                )));
            }
            faults[pos].skip -= 1;
        }
        Ok(())
    }

    fn accounts(&self) -> Result<MutexGuard<'_, BTreeMap<AccountId, Balance>>, StoreError> {
        self.accounts.lock().map_err(poisoned)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_string())
}

fn to_accounts(map: &BTreeMap<AccountId, Balance>) -> Vec<Account> {
    map.iter().map(|(&id, &balance)| Account { id, balance }).collect()
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn acquire(&self) -> Result<Box<dyn AccountSession>, StoreError> {
        self.shared.check(FaultPoint::Acquire)?;
        Ok(Box::new(MemorySession {
            shared: self.shared.clone(),
            pending: None,
        }))
    }
}

/// Session over a [`MemoryAccountStore`]
pub struct MemorySession {
    shared: Arc<Shared>,
    /// Deltas staged while a transaction is open, replayed on commit
    pending: Option<Vec<(AccountId, Balance)>>,
}

impl MemorySession {
    /// Committed state with this session's staged deltas on top
    fn view(&self) -> Result<BTreeMap<AccountId, Balance>, StoreError> {
        let mut map = self.shared.accounts()?.clone();
        if let Some(pending) = &self.pending {
            apply_deltas(&mut map, pending)?;
        }
        Ok(map)
    }
}

fn checked_balance(id: AccountId, balance: Balance, delta: Balance) -> Result<Balance, StoreError> {
    balance.checked_add(delta).ok_or(StoreError::OutOfRange(id))
}

/// Apply all deltas or none. Rows missing from `map` are skipped.
fn apply_deltas(
    map: &mut BTreeMap<AccountId, Balance>,
    deltas: &[(AccountId, Balance)],
) -> Result<(), StoreError> {
    let mut staged = BTreeMap::new();
    for &(id, delta) in deltas {
        if let Some(balance) = staged.get(&id).or_else(|| map.get(&id)).copied() {
            staged.insert(id, checked_balance(id, balance, delta)?);
        }
    }
    map.extend(staged);
    Ok(())
}

#[async_trait]
impl AccountSession for MemorySession {
    async fn get_all(&mut self) -> Result<Vec<Account>, StoreError> {
        self.shared.check(FaultPoint::GetAll)?;
        Ok(to_accounts(&self.view()?))
    }

    async fn exists(&mut self, id: AccountId) -> Result<bool, StoreError> {
        self.shared.check(FaultPoint::Exists)?;
        Ok(self.shared.accounts()?.contains_key(&id))
    }

    async fn get_balance(&mut self, id: AccountId) -> Result<Balance, StoreError> {
        self.shared.check(FaultPoint::GetBalance)?;
        self.view()?.get(&id).copied().ok_or(StoreError::NotFound(id))
    }

    async fn apply_delta(&mut self, id: AccountId, delta: Balance) -> Result<u64, StoreError> {
        self.shared.check(FaultPoint::ApplyDelta)?;
        if self.pending.is_some() {
            let Some(&balance) = self.view()?.get(&id) else {
                return Ok(0);
            };
            checked_balance(id, balance, delta)?;
            if let Some(pending) = self.pending.as_mut() {
                pending.push((id, delta));
            }
            return Ok(1);
        }

        let mut accounts = self.shared.accounts()?;
        match accounts.get_mut(&id) {
            Some(balance) => {
                *balance = checked_balance(id, *balance, delta)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn reset_all(&mut self) -> Result<(), StoreError> {
        if self.pending.is_some() {
            return Err(StoreError::TransactionInProgress);
        }
        self.shared.check(FaultPoint::Reset)?;
        let mut accounts = self.shared.accounts()?;
        accounts.clear();
        accounts.extend(BASELINE.iter().map(|a| (a.id, a.balance)));
        Ok(())
    }

    async fn begin(&mut self) -> Result<(), StoreError> {
        if self.pending.is_some() {
            return Err(StoreError::TransactionInProgress);
        }
        self.shared.check(FaultPoint::Begin)?;
        self.pending = Some(Vec::new());
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        if self.pending.is_none() {
            return Err(StoreError::NoTransaction);
        }
        self.shared.check(FaultPoint::Commit)?;
        if let Some(pending) = self.pending.take() {
            apply_deltas(&mut *self.shared.accounts()?, &pending)?;
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), StoreError> {
        if self.pending.is_none() {
            return Err(StoreError::NoTransaction);
        }
        self.shared.check(FaultPoint::Rollback)?;
        self.pending = None;
        Ok(())
    }
}
