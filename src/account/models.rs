//! Account data model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Primary key of the `accounts` table
pub type AccountId = i32;

/// Integer balance. May go negative; nothing in the store enforces a floor.
pub type Balance = i64;

/// Balance every baseline account starts with after a reset
pub const BASELINE_BALANCE: Balance = 1000;

/// Accounts recreated by a reset, in id order
pub const BASELINE: [Account; 2] = [
    Account {
        id: 1,
        balance: BASELINE_BALANCE,
    },
    Account {
        id: 2,
        balance: BASELINE_BALANCE,
    },
];

/// One row of the `accounts` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Account {
    #[schema(example = 1)]
    pub id: AccountId,
    #[schema(example = 1000)]
    pub balance: Balance,
}

impl Account {
    pub fn new(id: AccountId, balance: Balance) -> Self {
        Self { id, balance }
    }
}

/// Balance of `id` within a snapshot, if present
pub fn balance_of(snapshot: &[Account], id: AccountId) -> Option<Balance> {
    snapshot.iter().find(|a| a.id == id).map(|a| a.balance)
}

/// Sum of all balances in a snapshot
pub fn total_balance(snapshot: &[Account]) -> Balance {
    snapshot.iter().map(|a| a.balance).sum()
}
