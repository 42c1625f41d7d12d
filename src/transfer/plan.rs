//! Execution decision table
//!
//! | mode       | source | target | funds        | scenario            | steps                                   |
//! |------------|--------|--------|--------------|---------------------|-----------------------------------------|
//! | atomic     | any    | any    | not checked  | `Atomic`            | withdraw!, deposit!                     |
//! | non-atomic | absent | any    | -            | `MissingSource`     | withdraw (record only, fail)            |
//! | non-atomic | exists | absent | -            | `MissingTarget`     | withdraw, deposit (record only, fail)   |
//! | non-atomic | exists | exists | `< amount`   | `InsufficientFunds` | deposit, withdraw                       |
//! | non-atomic | exists | exists | `>= amount`  | `Funded`            | withdraw, deposit                       |
//!
//! `!` marks a step that fails with `AccountNotFound` when no row matched.
//! Rows are evaluated top to bottom; the first match wins.

use serde::Serialize;
use utoipa::ToSchema;

use super::types::StatementKind;
use crate::account::Balance;
use StatementKind::{Deposit, Withdraw};
use Step::{Checked, RecordOnly, Unchecked};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    Atomic,
    MissingSource,
    MissingTarget,
    InsufficientFunds,
    Funded,
}

/// How a statement is carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Execute; zero rows affected aborts with `AccountNotFound`
    Checked(StatementKind),
    /// Execute; rows affected is ignored
    Unchecked(StatementKind),
    /// Record without executing, then abort with `AccountNotFound`
    RecordOnly(StatementKind),
}

impl Step {
    pub fn kind(self) -> StatementKind {
        match self {
            Step::Checked(k) | Step::Unchecked(k) | Step::RecordOnly(k) => k,
        }
    }
}

impl Scenario {
    /// First three rows of the table. `None` means both accounts exist in
    /// non-atomic mode and the choice depends on the source balance, see
    /// [`Scenario::by_balance`].
    pub fn select(atomic: bool, from_exists: bool, to_exists: bool) -> Option<Scenario> {
        match (atomic, from_exists, to_exists) {
            (true, _, _) => Some(Scenario::Atomic),
            (false, false, _) => Some(Scenario::MissingSource),
            (false, true, false) => Some(Scenario::MissingTarget),
            (false, true, true) => None,
        }
    }

    /// Last two rows of the table
    pub fn by_balance(balance: Balance, amount: Balance) -> Scenario {
        if balance < amount {
            Scenario::InsufficientFunds
        } else {
            Scenario::Funded
        }
    }

    pub fn steps(self) -> &'static [Step] {
        match self {
            Scenario::Atomic => &[Checked(Withdraw), Checked(Deposit)],
            Scenario::MissingSource => &[RecordOnly(Withdraw)],
            Scenario::MissingTarget => &[Unchecked(Withdraw), RecordOnly(Deposit)],
            Scenario::InsufficientFunds => &[Unchecked(Deposit), Unchecked(Withdraw)],
            Scenario::Funded => &[Unchecked(Withdraw), Unchecked(Deposit)],
        }
    }
}
