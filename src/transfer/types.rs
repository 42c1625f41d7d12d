//! Transfer request, statement log and report types

use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use super::error::{ErrorKind, TransferError};
use super::plan::Scenario;
use crate::account::{Account, AccountId, Balance};

/// Engine input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Balance,
    /// Wrap both updates in one transaction
    pub atomic: bool,
}

impl TransferRequest {
    pub fn new(from: AccountId, to: AccountId, amount: Balance, atomic: bool) -> Self {
        Self {
            from,
            to,
            amount,
            atomic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Withdraw,
    Deposit,
}

/// One balance update, as attempted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub kind: StatementKind,
    pub account: AccountId,
    pub amount: Balance,
    /// The update reached the store and matched a row
    pub applied: bool,
}

impl Statement {
    pub fn new(kind: StatementKind, account: AccountId, amount: Balance) -> Self {
        Self {
            kind,
            account,
            amount,
            applied: false,
        }
    }

    /// Signed change this statement makes to its account
    pub fn delta(&self) -> Balance {
        match self.kind {
            StatementKind::Withdraw => -self.amount,
            StatementKind::Deposit => self.amount,
        }
    }

    /// SQL text equivalent, with literal values
    pub fn sql(&self) -> String {
        let op = match self.kind {
            StatementKind::Withdraw => '-',
            StatementKind::Deposit => '+',
        };
        format!(
            "UPDATE accounts SET balance = balance {} {} WHERE id = {}",
            op, self.amount, self.account
        )
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StatementKind::Withdraw => write!(f, "withdraw {} from {}", self.amount, self.account),
            StatementKind::Deposit => write!(f, "deposit {} to {}", self.amount, self.account),
        }
    }
}

/// Result of one transfer call
#[derive(Debug, Clone)]
pub struct TransferReport {
    pub request_id: Uuid,
    pub atomic: bool,
    /// Decision table row taken; `None` if the call failed before choosing
    pub scenario: Option<Scenario>,
    /// All accounts at call entry, by id
    pub before_state: Vec<Account>,
    /// All accounts at call exit, by id
    pub after_state: Vec<Account>,
    /// Statements in attempt order, including the one that failed
    pub statements: Vec<Statement>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl TransferReport {
    pub fn new(request_id: Uuid, atomic: bool) -> Self {
        Self {
            request_id,
            atomic,
            scenario: None,
            before_state: Vec::new(),
            after_state: Vec::new(),
            statements: Vec::new(),
            error: None,
            error_kind: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Human-readable statement log
    pub fn statement_texts(&self) -> Vec<String> {
        self.statements.iter().map(|s| s.to_string()).collect()
    }

    /// Record `err` unless an earlier error is already recorded
    pub(crate) fn record_error(&mut self, err: &TransferError) {
        if self.error.is_none() {
            self.error = Some(err.to_string());
            self.error_kind = Some(err.kind());
        }
    }
}
