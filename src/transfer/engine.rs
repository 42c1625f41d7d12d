//! Transfer Engine
//!
//! Runs one transfer per call on one exclusive session:
//!
//! ```text
//! snapshot before → probe accounts → [BEGIN] → run decision table row
//!     → on error: record it, [ROLLBACK]      → snapshot after → report
//! ```
//!
//! Business and store errors never escape `transfer`; they are folded into the
//! report. Only a non-positive amount or failing to check out a session is
//! returned as `Err`.

use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::error::TransferError;
use super::plan::{Scenario, Step};
use super::types::{Statement, StatementKind, TransferReport, TransferRequest};
use crate::account::{Account, AccountSession, AccountStore, StoreError};

/// Executes transfers against an injected [`AccountStore`]
#[derive(Clone)]
pub struct TransferEngine {
    store: Arc<dyn AccountStore>,
}

impl TransferEngine {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Move `amount` from `req.from` to `req.to`.
    ///
    /// `from == to` is accepted and runs the same sequence.
    pub async fn transfer(&self, req: TransferRequest) -> Result<TransferReport, TransferError> {
        if req.amount <= 0 {
            return Err(TransferError::InvalidAmount(req.amount));
        }

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "transfer",
            %request_id,
            from = req.from,
            to = req.to,
            amount = req.amount,
            atomic = req.atomic,
        );

        async move {
            let mut session = self.store.acquire().await.map_err(|e| {
                tracing::error!(store = self.store.name(), error = %e, "Failed to acquire session");
                TransferError::Store(e)
            })?;

            let mut run = Execution::new(req, TransferReport::new(request_id, req.atomic));
            run.execute(session.as_mut()).await;

            let report = run.report;
            match &report.error {
                None => tracing::info!(scenario = ?report.scenario, "Transfer completed"),
                Some(error) => {
                    tracing::warn!(scenario = ?report.scenario, %error, "Transfer failed")
                }
            }
            Ok(report)
        }
        .instrument(span)
        .await
    }

    /// Restore the baseline accounts and return them
    pub async fn reset(&self) -> Result<Vec<Account>, StoreError> {
        let mut session = self.store.acquire().await?;
        session.reset_all().await?;
        let accounts = session.get_all().await?;
        tracing::info!(count = accounts.len(), "Accounts reset to baseline");
        Ok(accounts)
    }

    /// Current accounts, by id
    pub async fn accounts(&self) -> Result<Vec<Account>, StoreError> {
        let mut session = self.store.acquire().await?;
        session.get_all().await
    }
}

/// State of one in-flight transfer
struct Execution {
    req: TransferRequest,
    report: TransferReport,
    in_transaction: bool,
}

impl Execution {
    fn new(req: TransferRequest, report: TransferReport) -> Self {
        Self {
            req,
            report,
            in_transaction: false,
        }
    }

    async fn execute(&mut self, session: &mut dyn AccountSession) {
        if let Err(e) = self.run(session).await {
            // Failure outside the statement sequence: snapshots, probes, BEGIN
            tracing::error!(error = %e, "Store fault during transfer");
            self.report.record_error(&TransferError::Store(e));
            if self.in_transaction {
                self.rollback(session).await;
            }
        }
    }

    async fn run(&mut self, session: &mut dyn AccountSession) -> Result<(), StoreError> {
        self.report.before_state = session.get_all().await?;

        let from_exists = session.exists(self.req.from).await?;
        let to_exists = session.exists(self.req.to).await?;
        tracing::debug!(from_exists, to_exists, "Accounts probed");

        if self.req.atomic {
            session.begin().await?;
            self.in_transaction = true;
        }

        if let Err(e) = self.apply(session, from_exists, to_exists).await {
            self.report.record_error(&e);
            if self.in_transaction {
                self.rollback(session).await;
            }
        }

        self.report.after_state = session.get_all().await?;
        Ok(())
    }

    async fn apply(
        &mut self,
        session: &mut dyn AccountSession,
        from_exists: bool,
        to_exists: bool,
    ) -> Result<(), TransferError> {
        let scenario = match Scenario::select(self.req.atomic, from_exists, to_exists) {
            Some(scenario) => scenario,
            None => {
                let balance = session.get_balance(self.req.from).await?;
                Scenario::by_balance(balance, self.req.amount)
            }
        };
        self.report.scenario = Some(scenario);

        for &step in scenario.steps() {
            let statement = self.statement(step.kind());
            let account = statement.account;
            let delta = statement.delta();
            // Recorded before it runs so a failure still shows what was attempted
            self.report.statements.push(statement);

            let require_row = match step {
                Step::RecordOnly(_) => return Err(TransferError::AccountNotFound(account)),
                Step::Checked(_) => true,
                Step::Unchecked(_) => false,
            };

            let rows = session.apply_delta(account, delta).await?;
            if let Some(last) = self.report.statements.last_mut() {
                last.applied = rows > 0;
            }
            tracing::debug!(account, delta, rows, "Statement executed");

            if require_row && rows == 0 {
                return Err(TransferError::AccountNotFound(account));
            }
        }

        if self.in_transaction {
            session.commit().await?;
            self.in_transaction = false;
        }
        Ok(())
    }

    fn statement(&self, kind: StatementKind) -> Statement {
        let account = match kind {
            StatementKind::Withdraw => self.req.from,
            StatementKind::Deposit => self.req.to,
        };
        Statement::new(kind, account, self.req.amount)
    }

    /// Best effort; a failed rollback is logged and otherwise ignored
    async fn rollback(&mut self, session: &mut dyn AccountSession) {
        self.in_transaction = false;
        match session.rollback().await {
            Ok(()) => tracing::info!("Transaction rolled back"),
            Err(e) => tracing::error!(error = %e, "Rollback failed"),
        }
    }
}
