//! Transfer request and report DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::account::{Account, AccountId, Balance};
use crate::transfer::{
    ErrorKind, Scenario, Statement, StatementKind, TransferReport, TransferRequest,
};

/// `POST /transfer` body
///
/// All numeric fields must be JSON integers; strings and fractions are
/// rejected during deserialization.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    #[schema(example = 1)]
    pub from_id: AccountId,
    #[schema(example = 2)]
    pub to_id: AccountId,
    #[schema(example = 500)]
    pub amount: Balance,
    /// Run both updates inside one transaction
    #[serde(default)]
    pub use_transaction: bool,
}

impl From<TransferBody> for TransferRequest {
    fn from(body: TransferBody) -> Self {
        TransferRequest::new(body.from_id, body.to_id, body.amount, body.use_transaction)
    }
}

/// One attempted statement
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    #[schema(example = "withdraw 500 from 1")]
    pub statement: String,
    #[schema(example = "UPDATE accounts SET balance = balance - 500 WHERE id = 1")]
    pub sql: String,
    pub kind: StatementKind,
    pub account_id: AccountId,
    pub amount: Balance,
    /// False when the statement was only recorded, or matched no row
    pub applied: bool,
}

impl From<&Statement> for StepView {
    fn from(s: &Statement) -> Self {
        Self {
            statement: s.to_string(),
            sql: s.sql(),
            kind: s.kind,
            account_id: s.account,
            amount: s.amount,
            applied: s.applied,
        }
    }
}

/// Transfer report
///
/// Returned with HTTP 200 whether or not the transfer succeeded; check
/// `error`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferReportResponse {
    pub request_id: Uuid,
    pub before_state: Vec<Account>,
    pub after_state: Vec<Account>,
    /// Human-readable statements in attempt order
    #[schema(example = json!(["withdraw 500 from 1", "deposit 500 to 2"]))]
    pub statements: Vec<String>,
    /// SQL text of the same statements
    pub sql_statements: Vec<String>,
    pub steps: Vec<StepView>,
    pub atomic: bool,
    /// Same as `atomic`, under the request's field name
    pub use_transaction: bool,
    pub scenario: Option<Scenario>,
    #[schema(example = json!(null))]
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl From<TransferReport> for TransferReportResponse {
    fn from(report: TransferReport) -> Self {
        Self {
            request_id: report.request_id,
            statements: report.statement_texts(),
            sql_statements: report.statements.iter().map(Statement::sql).collect(),
            steps: report.statements.iter().map(StepView::from).collect(),
            before_state: report.before_state,
            after_state: report.after_state,
            atomic: report.atomic,
            use_transaction: report.atomic,
            scenario: report.scenario,
            error: report.error,
            error_kind: report.error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_requires_integers() {
        let ok: TransferBody = serde_json::from_value(
            json!({"fromId": 1, "toId": 2, "amount": 5, "useTransaction": true}),
        )
        .unwrap();
        assert!(ok.use_transaction);

        let defaulted: TransferBody =
            serde_json::from_value(json!({"fromId": 1, "toId": 2, "amount": 5})).unwrap();
        assert!(!defaulted.use_transaction);

        for bad in [
            json!({"fromId": "1", "toId": 2, "amount": 5}),
            json!({"fromId": 1, "toId": 2, "amount": 5.5}),
            json!({"fromId": 1, "amount": 5}),
        ] {
            assert!(serde_json::from_value::<TransferBody>(bad).is_err());
        }
    }

    #[test]
    fn test_report_json_shape() {
        let mut report = TransferReport::new(Uuid::nil(), false);
        let mut withdraw = Statement::new(StatementKind::Withdraw, 1, 400);
        withdraw.applied = true;
        report.statements.push(withdraw);
        report.statements.push(Statement::new(StatementKind::Deposit, 99, 400));
        report.scenario = Some(Scenario::MissingTarget);
        report.error = Some("AccountNotFound(99)".to_string());
        report.error_kind = Some(ErrorKind::AccountNotFound);

        let json = serde_json::to_value(TransferReportResponse::from(report)).unwrap();
        assert_eq!(json["statements"], json!(["withdraw 400 from 1", "deposit 400 to 99"]));
        assert_eq!(
            json["sqlStatements"][1],
            "UPDATE accounts SET balance = balance + 400 WHERE id = 99"
        );
        assert_eq!(json["steps"][0]["applied"], true);
        assert_eq!(json["steps"][1]["applied"], false);
        assert_eq!(json["useTransaction"], false);
        assert_eq!(json["scenario"], "MISSING_TARGET");
        assert_eq!(json["errorKind"], "ACCOUNT_NOT_FOUND");
        assert_eq!(json["error"], "AccountNotFound(99)");
    }

    #[test]
    fn test_success_report_has_null_error() {
        let report = TransferReport::new(Uuid::nil(), true);
        let json = serde_json::to_value(TransferReportResponse::from(report)).unwrap();
        assert!(json["error"].is_null());
        assert!(json.as_object().unwrap().contains_key("error"));
    }
}
