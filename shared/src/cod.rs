//! Cash-on-delivery ledger types
//!
//! A cash order settles in two legs: the driver pays the restaurant the
//! order total up front, then collects total + delivery fee from the
//! customer (netting the fee as profit). Each leg is a ledger transaction.

use serde::{Deserialize, Serialize};

/// COD transaction direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodTransactionType {
    /// Driver fronts the order total to the restaurant
    DriverToRestaurant,
    /// Customer pays the driver on delivery
    CustomerToDriver,
}

/// COD transaction status - immutable once terminal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodTransactionStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl CodTransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// COD ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodTransaction {
    pub id: String,
    pub order_id: String,
    pub delivery_person_id: String,
    pub restaurant_id: String,
    pub amount: f64,
    pub transaction_type: CodTransactionType,
    pub status: CodTransactionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    /// Set when the transaction reaches Completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl CodTransaction {
    pub fn new(
        order_id: impl Into<String>,
        delivery_person_id: impl Into<String>,
        restaurant_id: impl Into<String>,
        amount: f64,
        transaction_type: CodTransactionType,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            order_id: order_id.into(),
            delivery_person_id: delivery_person_id.into(),
            restaurant_id: restaurant_id.into(),
            amount,
            transaction_type,
            status: CodTransactionStatus::Pending,
            notes: None,
            created_at: chrono::Utc::now().timestamp_millis(),
            completed_at: None,
        }
    }

    /// Mark completed, stamping the completion time
    pub fn complete(&mut self) {
        self.status = CodTransactionStatus::Completed;
        self.completed_at = Some(chrono::Utc::now().timestamp_millis());
    }
}

/// COD payment error codes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodErrorCode {
    OrderNotFound,
    InsufficientCashBalance,
    ProcessingError,
}

/// COD payment settlement result
///
/// Failures are reported as a structured result, not an error, so callers
/// can branch on insufficient funds without exception-driven control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodPaymentResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<CodErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Ledger transaction ids created by the settlement (in leg order)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transaction_ids: Vec<String>,
    /// Driver cash balance after settlement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_balance: Option<f64>,
}

impl CodPaymentResult {
    pub fn ok(transaction_ids: Vec<String>, new_balance: f64) -> Self {
        Self {
            success: true,
            error_code: None,
            message: None,
            transaction_ids,
            new_balance: Some(new_balance),
        }
    }

    pub fn failed(code: CodErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: Some(code),
            message: Some(message.into()),
            transaction_ids: Vec::new(),
            new_balance: None,
        }
    }
}

/// Driver COD preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodPreferences {
    /// Maximum cash the driver may carry; balance updates that would exceed
    /// this are rejected outright
    pub max_cash_limit: f64,
    /// Whether the driver accepts cash orders at all
    pub accepts_cash: bool,
}

impl Default for CodPreferences {
    fn default() -> Self {
        Self {
            max_cash_limit: 500.0,
            accepts_cash: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_complete_stamps_time() {
        let mut txn = CodTransaction::new(
            "order-1",
            "driver-1",
            "rest-1",
            42.0,
            CodTransactionType::DriverToRestaurant,
        );
        assert_eq!(txn.status, CodTransactionStatus::Pending);
        assert!(txn.completed_at.is_none());

        txn.complete();
        assert_eq!(txn.status, CodTransactionStatus::Completed);
        assert!(txn.completed_at.is_some());
    }

    #[test]
    fn test_result_constructors() {
        let ok = CodPaymentResult::ok(vec!["t1".to_string()], 120.0);
        assert!(ok.success);
        assert_eq!(ok.new_balance, Some(120.0));

        let err = CodPaymentResult::failed(CodErrorCode::InsufficientCashBalance, "too low");
        assert!(!err.success);
        assert_eq!(err.error_code, Some(CodErrorCode::InsufficientCashBalance));
    }
}
