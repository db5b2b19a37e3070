//! COD settlement service
//!
//! A cash order settles in two legs:
//!
//! ```text
//! leg 1  DriverToRestaurant   debit  order total     (driver fronts the food)
//! leg 2  CustomerToDriver     credit total + fee     (driver nets the fee)
//! ```
//!
//! Both target balances are validated against the driver's carry limit
//! before either leg is applied, so a rejected settlement never leaves a
//! partial debit or credit behind. Settlement failures are reported as a
//! structured [`CodPaymentResult`], not an error, so callers can branch on
//! insufficient funds without exception-driven control flow.

use crate::core::{AppError, AppResult};
use crate::orders::money::{to_decimal, to_f64};
use crate::store::{CodStore, OrderStore};
use dashmap::DashMap;
use shared::cod::{
    CodErrorCode, CodPaymentResult, CodPreferences, CodTransaction, CodTransactionType,
};
use shared::order::PaymentStatus;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Cash-on-delivery service
pub struct CodService {
    orders: Arc<dyn OrderStore>,
    ledger: Arc<dyn CodStore>,
    /// Per-driver settlement locks; balance reads and writes for one driver
    /// never interleave
    driver_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl CodService {
    pub fn new(orders: Arc<dyn OrderStore>, ledger: Arc<dyn CodStore>) -> Self {
        Self {
            orders,
            ledger,
            driver_locks: DashMap::new(),
        }
    }

    fn driver_lock(&self, driver_id: &str) -> Arc<Mutex<()>> {
        self.driver_locks
            .entry(driver_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Current cash balance for a driver
    pub async fn balance(&self, driver_id: &str) -> AppResult<f64> {
        Ok(self.ledger.balance(driver_id).await?)
    }

    /// Overwrite a driver's cash balance (administrative adjustment)
    ///
    /// Rejected outright if the new balance is negative or above the
    /// driver's carry limit; the stored balance is unchanged in that case.
    #[instrument(skip(self))]
    pub async fn update_balance(&self, driver_id: &str, new_balance: f64) -> AppResult<f64> {
        let lock = self.driver_lock(driver_id);
        let _guard = lock.lock().await;

        if new_balance < 0.0 {
            return Err(AppError::validation("Cash balance cannot be negative"));
        }
        let prefs = self.ledger.preferences(driver_id).await?;
        if new_balance > prefs.max_cash_limit {
            return Err(AppError::invalid_operation(format!(
                "Balance {:.2} exceeds max cash limit {:.2}",
                new_balance, prefs.max_cash_limit
            )));
        }
        self.ledger.set_balance(driver_id, new_balance).await?;
        info!(driver_id, new_balance, "Driver cash balance updated");
        Ok(new_balance)
    }

    /// Driver COD preferences
    pub async fn preferences(&self, driver_id: &str) -> AppResult<CodPreferences> {
        Ok(self.ledger.preferences(driver_id).await?)
    }

    /// Update driver COD preferences
    pub async fn set_preferences(
        &self,
        driver_id: &str,
        prefs: CodPreferences,
    ) -> AppResult<CodPreferences> {
        if prefs.max_cash_limit <= 0.0 {
            return Err(AppError::validation("Max cash limit must be positive"));
        }
        self.ledger.set_preferences(driver_id, prefs.clone()).await?;
        Ok(prefs)
    }

    /// Ledger transactions for a driver, oldest first
    pub async fn transactions(&self, driver_id: &str) -> AppResult<Vec<CodTransaction>> {
        Ok(self.ledger.transactions_for_driver(driver_id).await?)
    }

    /// Settle a cash order
    ///
    /// Pre-flight checks the driver's balance covers the order total and
    /// that neither leg's resulting balance breaks the carry limit, then
    /// applies both legs and records them as completed ledger transactions.
    #[instrument(skip(self))]
    pub async fn process_payment(&self, order_id: &str) -> CodPaymentResult {
        let order = match self.orders.get(order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                return CodPaymentResult::failed(
                    CodErrorCode::OrderNotFound,
                    format!("Order {order_id} not found"),
                );
            }
            Err(e) => {
                warn!(order_id, error = %e, "COD settlement aborted: order lookup failed");
                return CodPaymentResult::failed(CodErrorCode::ProcessingError, e.to_string());
            }
        };
        let Some(driver_id) = order.delivery_person_id.clone() else {
            return CodPaymentResult::failed(
                CodErrorCode::ProcessingError,
                "Order has no assigned delivery person",
            );
        };

        // Serialize per driver: two settlements for the same driver must not
        // interleave their balance read/write pairs
        let lock = self.driver_lock(&driver_id);
        let _guard = lock.lock().await;

        match self.settle(&order, &driver_id).await {
            Ok(result) => result,
            Err(e) => {
                warn!(order_id, driver_id, error = %e, "COD settlement failed");
                CodPaymentResult::failed(CodErrorCode::ProcessingError, e.to_string())
            }
        }
    }

    /// Both legs of the settlement; caller holds the driver lock
    async fn settle(
        &self,
        order: &shared::order::Order,
        driver_id: &str,
    ) -> AppResult<CodPaymentResult> {
        let prefs = self.ledger.preferences(driver_id).await?;
        if !prefs.accepts_cash {
            return Ok(CodPaymentResult::failed(
                CodErrorCode::ProcessingError,
                "Driver does not accept cash orders",
            ));
        }

        let balance = to_decimal(self.ledger.balance(driver_id).await?);
        let total = to_decimal(order.total_amount);
        let collected = total + to_decimal(order.delivery_fee);
        let limit = to_decimal(prefs.max_cash_limit);

        // Pre-flight: the driver must cover the order total, and neither
        // leg's resulting balance may break the carry limit
        if balance < total {
            return Ok(CodPaymentResult::failed(
                CodErrorCode::InsufficientCashBalance,
                format!(
                    "Balance {:.2} cannot cover order total {:.2}",
                    to_f64(balance),
                    order.total_amount
                ),
            ));
        }
        let after_leg1 = balance - total;
        let after_leg2 = after_leg1 + collected;
        if after_leg1 > limit || after_leg2 > limit {
            return Ok(CodPaymentResult::failed(
                CodErrorCode::ProcessingError,
                format!(
                    "Settlement would push balance {:.2} over max cash limit {:.2}",
                    to_f64(after_leg2),
                    prefs.max_cash_limit
                ),
            ));
        }

        // Leg 1: driver fronts the order total to the restaurant
        let mut leg1 = CodTransaction::new(
            &order.id,
            driver_id,
            &order.restaurant_id,
            order.total_amount,
            CodTransactionType::DriverToRestaurant,
        );
        self.ledger.set_balance(driver_id, to_f64(after_leg1)).await?;
        leg1.complete();
        self.ledger.record_transaction(leg1.clone()).await?;

        // Leg 2: customer pays the driver total + delivery fee
        let mut leg2 = CodTransaction::new(
            &order.id,
            driver_id,
            &order.restaurant_id,
            to_f64(collected),
            CodTransactionType::CustomerToDriver,
        );
        self.ledger.set_balance(driver_id, to_f64(after_leg2)).await?;
        leg2.complete();
        self.ledger.record_transaction(leg2.clone()).await?;

        // Mark the order paid; the cash already moved, so a store failure
        // here downgrades to a warning
        let mut paid = order.clone();
        paid.payment_status = PaymentStatus::Paid;
        paid.touch();
        if let Err(e) = self.orders.update(paid).await {
            warn!(order_id = %order.id, error = %e, "Settled but failed to mark order paid");
        }

        info!(
            order_id = %order.id,
            driver_id,
            new_balance = to_f64(after_leg2),
            "COD settlement completed"
        );
        Ok(CodPaymentResult::ok(
            vec![leg1.id, leg2.id],
            to_f64(after_leg2),
        ))
    }
}
