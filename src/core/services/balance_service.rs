//! Daily cash reconciliation against walk-in payouts.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::core::clock::day_bounds;
use crate::core::services::{AggregationService, ServiceError, ServiceResult};
use crate::domain::balance::DailyBalance;
use crate::domain::rate_sheet::WALK_INS;
use crate::storage::TransactionStore;

/// Tracks one opening/closing cash record per calendar day. A day moves
/// through three states: no record yet, an opening carried forward on first
/// access, and a record confirmed by an explicit admin save.
pub struct BalanceLedger;

impl BalanceLedger {
    /// Returns the balance record for `day`, creating it on first access.
    /// A fresh record carries the most recent prior day's closing balance
    /// forward as its opening (0.0 when no prior record exists) and is
    /// persisted immediately.
    pub fn current(store: &dyn TransactionStore, day: NaiveDate) -> ServiceResult<DailyBalance> {
        if let Some(existing) = store.get_daily_balance(day)? {
            return Ok(existing);
        }
        let opening = store
            .latest_balance_before(day)?
            .map(|prior| prior.closing_balance)
            .unwrap_or(0.0);
        let record = DailyBalance::carried(day, opening, Self::walkin_payout(store, day)?);
        store.put_daily_balance(&record)?;
        debug!(date = %day, opening, "daily balance initialized");
        Ok(record)
    }

    /// Saves an admin-confirmed opening figure, recomputing the closing
    /// balance from that day's walk-in payout. Both fields are persisted in
    /// a single upsert, so repeating the call with the same amount stores
    /// the same record. Non-finite amounts are rejected without touching
    /// stored state.
    pub fn set_opening(
        store: &dyn TransactionStore,
        day: NaiveDate,
        amount: f64,
    ) -> ServiceResult<DailyBalance> {
        if !amount.is_finite() {
            return Err(ServiceError::Validation(
                "opening balance must be a number".into(),
            ));
        }
        let record = DailyBalance::saved(day, amount, Self::walkin_payout(store, day)?);
        store.put_daily_balance(&record)?;
        info!(
            date = %day,
            opening = record.opening_balance,
            closing = record.closing_balance,
            "daily balance saved"
        );
        Ok(record)
    }

    /// Walk-in payout for `day`, always computed over the full transaction
    /// set. Balance correctness must not depend on whatever rate-sheet
    /// filter a dashboard happens to be displaying.
    pub fn walkin_payout(store: &dyn TransactionStore, day: NaiveDate) -> ServiceResult<f64> {
        let (start, end) = day_bounds(day);
        let all = store.query_all()?;
        let todays = AggregationService::filter_by_date_range(&all, start, end);
        let walkins = AggregationService::filter_by_rate_sheet(&todays, WALK_INS);
        Ok(AggregationService::totals(&walkins).total_payout)
    }
}
