//! Daily cash balance records reconciled against walk-in payouts.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One opening/closing cash record per calendar day. The closing figure is
/// `opening_balance` minus that day's walk-in payouts; it is carried forward
/// as the next day's opening and never recomputed retroactively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub opening_balance: f64,
    pub closing_balance: f64,
    #[serde(default)]
    pub status: BalanceStatus,
}

impl DailyBalance {
    /// Record created lazily on first access: opening carried forward from
    /// the prior day (or defaulted), closing derived from `walkin_payout`.
    pub fn carried(date: NaiveDate, opening_balance: f64, walkin_payout: f64) -> Self {
        Self {
            date,
            opening_balance,
            closing_balance: opening_balance - walkin_payout,
            status: BalanceStatus::OpeningSet,
        }
    }

    /// Record confirmed by an explicit admin save.
    pub fn saved(date: NaiveDate, opening_balance: f64, walkin_payout: f64) -> Self {
        Self {
            date,
            opening_balance,
            closing_balance: opening_balance - walkin_payout,
            status: BalanceStatus::Saved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
/// Lifecycle of a day's balance record; the absence of a record is the
/// implicit uninitialized state.
pub enum BalanceStatus {
    /// Opening figure carried forward or defaulted, not yet confirmed.
    #[default]
    OpeningSet,
    /// Confirmed by an explicit admin save.
    Saved,
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BalanceStatus::OpeningSet => "Opening Set",
            BalanceStatus::Saved => "Saved",
        };
        f.write_str(label)
    }
}
