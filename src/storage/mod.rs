pub mod json_backend;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{domain::balance::DailyBalance, domain::transaction::Transaction, errors::StoreError};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Abstraction over persistence backends holding transactions and daily
/// balance records. Calls are synchronous request/response operations that
/// may fail; callers surface failures to the user without retrying.
pub trait TransactionStore: Send + Sync {
    /// Appends a write-once transaction and returns its id.
    fn append(&self, transaction: &Transaction) -> Result<Uuid>;

    fn query_by_owner(&self, email: &str) -> Result<Vec<Transaction>>;

    fn query_all(&self) -> Result<Vec<Transaction>>;

    fn get_daily_balance(&self, date: NaiveDate) -> Result<Option<DailyBalance>>;

    /// Full-record upsert keyed by calendar day.
    fn put_daily_balance(&self, record: &DailyBalance) -> Result<()>;

    /// Most recent balance record strictly before `date`, if any.
    fn latest_balance_before(&self, date: NaiveDate) -> Result<Option<DailyBalance>>;
}

pub use json_backend::JsonStorage;
