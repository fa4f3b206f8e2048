pub mod aggregation_service;
pub mod balance_service;
pub mod report_service;
pub mod transaction_service;

pub use aggregation_service::AggregationService;
pub use balance_service::BalanceLedger;
pub use report_service::ReportService;
pub use transaction_service::TransactionService;

use crate::errors::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Recoverable failures surfaced at the UI boundary; none is fatal.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Storage or identity collaborator failure; never auto-retried.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Bad user input, recovered locally with no state change.
    #[error("{0}")]
    Validation(String),
    /// A report/filter combination yielded zero rows.
    #[error("no data available for the {0} report")]
    NoData(String),
}
