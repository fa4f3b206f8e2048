//! Business logic for recording client visits as transaction batches.

use chrono::{DateTime, Local};
use tracing::info;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::rate_sheet::RateSheet;
use crate::domain::transaction::{LineItem, Transaction};
use crate::domain::user::{Role, User};
use crate::storage::TransactionStore;

/// Validated helpers for building cart items and saving them write-once.
pub struct TransactionService;

impl TransactionService {
    /// Builds a priced cart entry from a rate-sheet lookup. The price is
    /// frozen into the item; later sheet edits do not affect it.
    pub fn line_item(sheet: &RateSheet, material: &str, weight_kg: f64) -> ServiceResult<LineItem> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(ServiceError::Validation(
                "weight must be a positive number".into(),
            ));
        }
        let price = sheet.price_of(material).ok_or_else(|| {
            ServiceError::Validation(format!(
                "material `{material}` is not on rate sheet `{}`",
                sheet.name
            ))
        })?;
        Ok(LineItem::new(material, sheet.name.clone(), weight_kg, price))
    }

    /// Records one client visit as a batch of write-once transactions
    /// sharing the same date, client, and representative. There is no
    /// update or delete path for saved transactions.
    pub fn add_batch(
        store: &dyn TransactionStore,
        user: &User,
        client_name: &str,
        items: &[LineItem],
        now: DateTime<Local>,
    ) -> ServiceResult<Vec<Transaction>> {
        if user.role != Role::Rep {
            return Err(ServiceError::Validation(
                "only representatives can log transactions".into(),
            ));
        }
        let client = client_name.trim();
        if client.is_empty() {
            return Err(ServiceError::Validation("client name is required".into()));
        }
        if items.is_empty() {
            return Err(ServiceError::Validation(
                "add at least one material before saving".into(),
            ));
        }
        for item in items {
            if !item.weight_kg.is_finite() || item.weight_kg <= 0.0 {
                return Err(ServiceError::Validation(format!(
                    "invalid weight for material `{}`",
                    item.material
                )));
            }
        }

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let txn = Transaction::new(
                user.name.clone(),
                client,
                item.clone(),
                now,
                user.email.clone(),
            );
            store.append(&txn)?;
            created.push(txn);
        }
        info!(count = created.len(), client, "transaction batch saved");
        Ok(created)
    }
}
