//! Domain models for recorded buy-back transactions and in-progress cart
//! line items.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Displayable;

/// Sentinel owner key used when a transaction carries no owner email.
pub const UNKNOWN_OWNER: &str = "unknown";

/// One material line paid out during a client visit. Immutable once created:
/// `total` is fixed at `weight_kg * price_per_kg` and never re-derived, and
/// the price stays frozen even if the originating rate sheet later changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub rep_name: String,
    pub client_name: String,
    pub material: String,
    pub rate_sheet: String,
    pub weight_kg: f64,
    pub price_per_kg: f64,
    pub total: f64,
    pub date: DateTime<Local>,
    #[serde(default)]
    pub owner_email: String,
}

impl Transaction {
    pub fn new(
        rep_name: impl Into<String>,
        client_name: impl Into<String>,
        item: LineItem,
        date: DateTime<Local>,
        owner_email: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            rep_name: rep_name.into(),
            client_name: client_name.into(),
            material: item.material,
            rate_sheet: item.rate_sheet,
            weight_kg: item.weight_kg,
            price_per_kg: item.price_per_kg,
            total: item.total,
            date,
            owner_email: owner_email.into(),
        }
    }

    /// Grouping key for this transaction's owner, falling back to the
    /// [`UNKNOWN_OWNER`] sentinel when no email was recorded.
    pub fn owner_key(&self) -> &str {
        if self.owner_email.trim().is_empty() {
            UNKNOWN_OWNER
        } else {
            &self.owner_email
        }
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "txn:{} {} {:.2}kg for {}",
            self.id, self.material, self.weight_kg, self.client_name
        )
    }
}

/// A priced cart entry built from a rate-sheet lookup, not yet saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub material: String,
    pub rate_sheet: String,
    pub weight_kg: f64,
    pub price_per_kg: f64,
    pub total: f64,
}

impl LineItem {
    pub fn new(
        material: impl Into<String>,
        rate_sheet: impl Into<String>,
        weight_kg: f64,
        price_per_kg: f64,
    ) -> Self {
        Self {
            material: material.into(),
            rate_sheet: rate_sheet.into(),
            weight_kg,
            price_per_kg,
            total: weight_kg * price_per_kg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn line_item_totals_weight_times_price() {
        let item = LineItem::new("Cans", "Walk-ins", 10.0, 15.5);
        assert_eq!(item.total, 155.0);
    }

    #[test]
    fn owner_key_falls_back_to_sentinel() {
        let item = LineItem::new("Cans", "Walk-ins", 1.0, 15.5);
        let mut txn = Transaction::new("Thandi M", "Local Cafe", item, Local::now(), "");
        assert_eq!(txn.owner_key(), UNKNOWN_OWNER);
        txn.owner_email = "thandi.m@example.com".into();
        assert_eq!(txn.owner_key(), "thandi.m@example.com");
    }

    #[test]
    fn label_names_material_and_client() {
        let item = LineItem::new("Cans", "Walk-ins", 1.0, 15.5);
        let txn = Transaction::new("Thandi M", "Local Cafe", item, Local::now(), "t@x.com");
        let label = txn.display_label();
        assert!(label.contains("Cans"));
        assert!(label.contains("Local Cafe"));
    }
}
