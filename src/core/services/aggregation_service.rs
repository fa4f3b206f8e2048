//! Pure aggregation over transaction snapshots.
//!
//! Every function here is total: any well-formed slice, including the empty
//! one, yields a zero-valued aggregate rather than an error. Each call is a
//! fresh computation over the snapshot it was given; the engine has no
//! staleness-detection duty.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::rate_sheet::ALL_RATE_SHEETS;
use crate::domain::transaction::Transaction;
use crate::domain::user::derive_display_name;

/// Headline figures for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub count: usize,
    pub total_weight_kg: f64,
    pub total_payout: f64,
}

/// One bar of the per-representative performance chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepPerformance {
    pub display_name: String,
    pub total_weight_kg: f64,
}

/// One bar of the per-material weight chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialTotal {
    pub material: String,
    pub total_weight_kg: f64,
}

/// Cross-representative figures for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOverview {
    pub active_reps: usize,
    pub totals: Totals,
    pub performance: Vec<RepPerformance>,
}

pub struct AggregationService;

impl AggregationService {
    pub fn totals(txs: &[Transaction]) -> Totals {
        Totals {
            count: txs.len(),
            total_weight_kg: txs.iter().map(|tx| tx.weight_kg).sum(),
            total_payout: txs.iter().map(|tx| tx.total).sum(),
        }
    }

    /// Partitions transactions by owner email, preserving first-seen owner
    /// order. Records without an owner land under the `"unknown"` key.
    pub fn group_by_owner(txs: &[Transaction]) -> Vec<(String, Vec<Transaction>)> {
        let mut groups: Vec<(String, Vec<Transaction>)> = Vec::new();
        for tx in txs {
            let key = tx.owner_key();
            match groups.iter_mut().find(|(owner, _)| owner.as_str() == key) {
                Some((_, group)) => group.push(tx.clone()),
                None => groups.push((key.to_string(), vec![tx.clone()])),
            }
        }
        groups
    }

    /// Per-owner weight totals sorted non-increasing; the sort is stable so
    /// equal weights keep their input order. The display name is the first
    /// recorded rep name for the owner, else derived from the email.
    pub fn performance_by_owner(grouped: &[(String, Vec<Transaction>)]) -> Vec<RepPerformance> {
        let mut rows: Vec<RepPerformance> = grouped
            .iter()
            .map(|(email, txs)| {
                let display_name = txs
                    .iter()
                    .find(|tx| !tx.rep_name.trim().is_empty())
                    .map(|tx| tx.rep_name.clone())
                    .unwrap_or_else(|| derive_display_name(email));
                RepPerformance {
                    display_name,
                    total_weight_kg: round2(txs.iter().map(|tx| tx.weight_kg).sum()),
                }
            })
            .collect();
        rows.sort_by(|a, b| descending(a.total_weight_kg, b.total_weight_kg));
        rows
    }

    /// Transactions dated within `start..=end`, both bounds inclusive,
    /// compared as local-clock timestamps.
    pub fn filter_by_date_range(
        txs: &[Transaction],
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Vec<Transaction> {
        txs.iter()
            .filter(|tx| tx.date >= start && tx.date <= end)
            .cloned()
            .collect()
    }

    /// Transactions recorded against the named rate sheet; the `"All"`
    /// sentinel passes the input through unchanged.
    pub fn filter_by_rate_sheet(txs: &[Transaction], name: &str) -> Vec<Transaction> {
        if name == ALL_RATE_SHEETS {
            return txs.to_vec();
        }
        txs.iter()
            .filter(|tx| tx.rate_sheet == name)
            .cloned()
            .collect()
    }

    /// Per-material weight totals sorted non-increasing by weight.
    pub fn material_breakdown(txs: &[Transaction]) -> Vec<MaterialTotal> {
        let mut rows: Vec<MaterialTotal> = Vec::new();
        for tx in txs {
            match rows.iter_mut().find(|row| row.material == tx.material) {
                Some(row) => row.total_weight_kg += tx.weight_kg,
                None => rows.push(MaterialTotal {
                    material: tx.material.clone(),
                    total_weight_kg: tx.weight_kg,
                }),
            }
        }
        for row in &mut rows {
            row.total_weight_kg = round2(row.total_weight_kg);
        }
        rows.sort_by(|a, b| descending(a.total_weight_kg, b.total_weight_kg));
        rows
    }

    /// Case-insensitive substring match against rep name, client name, and
    /// material (OR semantics). The empty term returns the input unchanged.
    pub fn search(txs: &[Transaction], term: &str) -> Vec<Transaction> {
        if term.is_empty() {
            return txs.to_vec();
        }
        let needle = term.to_lowercase();
        txs.iter()
            .filter(|tx| {
                tx.rep_name.to_lowercase().contains(&needle)
                    || tx.client_name.to_lowercase().contains(&needle)
                    || tx.material.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Number of distinct representative names across the snapshot.
    pub fn rep_count(txs: &[Transaction]) -> usize {
        txs.iter()
            .map(|tx| tx.rep_name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Bundles the cross-representative figures the admin dashboard shows.
    pub fn admin_overview(grouped: &[(String, Vec<Transaction>)]) -> AdminOverview {
        let flat: Vec<Transaction> = grouped
            .iter()
            .flat_map(|(_, txs)| txs.iter().cloned())
            .collect();
        AdminOverview {
            active_reps: Self::rep_count(&flat),
            totals: Self::totals(&flat),
            performance: Self::performance_by_owner(grouped),
        }
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
