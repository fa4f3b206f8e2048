//! Report assembly: date-window pre-filtering, row extraction, and the
//! plain-text and receipt renderings handed to output sinks. PDF rendering
//! itself is an external collaborator consuming the rows produced here.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use crate::core::clock::{day_bounds, month_bounds, week_bounds};
use crate::core::services::{AggregationService, ServiceError, ServiceResult};
use crate::domain::rate_sheet::ALL_RATE_SHEETS;
use crate::domain::transaction::{LineItem, Transaction};

/// Selects the date-range pre-filter applied before rows are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportKind {
    Daily,
    Weekly,
    Monthly,
    Material,
    AdminFull,
}

impl ReportKind {
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Daily => "daily",
            ReportKind::Weekly => "weekly",
            ReportKind::Monthly => "monthly",
            ReportKind::Material => "material",
            ReportKind::AdminFull => "admin-full",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ReportKind::Daily => "Daily",
            ReportKind::Weekly => "Weekly",
            ReportKind::Monthly => "Monthly",
            ReportKind::Material => "Material",
            ReportKind::AdminFull => "Admin",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opening/closing figures an admin report reconciles against.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BalanceFigures {
    pub opening: f64,
    pub closing: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub date: DateTime<Local>,
    pub rep_name: String,
    pub client_name: String,
    pub material: String,
    pub rate_sheet: String,
    pub weight_kg: f64,
    pub price_per_kg: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_paid: f64,
    pub total_weight_kg: f64,
    pub opening_balance: Option<f64>,
    pub closing_balance: Option<f64>,
}

/// Ordered rows plus summary figures; row order is input order, so callers
/// pre-sort (typically descending by date).
#[derive(Debug, Clone, Serialize)]
pub struct RenderedReport {
    pub title: String,
    pub generated_at: DateTime<Local>,
    pub rate_sheet_label: Option<String>,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

/// A per-visit customer receipt, printed right after a batch save.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub client_name: String,
    pub rep_name: String,
    pub items: Vec<LineItem>,
    pub grand_total: f64,
    pub issued_at: DateTime<Local>,
}

pub struct ReportService;

impl ReportService {
    /// Assembles a report of `kind` over the given snapshot. An empty
    /// filtered set is a reportable error, never a blank document.
    pub fn build(
        kind: ReportKind,
        txs: &[Transaction],
        balances: Option<BalanceFigures>,
        rate_sheet_label: Option<&str>,
        today: NaiveDate,
        generated_at: DateTime<Local>,
    ) -> ServiceResult<RenderedReport> {
        let filtered = Self::prefilter(kind, txs, today);
        if filtered.is_empty() {
            return Err(ServiceError::NoData(kind.label().to_string()));
        }

        let mut total_paid = 0.0;
        let mut total_weight_kg = 0.0;
        let rows: Vec<ReportRow> = filtered
            .iter()
            .map(|tx| {
                total_paid += tx.total;
                total_weight_kg += tx.weight_kg;
                ReportRow {
                    date: tx.date,
                    rep_name: tx.rep_name.clone(),
                    client_name: tx.client_name.clone(),
                    material: tx.material.clone(),
                    rate_sheet: tx.rate_sheet.clone(),
                    weight_kg: tx.weight_kg,
                    price_per_kg: tx.price_per_kg,
                    total: tx.total,
                }
            })
            .collect();

        // The admin summary re-derives its closing figure from the report
        // period's payouts rather than trusting the stored one.
        let (opening_balance, closing_balance) = match (kind, balances) {
            (ReportKind::AdminFull, Some(figures)) if figures.opening > 0.0 => {
                (Some(figures.opening), Some(figures.opening - total_paid))
            }
            _ => (None, None),
        };

        Ok(RenderedReport {
            title: format!("{} Report", kind.title()),
            generated_at,
            rate_sheet_label: rate_sheet_label
                .filter(|label| *label != ALL_RATE_SHEETS)
                .map(str::to_string),
            rows,
            summary: ReportSummary {
                total_paid,
                total_weight_kg,
                opening_balance,
                closing_balance,
            },
        })
    }

    fn prefilter(kind: ReportKind, txs: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
        let window = match kind {
            ReportKind::Daily => Some(day_bounds(today)),
            ReportKind::Weekly => Some(week_bounds(today)),
            ReportKind::Monthly => Some(month_bounds(today)),
            ReportKind::Material | ReportKind::AdminFull => None,
        };
        match window {
            Some((start, end)) => AggregationService::filter_by_date_range(txs, start, end),
            None => txs.to_vec(),
        }
    }

    /// Fixed-width tabular rendering for terminal or log output.
    pub fn render_text(report: &RenderedReport, currency: &str) -> String {
        let mut out = String::new();
        out.push_str(&report.title);
        out.push('\n');
        if let Some(label) = &report.rate_sheet_label {
            out.push_str(&format!("Rate Sheet: {label}\n"));
        }
        out.push_str(&format!(
            "Generated on: {}\n\n",
            report.generated_at.format("%Y/%m/%d %H:%M")
        ));
        out.push_str(&format!(
            "{:<17} {:<18} {:<18} {:<14} {:<10} {:>9} {:>9} {:>11}\n",
            "Date", "Rep", "Client", "Material", "Sheet", "Kg", "Rate", "Total"
        ));
        for row in &report.rows {
            out.push_str(&format!(
                "{:<17} {:<18} {:<18} {:<14} {:<10} {:>9.2} {:>9.2} {:>11.2}\n",
                row.date.format("%Y/%m/%d %H:%M"),
                row.rep_name,
                row.client_name,
                row.material,
                row.rate_sheet,
                row.weight_kg,
                row.price_per_kg,
                row.total,
            ));
        }
        out.push('\n');
        out.push_str(&format!(
            "Total Paid: {currency} {:.2}\n",
            report.summary.total_paid
        ));
        out.push_str(&format!(
            "Total Kg: {:.2} kg\n",
            report.summary.total_weight_kg
        ));
        if let (Some(opening), Some(closing)) = (
            report.summary.opening_balance,
            report.summary.closing_balance,
        ) {
            out.push_str(&format!("Opening Balance: {currency} {opening:.2}\n"));
            out.push_str(&format!("Calculated Closing Balance: {currency} {closing:.2}\n"));
        }
        out
    }

    /// Self-contained HTML document for the pop-up print window.
    pub fn render_receipt_html(receipt: &Receipt, organization: &str, currency: &str) -> String {
        let rows: String = receipt
            .items
            .iter()
            .map(|item| {
                format!(
                    "          <tr><td>{}</td><td class=\"num\">{:.2}</td><td class=\"num\">{currency} {:.2}</td></tr>\n",
                    item.material, item.weight_kg, item.total
                )
            })
            .collect();
        format!(
            r#"<html>
<head>
  <title>{organization} Receipt</title>
  <style>
    body {{ font-family: sans-serif; margin: 0; padding: 20px; color: #333; }}
    .container {{ max-width: 300px; margin: auto; }}
    .header {{ text-align: center; margin-bottom: 20px; }}
    .info {{ margin-bottom: 15px; border-bottom: 1px dashed #ccc; padding-bottom: 10px; }}
    table {{ width: 100%; border-collapse: collapse; }}
    th, td {{ padding: 5px; text-align: left; }}
    th {{ border-bottom: 1px solid #333; }}
    .num {{ text-align: right; }}
    .total {{ margin-top: 15px; text-align: right; border-top: 2px double #333; padding-top: 10px; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header"><h1>{organization}</h1><p>Customer Receipt</p></div>
    <div class="info">
      <p><strong>Date:</strong> {date}</p>
      <p><strong>Client:</strong> {client}</p>
      <p><strong>Rep:</strong> {rep}</p>
    </div>
    <table>
      <thead><tr><th>Material</th><th class="num">Kg</th><th class="num">Total</th></tr></thead>
      <tbody>
{rows}      </tbody>
    </table>
    <div class="total"><h2>Grand Total: {currency} {total:.2}</h2></div>
  </div>
</body>
</html>
"#,
            date = receipt.issued_at.format("%Y/%m/%d %H:%M"),
            client = receipt.client_name,
            rep = receipt.rep_name,
            total = receipt.grand_total,
        )
    }
}
