use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::balance::DailyBalance,
    domain::common::Displayable,
    domain::transaction::Transaction,
    utils::persistence::{app_data_dir, ensure_dir},
};

use super::{Result, TransactionStore};

const TRANSACTIONS_FILE: &str = "transactions.json";
const BALANCES_FILE: &str = "balances.json";
const TMP_SUFFIX: &str = "tmp";

/// JSON-file backend storing transactions keyed by owner email and one
/// balance record per calendar day (ISO date keys).
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    transactions_file: PathBuf,
    balances_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self {
            transactions_file: root.join(TRANSACTIONS_FILE),
            balances_file: root.join(BALANCES_FILE),
            root,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn read_transactions(&self) -> Result<BTreeMap<String, Vec<Transaction>>> {
        if self.transactions_file.exists() {
            let data = fs::read_to_string(&self.transactions_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(BTreeMap::new())
        }
    }

    fn write_transactions(&self, by_owner: &BTreeMap<String, Vec<Transaction>>) -> Result<()> {
        let json = serde_json::to_string_pretty(by_owner)?;
        let tmp = tmp_path(&self.transactions_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.transactions_file)?;
        Ok(())
    }

    fn read_balances(&self) -> Result<BTreeMap<String, DailyBalance>> {
        if self.balances_file.exists() {
            let data = fs::read_to_string(&self.balances_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(BTreeMap::new())
        }
    }

    fn write_balances(&self, by_day: &BTreeMap<String, DailyBalance>) -> Result<()> {
        let json = serde_json::to_string_pretty(by_day)?;
        let tmp = tmp_path(&self.balances_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.balances_file)?;
        Ok(())
    }
}

impl TransactionStore for JsonStorage {
    fn append(&self, transaction: &Transaction) -> Result<Uuid> {
        let mut by_owner = self.read_transactions()?;
        by_owner
            .entry(transaction.owner_key().to_string())
            .or_default()
            .push(transaction.clone());
        self.write_transactions(&by_owner)?;
        debug!(
            owner = transaction.owner_key(),
            "appended {}",
            transaction.display_label()
        );
        Ok(transaction.id)
    }

    fn query_by_owner(&self, email: &str) -> Result<Vec<Transaction>> {
        let by_owner = self.read_transactions()?;
        Ok(by_owner.get(email).cloned().unwrap_or_default())
    }

    fn query_all(&self) -> Result<Vec<Transaction>> {
        let by_owner = self.read_transactions()?;
        Ok(by_owner.into_values().flatten().collect())
    }

    fn get_daily_balance(&self, date: NaiveDate) -> Result<Option<DailyBalance>> {
        let by_day = self.read_balances()?;
        Ok(by_day.get(&date.to_string()).cloned())
    }

    fn put_daily_balance(&self, record: &DailyBalance) -> Result<()> {
        let mut by_day = self.read_balances()?;
        by_day.insert(record.date.to_string(), record.clone());
        self.write_balances(&by_day)?;
        debug!(date = %record.date, status = %record.status, "daily balance stored");
        Ok(())
    }

    fn latest_balance_before(&self, date: NaiveDate) -> Result<Option<DailyBalance>> {
        let by_day = self.read_balances()?;
        // ISO date keys sort lexicographically in calendar order.
        Ok(by_day
            .range(..date.to_string())
            .next_back()
            .map(|(_, record)| record.clone()))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
