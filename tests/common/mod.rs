#![allow(dead_code)]

use std::path::PathBuf;

use assert_fs::{prelude::*, TempDir};
use once_cell::sync::Lazy;
use spendgrid_domain::Transaction;

/// Dashboard export with one unparseable row; net balance of the rest is 150.
pub const DASHBOARD_JSON: &str = r#"[
    {"date": "2023-10-01T09:00:00", "amount": 1430, "type": "income", "category": "Salary"},
    {"date": "2023-10-02", "amount": 1200, "type": "expense", "category": "Rent"},
    {"date": "2023-10-27", "amount": 40, "type": "expense", "category": "Food"},
    {"date": "2023-10-28T12:00:00-05:00", "amount": 40, "type": "expense", "category": "Food"},
    {"date": "not-a-date", "amount": 999, "type": "expense", "category": "Food"}
]"#;

pub static DASHBOARD: Lazy<Vec<Transaction>> =
    Lazy::new(|| serde_json::from_str(DASHBOARD_JSON).expect("parse dashboard fixture"));

/// The single-expense October 2023 example.
pub fn october_single_expense() -> Vec<Transaction> {
    vec![Transaction::expense("2023-10-27", 40.0, "Food")]
}

/// Writes `contents` into a fresh temp dir and returns both; keep the dir alive.
pub fn fixture(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let file = dir.child(name);
    file.write_str(contents).expect("write fixture");
    let path = file.path().to_path_buf();
    (dir, path)
}
