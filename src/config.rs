use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// file locations for the two backing tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub loans_path: PathBuf,
    pub payments_path: PathBuf,
}

impl StoreConfig {
    /// default table names under a data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let dir = data_dir.as_ref();
        Self {
            loans_path: dir.join("loans.csv"),
            payments_path: dir.join("loan_payments.csv"),
        }
    }

    /// explicit paths for both tables
    pub fn with_paths<P: Into<PathBuf>, Q: Into<PathBuf>>(loans: P, payments: Q) -> Self {
        Self {
            loans_path: loans.into(),
            payments_path: payments.into(),
        }
    }
}

/// engine behavior switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookConfig {
    /// accumulate total_paid_principal / total_paid_interest on each payment.
    /// off by default: the stored totals then stay at their created values.
    pub track_payment_totals: bool,
}

impl BookConfig {
    pub fn tracking_totals() -> Self {
        Self {
            track_payment_totals: true,
        }
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            track_payment_totals: false,
        }
    }
}
