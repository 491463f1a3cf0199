use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::category::Category;
use crate::date::ReceiptDate;
use crate::money::Money;

/// Outcome of proposing a name for one receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameStatus {
    /// First use of this base name in the batch.
    Renamed,
    /// The OCR backend failed; the record carries the fallback name.
    SkippedNoData,
    /// Base name already issued in this batch; a " (N)" suffix was added.
    CollisionResolved,
}

impl std::fmt::Display for RenameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenameStatus::Renamed => write!(f, "renamed"),
            RenameStatus::SkippedNoData => write!(f, "skipped_no_data"),
            RenameStatus::CollisionResolved => write!(f, "collision_resolved"),
        }
    }
}

impl std::str::FromStr for RenameStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "renamed" => Ok(RenameStatus::Renamed),
            "skipped_no_data" => Ok(RenameStatus::SkippedNoData),
            "collision_resolved" => Ok(RenameStatus::CollisionResolved),
            other => Err(format!("Unknown rename status: '{other}'")),
        }
    }
}

/// The result of one pipeline pass over one source file.
///
/// Every record carries exactly one category (`Other` when nothing
/// matched); date and amount are absent when no parseable pattern
/// exists in the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub source: PathBuf,
    pub category: Category,
    pub date: Option<ReceiptDate>,
    pub amount: Option<Money>,
    /// Final proposed file name, extension included, unique within the
    /// batch that produced it.
    pub new_name: String,
    pub status: RenameStatus,
}

impl ReceiptRecord {
    /// Date as shown in file names: canonical form or "Unknown Date".
    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Unknown Date".to_string())
    }

    /// Amount as shown in file names: "$X.YZ" or "$0.00" when absent.
    pub fn amount_label(&self) -> String {
        self.amount.unwrap_or_else(Money::zero).to_string()
    }
}
