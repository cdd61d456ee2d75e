use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One finished round, written by the host when a round ends.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ScoreRecord {
    pub(crate) points: u32,
    pub(crate) timestamp_millis: u64,
    pub(crate) label: String,
}

/// Score history persisted as a JSON array on disk. The engine only ever
/// produces records; it never reads them back, so a missing or unreadable
/// file degrades to an empty history with a warning.
pub(crate) struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one record, rewriting the file wholesale.
    pub(crate) fn save(&self, record: &ScoreRecord) -> Result<()> {
        let mut records = self.read();
        records.push(record.clone());
        fs::write(&self.path, serde_json::to_vec_pretty(&records)?)?;
        log::info!(
            "saved score {} ({}) to {}",
            record.points,
            record.label,
            self.path.display()
        );
        Ok(())
    }

    /// All stored records, best first.
    pub(crate) fn load_all(&self) -> Vec<ScoreRecord> {
        let mut records = self.read();
        records.sort_by(|a, b| b.points.cmp(&a.points));
        records
    }

    fn read(&self) -> Vec<ScoreRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                log::warn!(
                    "score history at {} is unreadable ({}), starting fresh",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}
