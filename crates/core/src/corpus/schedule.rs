use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chapter::Chapter;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub code: String,
    pub description: String,
}

/// Optional national tariff schedule, grouped by chapter. Only used to widen the
/// reference code list handed to the arbitrator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TariffSchedule {
    chapters: BTreeMap<Chapter, Vec<ScheduleEntry>>,
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read tariff schedule {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tariff schedule: {0}")]
    Parse(String),
}

impl TariffSchedule {
    pub fn load(path: &Path) -> Result<Self, ScheduleError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ScheduleError::Read { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw)
    }

    /// Expects `{"Chapter 61": [{"code": "6109.10.00", "description": "..."}]}`.
    pub fn from_json_str(raw: &str) -> Result<Self, ScheduleError> {
        let parsed: BTreeMap<String, Vec<ScheduleEntry>> =
            serde_json::from_str(raw).map_err(|error| ScheduleError::Parse(error.to_string()))?;

        let mut chapters = BTreeMap::new();
        for (label, entries) in parsed {
            let chapter: Chapter =
                label.parse().map_err(|_| ScheduleError::Parse(format!("bad chapter key `{label}`")))?;
            if let Some(entry) = entries.iter().find(|entry| !chapter.owns_code(&entry.code)) {
                return Err(ScheduleError::Parse(format!(
                    "code `{}` is listed under {chapter}",
                    entry.code
                )));
            }
            chapters.insert(chapter, entries);
        }
        Ok(Self { chapters })
    }

    pub fn entries(&self, chapter: Chapter) -> &[ScheduleEntry] {
        self.chapters.get(&chapter).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn entry_count(&self) -> usize {
        self.chapters.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{ScheduleError, TariffSchedule};
    use crate::domain::chapter::Chapter;

    const SAMPLE: &str = r#"{
        "Chapter 91": [
            {"code": "9102.11.10", "description": "Wrist watches, mechanical display only"},
            {"code": "9102.12.80", "description": "Wrist watches, opto-electronic display"}
        ],
        "Chapter 09": [{"code": "0901.21.00", "description": "Coffee, roasted"}]
    }"#;

    #[test]
    fn parses_chapter_keyed_schedule() {
        let schedule = TariffSchedule::from_json_str(SAMPLE).expect("schedule parses");
        assert_eq!(schedule.chapter_count(), 2);
        assert_eq!(schedule.entry_count(), 3);
        assert_eq!(schedule.entries(Chapter::WATCHES).len(), 2);
        assert!(schedule.entries(Chapter::FOOTWEAR).is_empty());
    }

    #[test]
    fn rejects_codes_filed_under_the_wrong_chapter() {
        let raw = r#"{"Chapter 61": [{"code": "6205.20.20", "description": "Shirts"}]}"#;
        assert!(matches!(TariffSchedule::from_json_str(raw), Err(ScheduleError::Parse(_))));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write schedule");
        let schedule = TariffSchedule::load(file.path()).expect("load schedule");
        assert_eq!(schedule.entries(Chapter::COFFEE_TEA)[0].code, "0901.21.00");
    }
}
