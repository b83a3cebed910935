use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use swing_domain::{GolferProfile, GolferRecord};
use tracing::{debug, warn};

use crate::error::RegistryError;

/// Column order of the registry file.
pub const REGISTRY_HEADER: [&str; 8] = [
    "golfer_id",
    "height_cm",
    "weight_kg",
    "gender",
    "age",
    "handicap",
    "years_playing",
    "dominant_hand",
];

/// Append-only storage behind [`crate::GolferRegistry`].
pub trait GolferStore {
    fn append(&mut self, record: &GolferRecord) -> Result<(), RegistryError>;

    fn records(&self) -> Result<Vec<GolferRecord>, RegistryError>;

    fn find(&self, golfer_id: &str) -> Result<Option<GolferRecord>, RegistryError> {
        Ok(self
            .records()?
            .into_iter()
            .find(|record| record.golfer_id == golfer_id))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<GolferRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GolferStore for MemoryStore {
    fn append(&mut self, record: &GolferRecord) -> Result<(), RegistryError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn records(&self) -> Result<Vec<GolferRecord>, RegistryError> {
        Ok(self.records.clone())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    golfer_id: String,
    height_cm: f32,
    weight_kg: f32,
    gender: String,
    age: u32,
    handicap: f32,
    years_playing: f32,
    dominant_hand: String,
}

impl From<&GolferRecord> for CsvRow {
    fn from(record: &GolferRecord) -> Self {
        let profile = &record.profile;
        Self {
            golfer_id: record.golfer_id.clone(),
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            gender: profile.gender.clone(),
            age: profile.age,
            handicap: profile.handicap,
            years_playing: profile.years_playing,
            dominant_hand: profile.dominant_hand.clone(),
        }
    }
}

impl From<CsvRow> for GolferRecord {
    fn from(row: CsvRow) -> Self {
        GolferRecord::new(
            row.golfer_id,
            GolferProfile {
                height_cm: row.height_cm,
                weight_kg: row.weight_kg,
                gender: row.gender,
                age: row.age,
                handicap: row.handicap,
                years_playing: row.years_playing,
                dominant_hand: row.dominant_hand,
            },
        )
    }
}

/// Registry persisted as a CSV table with a fixed header row.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Opens the table, creating it (and its directory) with a header if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| RegistryError::io(parent, err))?;
        }
        if !path.exists() {
            debug!(path = %path.display(), "creating golfer registry");
            let mut writer =
                csv::Writer::from_path(&path).map_err(|err| RegistryError::csv(&path, err))?;
            writer
                .write_record(REGISTRY_HEADER)
                .map_err(|err| RegistryError::csv(&path, err))?;
            writer.flush().map_err(|err| RegistryError::io(&path, err))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GolferStore for CsvStore {
    fn append(&mut self, record: &GolferRecord) -> Result<(), RegistryError> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|err| RegistryError::io(&self.path, err))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .serialize(CsvRow::from(record))
            .map_err(|err| RegistryError::csv(&self.path, err))?;
        writer
            .flush()
            .map_err(|err| RegistryError::io(&self.path, err))
    }

    fn records(&self) -> Result<Vec<GolferRecord>, RegistryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|err| RegistryError::csv(&self.path, err))?;
        let mut records = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            match row {
                Ok(row) => records.push(GolferRecord::from(row)),
                Err(err) if err.is_io_error() => {
                    return Err(RegistryError::csv(&self.path, err));
                }
                Err(err) => warn!(
                    path = %self.path.display(),
                    line = err.position().map(|pos| pos.line()),
                    error = %err,
                    "skipping unreadable golfer row"
                ),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: &str) -> GolferRecord {
        GolferRecord::new(
            id,
            GolferProfile {
                height_cm: 180.3,
                weight_kg: 82.1,
                gender: "m".to_string(),
                age: 42,
                handicap: 9.4,
                years_playing: 20.0,
                dominant_hand: "left".to_string(),
            },
        )
    }

    #[test]
    fn memory_store_finds_by_exact_id() {
        let mut store = MemoryStore::new();
        store.append(&record("abcd1234")).unwrap();
        assert!(store.find("abcd1234").unwrap().is_some());
        assert!(store.find("abcd").unwrap().is_none());
    }

    #[test]
    fn csv_store_writes_header_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("golfer_metadata.csv");
        let mut store = CsvStore::open(&path).unwrap();
        store.append(&record("abcd1234")).unwrap();
        let _reopened = CsvStore::open(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "golfer_id,height_cm,weight_kg,gender,age,handicap,years_playing,dominant_hand"
        );
        assert!(lines.next().unwrap().starts_with("abcd1234,180.3,82.1,m,42,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn csv_store_reads_back_appended_records() {
        let dir = tempdir().unwrap();
        let mut store = CsvStore::open(dir.path().join("golfers.csv")).unwrap();
        store.append(&record("one")).unwrap();
        store.append(&record("two")).unwrap();
        let records = store.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(store.find("two").unwrap().unwrap(), record("two"));
    }

    #[test]
    fn csv_store_reads_rows_written_by_other_tools() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("golfers.csv");
        fs::write(
            &path,
            "golfer_id,height_cm,weight_kg,gender,age,handicap,years_playing,dominant_hand\n\
             9f2c01ab,165.0,60.5,female,28,22.0,3.0,right\n",
        )
        .unwrap();
        let store = CsvStore::open(&path).unwrap();
        let found = store.find("9f2c01ab").unwrap().unwrap();
        assert_eq!(found.profile.gender, "female");
        assert_eq!(found.profile.height_cm, 165.0);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("golfers.csv");
        fs::write(
            &path,
            "golfer_id,height_cm,weight_kg,gender,age,handicap,years_playing,dominant_hand\n\
             aaaa1111,170.0,70.0,male,35,12.0,8.0,right\n\
             bbbb2222,180.0,80.0,male,30.0,,,left\n\
             cccc3333,160.0,55.0,female,25,20.0,2.0,right\n",
        )
        .unwrap();
        let store = CsvStore::open(&path).unwrap();
        let ids: Vec<_> = store
            .records()
            .unwrap()
            .into_iter()
            .map(|record| record.golfer_id)
            .collect();
        assert_eq!(ids, vec!["aaaa1111", "cccc3333"]);
        assert!(store.find("aaaa1111").unwrap().is_some());
        assert!(store.find("bbbb2222").unwrap().is_none());
    }
}
