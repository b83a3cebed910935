use swing_domain::{GolferProfile, GolferRecord};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::RegistryError;
use crate::store::GolferStore;

/// Length of generated golfer ids.
pub const GOLFER_ID_LEN: usize = 8;
const MAX_ID_ATTEMPTS: usize = 16;

/// Registers golfers once and looks them up by id. Records are never
/// rewritten or removed.
pub struct GolferRegistry<S: GolferStore> {
    store: S,
}

impl<S: GolferStore> GolferRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn register(&mut self, profile: GolferProfile) -> Result<String, RegistryError> {
        profile.validate()?;
        let existing = self.store.records()?;
        let golfer_id = (0..MAX_ID_ATTEMPTS)
            .map(|_| generate_id())
            .find(|candidate| {
                let taken = existing.iter().any(|record| &record.golfer_id == candidate);
                if taken {
                    debug!(golfer_id = %candidate, "golfer id collision, regenerating");
                }
                !taken
            })
            .ok_or(RegistryError::IdExhausted(MAX_ID_ATTEMPTS))?;
        self.store
            .append(&GolferRecord::new(golfer_id.clone(), profile))?;
        info!(golfer_id = %golfer_id, "registered golfer");
        Ok(golfer_id)
    }

    /// Absence is a normal outcome and yields `None`.
    pub fn lookup(&self, golfer_id: &str) -> Result<Option<GolferProfile>, RegistryError> {
        Ok(self.store.find(golfer_id)?.map(|record| record.profile))
    }
}

fn generate_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(GOLFER_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CsvStore, MemoryStore};
    use tempfile::tempdir;

    fn profile() -> GolferProfile {
        GolferProfile {
            height_cm: 172.0,
            weight_kg: 70.5,
            gender: "Female".to_string(),
            age: 35,
            handicap: 18.2,
            years_playing: 6.5,
            dominant_hand: "right".to_string(),
        }
    }

    #[test]
    fn register_then_lookup_returns_the_profile() {
        let mut registry = GolferRegistry::new(MemoryStore::new());
        let id = registry.register(profile()).unwrap();
        assert_eq!(id.len(), GOLFER_ID_LEN);
        assert_eq!(registry.lookup(&id).unwrap(), Some(profile()));
    }

    #[test]
    fn unknown_id_is_not_an_error() {
        let registry = GolferRegistry::new(MemoryStore::new());
        assert_eq!(registry.lookup("missing1").unwrap(), None);
    }

    #[test]
    fn ids_are_unique_and_records_append() {
        let mut registry = GolferRegistry::new(MemoryStore::new());
        let first = registry.register(profile()).unwrap();
        let second = registry.register(profile()).unwrap();
        assert_ne!(first, second);
        assert_eq!(registry.store().records().unwrap().len(), 2);
    }

    #[test]
    fn invalid_profile_is_not_written() {
        let mut registry = GolferRegistry::new(MemoryStore::new());
        let mut bad = profile();
        bad.weight_kg = -3.0;
        assert!(matches!(
            registry.register(bad),
            Err(RegistryError::InvalidProfile(_))
        ));
        assert!(registry.store().records().unwrap().is_empty());
    }

    #[test]
    fn csv_backed_registry_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("golfer_metadata.csv");
        let id = {
            let mut registry = GolferRegistry::new(CsvStore::open(&path).unwrap());
            registry.register(profile()).unwrap()
        };
        let registry = GolferRegistry::new(CsvStore::open(&path).unwrap());
        assert_eq!(registry.lookup(&id).unwrap(), Some(profile()));
    }
}
