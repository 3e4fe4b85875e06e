//! Immutable in-memory store of client records.

use crate::error::RegistryError;
use crate::models::ClientRecord;

use hashbrown::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// An ordered, immutable collection of client records.
///
/// The store is populated once, before any query is served, and never mutated afterwards. Client
/// identifiers are unique within a store.
#[derive(Debug, Default)]
pub struct ClientStore {
    records: Vec<ClientRecord>,
}

impl ClientStore {
    /// Create a store from a sequence of records, preserving their order.
    ///
    /// Returns an error if two records share an identifier.
    pub fn new(records: Vec<ClientRecord>) -> Result<Self, RegistryError> {
        check_unique_ids(&records)?;
        Ok(Self { records })
    }

    /// Load a store from a file containing a JSON array of client records.
    ///
    /// # Arguments
    ///
    /// * `path`: Path to the JSON file
    #[tracing::instrument(level = "DEBUG", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RegistryError::ClientDataRead {
            path: path.display().to_string(),
            source,
        })?;
        let records: Vec<ClientRecord> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| RegistryError::ClientDataParse {
                path: path.display().to_string(),
                source,
            })?;
        let store = Self::new(records)?;
        tracing::info!("Loaded {} clients", store.len());
        Ok(store)
    }

    /// Returns all records in store order.
    pub fn records(&self) -> &[ClientRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Returns an error naming the first identifier shared by two records.
fn check_unique_ids(records: &[ClientRecord]) -> Result<(), RegistryError> {
    let mut ids = HashSet::with_capacity(records.len());
    for record in records {
        if !ids.insert(record.id.as_str()) {
            return Err(RegistryError::DuplicateClientId {
                id: record.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    use std::io::Write;

    // Write `contents` to a fresh file in the temporary directory and return its path.
    fn write_temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "kyc-registry-{}-{}.json",
            std::process::id(),
            name
        ));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn new_preserves_order() {
        let store = ClientStore::new(vec![test_utils::bob(), test_utils::alice()]).unwrap();
        assert_eq!(2, store.len());
        assert!(!store.is_empty());
        let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(vec!["C2", "C1"], ids);
    }

    #[test]
    fn new_empty() {
        let store = ClientStore::new(vec![]).unwrap();
        assert_eq!(0, store.len());
        assert!(store.is_empty());
    }

    #[test]
    fn new_duplicate_id() {
        let mut impostor = test_utils::bob();
        impostor.id = "C1".to_string();
        let error = ClientStore::new(vec![test_utils::alice(), impostor]).unwrap_err();
        assert_eq!("duplicate client id C1", error.to_string());
    }

    #[test]
    fn load_ok() {
        let json = serde_json::to_string(&vec![test_utils::alice(), test_utils::bob()]).unwrap();
        let path = write_temp_file("load-ok", &json);
        let store = ClientStore::load(&path).unwrap();
        assert_eq!(&[test_utils::alice(), test_utils::bob()][..], store.records());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn load_missing_file() {
        let path = std::env::temp_dir().join("kyc-registry-does-not-exist.json");
        let error = ClientStore::load(&path).unwrap_err();
        assert!(matches!(error, RegistryError::ClientDataRead { .. }));
    }

    #[test]
    fn load_invalid_json() {
        let path = write_temp_file("load-invalid", r#"[{"id": "C1"}]"#);
        let error = ClientStore::load(&path).unwrap_err();
        assert!(matches!(error, RegistryError::ClientDataParse { .. }));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn load_duplicate_id() {
        let json = serde_json::to_string(&vec![test_utils::alice(), test_utils::alice()]).unwrap();
        let path = write_temp_file("load-duplicate", &json);
        let error = ClientStore::load(&path).unwrap_err();
        assert!(matches!(error, RegistryError::DuplicateClientId { .. }));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn load_bundled_data() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/clients.json");
        let store = ClientStore::load(path).unwrap();
        assert!(!store.is_empty());
    }
}
