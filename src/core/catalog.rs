use crate::core::{CatalogStore, Placeable, Storage};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::validate_placeable_name;
use std::collections::HashMap;

/// Immutable placeable catalog, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    placeables: Vec<Placeable>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_placeables(placeables: Vec<Placeable>) -> Result<Self> {
        let mut index = HashMap::with_capacity(placeables.len());

        for (i, placeable) in placeables.iter().enumerate() {
            validate_placeable_name(&placeable.name).map_err(|_| CalcError::CatalogError {
                message: format!("entry {} has an empty name", i),
            })?;

            if index.insert(placeable.name.clone(), i).is_some() {
                return Err(CalcError::CatalogError {
                    message: format!("duplicate placeable '{}'", placeable.name),
                });
            }
        }

        Ok(Self { placeables, index })
    }

    /// 解析 JSON 陣列 `[{"name": ..., "resources": {...}}]`
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let placeables: Vec<Placeable> =
            serde_json::from_slice(data).map_err(|e| CalcError::CatalogError {
                message: format!("invalid catalog JSON: {}", e),
            })?;
        Self::from_placeables(placeables)
    }

    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        tracing::debug!("Reading catalog from storage: {}", path);
        let data = storage.read_file(path).await?;
        let catalog = Self::from_json_slice(&data)?;
        tracing::info!("📦 Loaded {} placeables from {}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.placeables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placeables.is_empty()
    }
}

impl CatalogStore for Catalog {
    fn get_all(&self) -> &[Placeable] {
        &self.placeables
    }

    fn get(&self, name: &str) -> Option<&Placeable> {
        self.index.get(name).map(|&i| &self.placeables[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &[u8]) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                CalcError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }
    }

    const SAMPLE: &str = r#"[
        {"name": "Wall", "resources": {"Concrete": 10, "Steel": 2}},
        {"name": "Door", "resources": {"Steel": 5, "Glass": 1}},
        {"name": "Marker", "resources": {}}
    ]"#;

    #[test]
    fn test_get_all_keeps_definition_order() {
        let catalog = Catalog::from_json_slice(SAMPLE.as_bytes()).unwrap();

        let names: Vec<&str> = catalog.get_all().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Wall", "Door", "Marker"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_get_by_name() {
        let catalog = Catalog::from_json_slice(SAMPLE.as_bytes()).unwrap();

        let door = catalog.get("Door").unwrap();
        assert_eq!(door.resources.get("Steel"), Some(&5));
        assert!(catalog.get("door").is_none());
        assert!(catalog.get("Nonexistent").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let data = r#"[{"name": "Wall", "resources": {}}, {"name": "Wall", "resources": {}}]"#;
        let err = Catalog::from_json_slice(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CalcError::CatalogError { .. }));
        assert!(err.to_string().contains("Wall"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let data = r#"[{"name": " ", "resources": {"Steel": 1}}]"#;
        assert!(Catalog::from_json_slice(data.as_bytes()).is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let data = r#"[{"name": "Wall", "resources": {"Steel": -1}}]"#;
        assert!(matches!(
            Catalog::from_json_slice(data.as_bytes()),
            Err(CalcError::CatalogError { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_from_local_storage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("placeables.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let storage = LocalStorage::new(".".to_string());
        let catalog = Catalog::load(&storage, path.to_str().unwrap()).await.unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[tokio::test]
    async fn test_load_from_storage() {
        let storage = MockStorage::with_file("placeables.json", SAMPLE.as_bytes());

        let catalog = Catalog::load(&storage, "placeables.json").await.unwrap();
        assert!(catalog.get("Wall").is_some());

        let missing = Catalog::load(&storage, "other.json").await;
        assert!(matches!(missing, Err(CalcError::IoError(_))));
    }
}
