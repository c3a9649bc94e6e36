//! Render configuration and its session-scoped storage
//!
//! The configuration is stored JSON-encoded under a single key of a
//! [`SessionStorage`], created with defaults the first time it is read.

use std::sync::Arc;
use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Key the render configuration is stored under
pub const RENDER_CONFIG_KEY: &str = "render_config";

/// How rows are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateBy {
    None,
    Degree,
    Sets,
    DeviationBins,
    Overlaps,
}

/// How subsets are ordered within their group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    Cardinality,
    Degree,
    Deviation,
    /// Subsets containing the set at this used-set index first
    Set(usize),
}

/// Aggregation, filter and sort options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub first_aggregate_by: AggregateBy,
    /// Overlap degree used when the first aggregation is `Overlaps`
    pub first_overlap: usize,
    pub second_aggregate_by: AggregateBy,
    pub second_overlap: usize,
    pub sort_by: SortBy,
    pub min_degree: usize,
    /// Upper degree bound, unbounded when `None`
    pub max_degree: Option<usize>,
    pub hide_empties: bool,
    /// Name of the dataset the configuration was last used with
    pub current_file: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            first_aggregate_by: AggregateBy::Degree,
            first_overlap: 2,
            second_aggregate_by: AggregateBy::None,
            second_overlap: 2,
            sort_by: SortBy::Cardinality,
            min_degree: 0,
            max_degree: None,
            hide_empties: false,
            current_file: None,
        }
    }
}

impl RenderConfig {
    /// Whether a subset of this degree passes the degree filters
    pub fn accepts_degree(&self, degree: usize) -> bool {
        degree >= self.min_degree && self.max_degree.map_or(true, |max| degree <= max)
    }
}

/// Process-wide string key/value store living for the session
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    entries: Arc<RwLock<AHashMap<String, String>>>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }
}

/// Typed access to the render configuration inside a session store
#[derive(Debug, Clone)]
pub struct RenderConfigStore {
    storage: SessionStorage,
}

impl RenderConfigStore {
    pub fn new(storage: SessionStorage) -> Self {
        Self { storage }
    }

    /// Read the configuration, storing the defaults first if absent
    pub fn load(&self) -> Result<RenderConfig, DataError> {
        if let Some(json) = self.storage.get(RENDER_CONFIG_KEY) {
            return Ok(serde_json::from_str(&json)?);
        }

        let config = RenderConfig::default();
        tracing::debug!("Initializing render config with defaults");
        self.save(&config)?;
        Ok(config)
    }

    /// Replace the stored configuration
    pub fn save(&self, config: &RenderConfig) -> Result<(), DataError> {
        let json = serde_json::to_string(config)?;
        self.storage.set(RENDER_CONFIG_KEY, json);
        Ok(())
    }

    /// Read-modify-write under one lock, returning the stored result
    pub fn update<F>(&self, f: F) -> Result<RenderConfig, DataError>
    where
        F: FnOnce(&mut RenderConfig),
    {
        let mut entries = self.storage.entries.write();
        let mut config = match entries.get(RENDER_CONFIG_KEY) {
            Some(json) => serde_json::from_str(json)?,
            None => RenderConfig::default(),
        };
        f(&mut config);
        entries.insert(RENDER_CONFIG_KEY.to_string(), serde_json::to_string(&config)?);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_initializes_defaults_lazily() {
        let storage = SessionStorage::new();
        let store = RenderConfigStore::new(storage.clone());
        assert!(!storage.contains(RENDER_CONFIG_KEY));

        let config = store.load().unwrap();
        assert_eq!(config, RenderConfig::default());
        assert!(storage.contains(RENDER_CONFIG_KEY));
    }

    #[test]
    fn test_save_then_load() {
        let store = RenderConfigStore::new(SessionStorage::new());
        let mut config = store.load().unwrap();
        config.sort_by = SortBy::Set(2);
        config.max_degree = Some(3);
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_update_is_read_modify_write() {
        let store = RenderConfigStore::new(SessionStorage::new());
        store.update(|c| c.hide_empties = true).unwrap();
        let config = store.update(|c| c.min_degree = 2).unwrap();

        assert!(config.hide_empties);
        assert_eq!(config.min_degree, 2);
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_stores_share_session() {
        let storage = SessionStorage::new();
        let a = RenderConfigStore::new(storage.clone());
        let b = RenderConfigStore::new(storage);
        a.update(|c| c.current_file = Some("movies".into())).unwrap();

        assert_eq!(b.load().unwrap().current_file.as_deref(), Some("movies"));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let storage = SessionStorage::new();
        storage.set(RENDER_CONFIG_KEY, r#"{"hide_empties":true}"#);
        let config = RenderConfigStore::new(storage).load().unwrap();

        assert!(config.hide_empties);
        assert_eq!(config.sort_by, SortBy::Cardinality);
    }

    #[test]
    fn test_degree_filter() {
        let config = RenderConfig {
            min_degree: 1,
            max_degree: Some(2),
            ..RenderConfig::default()
        };
        assert!(!config.accepts_degree(0));
        assert!(config.accepts_degree(2));
        assert!(!config.accepts_degree(3));
    }
}
