//! Providers of loaded datasets

use std::sync::Arc;
use ahash::AHashMap;
use parking_lot::RwLock;

use crate::{Data, DataError, DataSetInfo};

/// Trait for dataset providers
pub trait DataProvider: Send + Sync {
    /// Load the dataset described by `info`
    fn load(&self, info: &DataSetInfo) -> Result<Data, DataError>;

    /// Names of the datasets this provider can load
    fn names(&self) -> Vec<String>;
}

/// Provider serving datasets already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    datasets: Arc<RwLock<AHashMap<String, Data>>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a dataset under its own name
    pub fn insert(&self, data: Data) {
        self.datasets.write().insert(data.name.clone(), data);
    }
}

impl DataProvider for InMemoryProvider {
    fn load(&self, info: &DataSetInfo) -> Result<Data, DataError> {
        self.datasets
            .read()
            .get(&info.name)
            .cloned()
            .ok_or_else(|| DataError::DatasetNotFound(info.name.clone()))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.datasets.read().keys().cloned().collect();
        names.sort();
        names
    }
}
