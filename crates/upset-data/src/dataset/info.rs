//! Dataset descriptors and manifest discovery

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Dataset description as published next to the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSetJson {
    pub file: String,
    pub name: String,
    #[serde(default)]
    pub header: usize,
    #[serde(default = "default_separator")]
    pub separator: String,
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub meta: Vec<MetaDescriptor>,
    #[serde(default)]
    pub sets: Vec<SetDescriptor>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
}

fn default_separator() -> String {
    ";".to_string()
}

/// A metadata column of the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub index: usize,
    pub name: String,
}

/// A range of set-membership columns of the data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDescriptor {
    pub format: String,
    pub start: usize,
    pub end: usize,
}

/// Summary of a dataset shown in the dataset selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetInfo {
    pub name: String,
    pub file: String,
    pub set_count: usize,
    pub attribute_count: usize,
    pub author: String,
    pub description: String,
    pub source: String,
}

impl DataSetJson {
    /// Parse and validate a descriptor
    pub fn parse(text: &str) -> Result<Self, DataError> {
        let json: DataSetJson = serde_json::from_str(text)?;
        if json.name.trim().is_empty() {
            return Err(DataError::InvalidDescriptor("missing dataset name".to_string()));
        }
        if let Some(bad) = json.sets.iter().find(|s| s.end < s.start) {
            return Err(DataError::InvalidDescriptor(format!(
                "set columns {}..{} of '{}' are reversed",
                bad.start, bad.end, json.name
            )));
        }
        Ok(json)
    }
}

impl From<&DataSetJson> for DataSetInfo {
    fn from(json: &DataSetJson) -> Self {
        let set_count = json
            .sets
            .iter()
            .filter(|s| s.format == "binary")
            .map(|s| s.end - s.start + 1)
            .sum();

        Self {
            name: json.name.clone(),
            file: json.file.clone(),
            set_count,
            attribute_count: json.meta.len(),
            author: json.author.clone(),
            description: json.description.clone(),
            source: json.source.clone(),
        }
    }
}

/// Read a manifest listing descriptor paths and parse every descriptor
///
/// Descriptor paths are resolved relative to the manifest's directory. The
/// descriptors are read concurrently; the result keeps manifest order.
pub async fn discover(manifest: &Path) -> Result<Vec<DataSetInfo>, DataError> {
    let text = tokio::fs::read_to_string(manifest).await?;
    let entries: Vec<String> = serde_json::from_str(&text)?;
    let base = manifest.parent().map(Path::to_path_buf).unwrap_or_default();

    let handles: Vec<_> = entries
        .into_iter()
        .map(|entry| {
            let path: PathBuf = base.join(entry);
            tokio::spawn(async move {
                let text = tokio::fs::read_to_string(&path).await?;
                DataSetJson::parse(&text)
            })
        })
        .collect();

    let mut datasets = Vec::with_capacity(handles.len());
    for handle in handles {
        let json = handle.await??;
        datasets.push(DataSetInfo::from(&json));
    }

    tracing::info!("Discovered {} dataset(s) from {}", datasets.len(), manifest.display());
    Ok(datasets)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIES: &str = r#"{
        "file": "movies.csv",
        "name": "Movies",
        "header": 0,
        "separator": ";",
        "skip": 0,
        "meta": [
            {"type": "id", "index": 0, "name": "Name"},
            {"type": "integer", "index": 1, "name": "ReleaseDate"}
        ],
        "sets": [{"format": "binary", "start": 2, "end": 18}],
        "author": "GroupLens",
        "description": "Movie genres",
        "source": "movielens"
    }"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("upset-data-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_info_from_descriptor() {
        let json = DataSetJson::parse(MOVIES).unwrap();
        let info = DataSetInfo::from(&json);

        assert_eq!(info.name, "Movies");
        assert_eq!(info.set_count, 17);
        assert_eq!(info.attribute_count, 2);
    }

    #[test]
    fn test_reversed_set_range_is_rejected() {
        let text = r#"{"file": "f.csv", "name": "Bad", "sets": [{"format": "binary", "start": 5, "end": 2}]}"#;
        assert!(matches!(DataSetJson::parse(text), Err(DataError::InvalidDescriptor(_))));
    }

    #[tokio::test]
    async fn test_discover_keeps_manifest_order() {
        let dir = scratch_dir("discover");
        std::fs::write(dir.join("movies.json"), MOVIES).unwrap();
        std::fs::write(
            dir.join("mutations.json"),
            r#"{"file": "mutations.csv", "name": "Mutations", "sets": [{"format": "binary", "start": 1, "end": 3}]}"#,
        )
        .unwrap();
        std::fs::write(dir.join("datasets.json"), r#"["mutations.json", "movies.json"]"#).unwrap();

        let infos = discover(&dir.join("datasets.json")).await.unwrap();
        let names: Vec<&str> = infos.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Mutations", "Movies"]);
        assert_eq!(infos[0].set_count, 3);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_discover_missing_descriptor_fails() {
        let dir = scratch_dir("missing");
        std::fs::write(dir.join("datasets.json"), r#"["nope.json"]"#).unwrap();

        assert!(matches!(discover(&dir.join("datasets.json")).await, Err(DataError::Io(_))));

        std::fs::remove_dir_all(dir).ok();
    }
}
