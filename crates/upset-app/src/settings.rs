//! Application settings

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// Startup settings, read from an optional JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Manifest listing dataset descriptors; the built-in demo datasets are
    /// offered when unset
    pub manifest: Option<PathBuf>,
    /// Dataset loaded at startup, the first offered one when unset
    pub initial_dataset: Option<String>,
    /// Print the history position after every command
    pub echo_history: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            manifest: None,
            initial_dataset: None,
            echo_history: true,
        }
    }
}

impl AppSettings {
    /// Read settings from `path`, or use the defaults when no path is given
    ///
    /// A relative manifest path is resolved against the settings file.
    pub async fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = tokio::fs::read_to_string(path).await?;
        let mut settings: AppSettings = serde_json::from_str(&text)?;
        if let (Some(manifest), Some(base)) = (settings.manifest.as_mut(), path.parent()) {
            if manifest.is_relative() {
                *manifest = base.join(&*manifest);
            }
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_without_file() {
        let settings = AppSettings::load(None).await.unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(settings.echo_history);
    }

    #[tokio::test]
    async fn test_partial_file_resolves_manifest() {
        let dir = std::env::temp_dir().join(format!("upset-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("upset.json");
        std::fs::write(&path, r#"{"manifest": "data/datasets.json", "echo_history": false}"#).unwrap();

        let settings = AppSettings::load(Some(&path)).await.unwrap();
        assert_eq!(settings.manifest, Some(dir.join("data/datasets.json")));
        assert_eq!(settings.initial_dataset, None);
        assert!(!settings.echo_history);

        std::fs::remove_dir_all(dir).ok();
    }
}
