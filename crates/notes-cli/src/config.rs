use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use notes_core::storage::{StoreOptions, UnreadablePolicy, DEFAULT_EXTENSION};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub list: ListSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: Option<String>,
    pub extension: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListSection {
    pub default_limit: Option<usize>,
    #[serde(default)]
    pub on_unreadable: OnUnreadable,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnUnreadable {
    #[default]
    Skip,
    Fail,
}

impl From<OnUnreadable> for UnreadablePolicy {
    fn from(value: OnUnreadable) -> Self {
        match value {
            OnUnreadable::Skip => UnreadablePolicy::Skip,
            OnUnreadable::Fail => UnreadablePolicy::FailFast,
        }
    }
}

impl NotesConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions::new()
            .extension(
                self.store
                    .extension
                    .clone()
                    .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            )
            .unreadable(self.list.on_unreadable.into())
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

/// Resolve the config file path, checking NOTES_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("NOTES_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config() -> anyhow::Result<NotesConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        return Ok(NotesConfig::default());
    }
    read_config(&path)
}

pub fn read_config(path: &Path) -> anyhow::Result<NotesConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notes"));
        }
    }
    Ok(home_dir()?.join(".config").join("notes"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("notes"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("notes"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: NotesConfig = toml::from_str(
            r#"
            [store]
            path = "/tmp/notes"
            extension = "note"

            [list]
            default_limit = 25
            on_unreadable = "fail"
            "#,
        )
        .unwrap();

        assert_eq!(config.store.path.as_deref(), Some("/tmp/notes"));
        assert_eq!(config.list.default_limit, Some(25));

        let options = config.store_options();
        assert_eq!(options.extension, "note");
        assert_eq!(options.unreadable, UnreadablePolicy::FailFast);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: NotesConfig = toml::from_str("").unwrap();

        assert!(config.store.path.is_none());
        assert_eq!(config.list.on_unreadable, OnUnreadable::Skip);
        assert_eq!(config.store_options(), StoreOptions::default());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result: Result<NotesConfig, _> = toml::from_str("[list]\non_unreadable = \"ignore\"\n");
        assert!(result.is_err());
    }
}
