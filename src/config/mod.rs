//! Configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration for cardex.
///
/// Read-only once constructed; the store and validator take what they need
/// at construction time and no global state is involved.
#[derive(Debug, Clone)]
pub struct CardexConfig {
    /// Path to the snapshot file.
    pub data_file: PathBuf,
    /// Allowed category values.
    pub categories: Vec<String>,
    /// Allowed status values.
    pub statuses: Vec<String>,
    /// Whether `create` requires a value strictly greater than zero.
    pub require_value_on_create: bool,
}

impl Default for CardexConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("catalog.json"),
            categories: vec![
                "tradicional".to_string(),
                "doce".to_string(),
                "vegana".to_string(),
                "vegetariana".to_string(),
                "especial".to_string(),
                "gourmet".to_string(),
            ],
            statuses: vec![
                "disponivel".to_string(),
                "indisponivel".to_string(),
                "promocao".to_string(),
            ],
            require_value_on_create: true,
        }
    }
}

impl CardexConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::Persistence {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::Persistence {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Converts a `ConfigFile` to `CardexConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_file) = file.data_file {
            config.data_file = PathBuf::from(data_file);
        }
        if let Some(categories) = file.categories {
            config.categories = categories;
        }
        if let Some(statuses) = file.statuses {
            config.statuses = statuses;
        }
        if let Some(v) = file.require_value_on_create {
            config.require_value_on_create = v;
        }

        config
    }

    /// Sets the snapshot file path.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Sets the allowed category values.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Sets the allowed status values.
    #[must_use]
    pub fn with_statuses(mut self, statuses: Vec<String>) -> Self {
        self.statuses = statuses;
        self
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Snapshot file path.
    pub data_file: Option<String>,
    /// Allowed category values.
    pub categories: Option<Vec<String>>,
    /// Allowed status values.
    pub statuses: Option<Vec<String>>,
    /// Whether `create` requires a positive value.
    pub require_value_on_create: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_sets() {
        let config = CardexConfig::default();
        assert!(config.categories.contains(&"tradicional".to_string()));
        assert!(config.statuses.contains(&"promocao".to_string()));
        assert!(config.require_value_on_create);
    }

    #[test]
    fn test_load_from_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "data_file = \"items.json\"\nstatuses = [\"ativo\", \"inativo\"]"
        )
        .unwrap();

        let config = CardexConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.data_file, PathBuf::from("items.json"));
        assert_eq!(config.statuses, vec!["ativo", "inativo"]);
        // Untouched keys keep their defaults
        assert_eq!(config.categories.len(), 6);
    }

    #[test]
    fn test_load_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_file = [not toml").unwrap();

        let result = CardexConfig::load_from_file(file.path());
        assert!(matches!(result, Err(crate::Error::Persistence { .. })));
    }

    #[test]
    fn test_builder_setters() {
        let config = CardexConfig::new()
            .with_data_file("/tmp/c.json")
            .with_statuses(vec!["on".to_string()]);
        assert_eq!(config.data_file, PathBuf::from("/tmp/c.json"));
        assert_eq!(config.statuses, vec!["on"]);
    }
}
