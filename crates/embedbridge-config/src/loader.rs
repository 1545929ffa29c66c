//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Default location: `~/.embedbridge/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".embedbridge").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("embedbridge.toml"))
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        let mut result = content.to_string();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.embedbridge/logs`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use embedbridge_core::ArgumentEncoding;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.browser.endpoint, "http://localhost:9222");
        assert!(config.bridge.object_id.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [bridge]
            object_id = "panel1"
            scope_key = "Page"
            argument_encoding = "escaped"

            [browser]
            endpoint = "http://127.0.0.1:9333"
            url = "http://localhost:8000/app.html"
            timeout_secs = 10

            [logging]
            level = "debug"
            file = false
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.bridge.object_id.as_deref(), Some("panel1"));
        assert_eq!(config.bridge.scope_key.as_deref(), Some("Page"));
        assert_eq!(config.bridge.argument_encoding, ArgumentEncoding::Escaped);
        assert_eq!(config.browser.endpoint, "http://127.0.0.1:9333");
        assert_eq!(config.browser.timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[bridge]").unwrap();
        writeln!(file, "object_id = \"slControl\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.bridge.object_id.as_deref(), Some("slControl"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/embedbridge.toml")).unwrap();
        assert_eq!(config.browser.timeout_secs, 30);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_unknown_encoding() {
        let content = r#"
            [bridge]
            argument_encoding = "base64"
        "#;
        assert!(ConfigLoader::load_str(content).is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test-only variable with a unique name
        unsafe {
            std::env::set_var("EMBEDBRIDGE_TEST_OBJECT_ID", "plugin7");
        }
        let content = "[bridge]\nobject_id = \"${EMBEDBRIDGE_TEST_OBJECT_ID}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.bridge.object_id.as_deref(), Some("plugin7"));
        unsafe {
            std::env::remove_var("EMBEDBRIDGE_TEST_OBJECT_ID");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${EMBEDBRIDGE_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/logs");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/logs"));
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(ConfigLoader::default_path().ends_with("config.toml"));
    }
}
