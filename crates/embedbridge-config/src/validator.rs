//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_bridge(config, &mut result);
        Self::validate_browser(config, &mut result);

        result
    }

    fn validate_bridge(config: &Config, result: &mut ValidationResult) {
        let bridge = &config.bridge;

        if let Some(id) = &bridge.object_id {
            if id.is_empty() {
                result.add_error(ValidationError::new(
                    "bridge.object_id",
                    "object_id cannot be empty",
                ));
            } else if id.contains(['\'', '\\']) {
                // Ids are embedded verbatim inside ['...'].
                result.add_warning(ValidationWarning::new(
                    "bridge.object_id",
                    "object_id contains quote or backslash characters and will break generated statements",
                ));
            }
        }

        if let Some(key) = &bridge.scope_key {
            if key.contains(['(', ')', ';', '=', '\'']) {
                result.add_warning(ValidationWarning::new(
                    "bridge.scope_key",
                    format!("scope_key '{}' contains statement syntax characters", key),
                ));
            }
        }

        if let Some(prefix) = &bridge.root_prefix {
            if !prefix.ends_with('.') {
                result.add_error(ValidationError::new(
                    "bridge.root_prefix",
                    "root_prefix must end with '.'",
                ));
            }
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let browser = &config.browser;

        if !browser.endpoint.starts_with("http://") && !browser.endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http:// or https://",
            ));
        }

        if browser.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "browser.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }

        if browser.target_id.is_some() && browser.url.is_some() {
            result.add_warning(ValidationWarning::new(
                "browser.url",
                "url is loaded into the attached target page",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let result = ConfigValidator::validate(&Config::default());
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_empty_object_id() {
        let mut config = Config::default();
        config.bridge.object_id = Some(String::new());

        let result = ConfigValidator::validate(&config);
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "bridge.object_id"));
    }

    #[test]
    fn test_validate_quoted_object_id_warning() {
        let mut config = Config::default();
        config.bridge.object_id = Some("it's".to_string());

        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "bridge.object_id"));
    }

    #[test]
    fn test_validate_scope_key_warning() {
        let mut config = Config::default();
        config.bridge.scope_key = Some("Page;alert(1)".to_string());

        let result = ConfigValidator::validate(&config);
        assert!(result.warnings.iter().any(|w| w.path == "bridge.scope_key"));
    }

    #[test]
    fn test_validate_root_prefix() {
        let mut config = Config::default();
        config.bridge.root_prefix = Some("document['p']".to_string());

        let result = ConfigValidator::validate(&config);
        assert!(result.errors.iter().any(|e| e.path == "bridge.root_prefix"));
    }

    #[test]
    fn test_validate_invalid_endpoint() {
        let mut config = Config::default();
        config.browser.endpoint = "localhost:9222".to_string();

        let result = ConfigValidator::validate(&config);
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "browser.endpoint"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.browser.timeout_secs = 0;

        let result = ConfigValidator::validate(&config);
        assert!(result.errors.iter().any(|e| e.path == "browser.timeout_secs"));
    }

    #[test]
    fn test_validation_error_new() {
        let err = ValidationError::new("bridge.object_id", "required");
        assert_eq!(err.path, "bridge.object_id");
        assert_eq!(err.message, "required");
    }
}
