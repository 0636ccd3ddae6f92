//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ScanConfig;
use std::path::Path;

/// The configuration file name looked up in a design directory.
pub const CONFIG_FILE_NAME: &str = "vscan.toml";

/// Loads the configuration for a design directory.
///
/// Reads `<design_dir>/vscan.toml` if it exists; otherwise returns the defaults.
pub fn load_config(design_dir: &Path) -> Result<ScanConfig, ConfigError> {
    let config_path = design_dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Ok(ScanConfig::default());
    }
    load_config_file(&config_path)
}

/// Loads and validates a configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<ScanConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `vscan.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<ScanConfig, ConfigError> {
    let config: ScanConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Rejects empty lists and empty entries where a match against them would be meaningless.
fn validate_config(config: &ScanConfig) -> Result<(), ConfigError> {
    check_list("scan.extensions", &config.scan.extensions)?;
    check_list("clock.name_hints", &config.clock.name_hints)?;
    if config.report.log_file.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "report.log_file is empty".to_string(),
        ));
    }
    Ok(())
}

fn check_list(field: &str, values: &[String]) -> Result<(), ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::ValidationError(format!("{field} is empty")));
    }
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ConfigError::ValidationError(format!(
            "{field} contains an empty entry"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn empty_config_is_default() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.scan.extensions, vec!["v"]);
        assert_eq!(config.clock.name_hints, vec!["clk", "clock"]);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[scan]
extensions = ["v", "sv"]
filter_testbenches = false
exclude = ["sim/", "vendor/"]

[clock]
name_hints = ["clk", "clock", "ck"]

[report]
log_file = "logs/scan.jsonl"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.scan.extensions, vec!["v", "sv"]);
        assert!(!config.scan.filter_testbenches);
        assert_eq!(config.scan.exclude.len(), 2);
        assert_eq!(config.clock.name_hints.len(), 3);
        assert_eq!(config.report.log_file, PathBuf::from("logs/scan.jsonl"));
    }

    #[test]
    fn empty_extension_list_errors() {
        let err = load_config_from_str("[scan]\nextensions = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn blank_name_hint_errors() {
        let err = load_config_from_str("[clock]\nname_hints = [\"clk\", \" \"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_file_in_dir_gives_defaults() {
        let config = load_config(Path::new("/nonexistent/dir")).unwrap();
        assert!(config.scan.filter_testbenches);
    }

    #[test]
    fn io_error_from_explicit_missing_file() {
        let err = load_config_file(Path::new("/nonexistent/dir/vscan.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
