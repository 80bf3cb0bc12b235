use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_RULESET: &str = "combined_baseline.yaml";

/// Which of the three input sources feeds the scan. The other two are
/// ignored even if populated.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    Upload,
    Path,
    Paste,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Upload => "upload",
            ScanMode::Path => "path",
            ScanMode::Paste => "paste",
        }
    }

    /// Parses a profile/wire value, rejecting anything outside the
    /// three allowed modes.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upload" => Some(ScanMode::Upload),
            "path" => Some(ScanMode::Path),
            "paste" => Some(ScanMode::Paste),
            _ => None,
        }
    }
}

/// Scan configuration edited by the operator.
///
/// Fields accept free-form writes; nothing is validated until a scan is
/// actually triggered via [`validate_for_scan`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub scan_mode: ScanMode,
    pub path: String,
    pub ruleset: String,
    pub approved_for_ai: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_mode: ScanMode::Upload,
            path: String::new(),
            ruleset: DEFAULT_RULESET.to_string(),
            approved_for_ai: false,
        }
    }
}

/// Checks that the input source selected by `scan_mode` is actually
/// populated. Called once, at scan trigger time, before any network I/O.
pub fn validate_for_scan(
    config: &ScanConfig,
    files: &[PathBuf],
    pasted: &str,
) -> Result<(), ClientError> {
    match config.scan_mode {
        ScanMode::Upload if files.is_empty() => Err(ClientError::Validation(
            "select at least one file to upload".to_string(),
        )),
        ScanMode::Path if config.path.trim().is_empty() => Err(ClientError::Validation(
            "enter a folder or file path to scan".to_string(),
        )),
        ScanMode::Paste if pasted.trim().is_empty() => Err(ClientError::Validation(
            "paste some content to scan".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_initial_state() {
        let config = ScanConfig::default();
        assert_eq!(config.scan_mode, ScanMode::Upload);
        assert_eq!(config.path, "");
        assert_eq!(config.ruleset, DEFAULT_RULESET);
        assert!(!config.approved_for_ai);
    }

    #[test]
    fn upload_mode_requires_files() {
        let config = ScanConfig::default();
        let err = validate_for_scan(&config, &[], "").unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));

        let files = vec![PathBuf::from("data.csv")];
        assert!(validate_for_scan(&config, &files, "").is_ok());
    }

    #[test]
    fn path_mode_rejects_blank_path() {
        let config = ScanConfig {
            scan_mode: ScanMode::Path,
            path: "   ".to_string(),
            ..ScanConfig::default()
        };
        assert!(matches!(
            validate_for_scan(&config, &[], ""),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn paste_mode_ignores_other_sources() {
        // Path is blank but mode is paste; only the pasted text matters.
        let config = ScanConfig {
            scan_mode: ScanMode::Paste,
            ..ScanConfig::default()
        };
        assert!(validate_for_scan(&config, &[], "email: a@b.example").is_ok());
        assert!(validate_for_scan(&config, &[], "  \n ").is_err());
    }

    #[test]
    fn scan_mode_parse_rejects_unknown_values() {
        assert_eq!(ScanMode::parse("path"), Some(ScanMode::Path));
        assert_eq!(ScanMode::parse("bogus"), None);
        assert_eq!(ScanMode::parse("Upload"), None);
    }
}
