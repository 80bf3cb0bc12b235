use crate::error::ClientError;
use crate::models::config::{ScanConfig, ScanMode};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PROFILE_VERSION: u32 = 1;

/// Portable snapshot of a scan configuration, safe to share between
/// operators. Carries no transient session data (selected files, pasted
/// text, scan results).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    pub config: ProfileConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileConfig {
    pub scan_mode: ScanMode,
    pub path: String,
    pub ruleset: String,
    pub approved_for_ai: bool,
}

/// Snapshots the current configuration into a portable profile document.
pub fn export_profile(config: &ScanConfig, name: &str) -> Profile {
    Profile {
        version: PROFILE_VERSION,
        name: name.to_string(),
        exported_at: Some(Utc::now()),
        config: ProfileConfig {
            scan_mode: config.scan_mode,
            path: config.path.clone(),
            ruleset: config.ruleset.clone(),
            approved_for_ai: config.approved_for_ai,
        },
    }
}

/// Rebuilds a configuration from an untrusted profile document.
///
/// A missing or non-object `config` fails the whole import. Individual
/// fields are coerced leniently instead: an unknown scan mode falls back to
/// upload, a non-string path becomes empty, a non-string ruleset keeps the
/// currently active one, and approvedForAi takes its truthiness.
pub fn import_profile(document: &Value, current: &ScanConfig) -> Result<ScanConfig, ClientError> {
    let config = match document.get("config") {
        Some(value) if value.is_object() => value,
        _ => {
            return Err(ClientError::InvalidProfile(
                "missing config object".to_string(),
            ));
        }
    };

    let scan_mode = config
        .get("scanMode")
        .and_then(Value::as_str)
        .and_then(ScanMode::parse)
        .unwrap_or_else(|| {
            debug!("profile scanMode missing or unknown, defaulting to upload");
            ScanMode::Upload
        });

    let path = match config.get("path").and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => {
            debug!("profile path missing or not text, clearing");
            String::new()
        }
    };

    let ruleset = match config.get("ruleset").and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => {
            debug!("profile ruleset missing or not text, keeping current");
            current.ruleset.clone()
        }
    };

    Ok(ScanConfig {
        scan_mode,
        path,
        ruleset,
        approved_for_ai: is_truthy(config.get("approvedForAi")),
    })
}

// Truthiness of a JSON value: null, false, 0, and "" are falsy, everything
// else (including objects and arrays) is truthy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
