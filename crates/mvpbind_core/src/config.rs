//! Binder configuration.
//!
//! # Responsibility
//! - Carry the runtime usage mode (live execution vs visual designer).
//! - Load it from the process environment or a deserialized config document.
//!
//! # Invariants
//! - Missing configuration means live execution.
//! - Unknown usage mode values are rejected, never guessed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable read by [`BinderConfig::from_env`].
pub const USAGE_MODE_ENV: &str = "MVPBIND_USAGE_MODE";

/// Whether views run live or inside a visual designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageMode {
    #[default]
    Live,
    Design,
}

impl UsageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Design => "design",
        }
    }

    pub fn is_design(self) -> bool {
        self == Self::Design
    }

    /// Parses `live|runtime` or `design|designtime`, case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" | "runtime" => Ok(Self::Live),
            "design" | "designtime" => Ok(Self::Design),
            other => Err(ConfigError::UnsupportedUsageMode(other.to_string())),
        }
    }
}

/// Binder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinderConfig {
    pub usage_mode: UsageMode,
}

impl BinderConfig {
    pub fn design_time() -> Self {
        Self {
            usage_mode: UsageMode::Design,
        }
    }

    /// Reads [`USAGE_MODE_ENV`]; unset means live.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(USAGE_MODE_ENV).ok().as_deref())
    }

    /// Builds a config from a raw environment value.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        let usage_mode = match value {
            Some(raw) if !raw.trim().is_empty() => UsageMode::parse(raw)?,
            _ => UsageMode::default(),
        };
        Ok(Self { usage_mode })
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedUsageMode(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedUsageMode(value) => write!(
                f,
                "unsupported usage mode `{value}`; expected live|design"
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{BinderConfig, ConfigError, UsageMode};

    #[test]
    fn parse_accepts_aliases_case_insensitively() {
        assert_eq!(UsageMode::parse(" Design ").expect("design"), UsageMode::Design);
        assert_eq!(UsageMode::parse("DESIGNTIME").expect("designtime"), UsageMode::Design);
        assert_eq!(UsageMode::parse("runtime").expect("runtime"), UsageMode::Live);
    }

    #[test]
    fn parse_rejects_unknown_mode() {
        let err = UsageMode::parse("preview").expect_err("unknown mode must fail");
        assert_eq!(err, ConfigError::UnsupportedUsageMode("preview".to_string()));
    }

    #[test]
    fn missing_or_blank_env_value_means_live() {
        assert_eq!(
            BinderConfig::from_env_value(None).expect("unset"),
            BinderConfig::default()
        );
        assert_eq!(
            BinderConfig::from_env_value(Some("  ")).expect("blank"),
            BinderConfig::default()
        );
        assert!(BinderConfig::from_env_value(Some("design"))
            .expect("design")
            .usage_mode
            .is_design());
    }

    #[test]
    fn deserializes_from_json_document() {
        let config: BinderConfig =
            serde_json::from_str(r#"{"usage_mode":"design"}"#).expect("valid config");
        assert_eq!(config, BinderConfig::design_time());

        let empty: BinderConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(empty.usage_mode, UsageMode::Live);

        assert!(serde_json::from_str::<BinderConfig>(r#"{"mode":"design"}"#).is_err());
    }
}
