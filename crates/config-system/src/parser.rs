//! Configuration parser
//!
//! The page embeds its configuration as JSON (an inline
//! `<script type="application/json">` block or a literal passed to the
//! constructor). Missing fields take their defaults.

use crate::{ConfigError, ConfigValidator, ExplorerConfig, Result};

pub struct ConfigParser;

impl ConfigParser {
    /// Parse and validate a JSON configuration. Blank input yields the
    /// defaults.
    pub fn parse_json(content: &str) -> Result<ExplorerConfig> {
        if content.trim().is_empty() {
            return Ok(ExplorerConfig::default());
        }

        let config: ExplorerConfig = serde_json::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_default() {
        assert_eq!(ConfigParser::parse_json("  ").unwrap(), ExplorerConfig::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ConfigParser::parse_json(
            r#"{"viewport": {"resizeDebounceMs": 120}, "tooltip": {"supersedePendingHide": false}}"#,
        )
        .unwrap();
        assert_eq!(config.viewport.resize_debounce_ms, Some(120));
        assert_eq!(config.viewport.graph_height, 700);
        assert!(!config.tooltip.supersede_pending_hide);
        assert_eq!(config.tooltip.hide_delay_ms, 2000);
        assert_eq!(config.selectors.container, ".graph-container");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = ConfigParser::parse_json("{viewport").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let err = ConfigParser::parse_json(r#"{"tooltip": {"hideDelayMs": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
