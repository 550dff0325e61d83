//! Configuration validation utilities

use crate::{
    ConfigError, ExplorerConfig, InteractionConfig, LoggingConfig, PageSelectors, Result,
    TooltipConfig, ViewportConfig,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Element ids and class names as the page template writes them.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("identifier pattern"));

static EVENT_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9._-]*$").expect("event name pattern"));

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &ExplorerConfig) -> Result<()> {
        Self::validate_selectors(&config.selectors)?;
        Self::validate_viewport(&config.viewport)?;
        Self::validate_tooltip(&config.tooltip)?;
        Self::validate_interaction(&config.interaction)?;
        Self::validate_logging(&config.logging)?;

        // Cross-field validation
        if let Some(debounce) = config.viewport.resize_debounce_ms {
            if debounce >= config.tooltip.hide_delay_ms {
                log::warn!(
                    "Resize debounce ({debounce}ms) is not shorter than the tooltip hide delay ({}ms)",
                    config.tooltip.hide_delay_ms
                );
            }
        }

        Ok(())
    }

    fn validate_selectors(selectors: &PageSelectors) -> Result<()> {
        let queries = [
            ("container", &selectors.container),
            ("chart", &selectors.chart),
            ("legendItem", &selectors.legend_item),
            ("legendLabel", &selectors.legend_label),
            ("legendHeading", &selectors.legend_heading),
        ];
        for (field, query) in queries {
            if query.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Selector '{field}' cannot be empty"
                )));
            }
        }

        let identifiers = [
            ("overlayClass", &selectors.overlay_class),
            ("overlayActiveClass", &selectors.overlay_active_class),
            ("spinnerClass", &selectors.spinner_class),
            ("nodeTypeFilterId", &selectors.node_type_filter_id),
            ("relationshipFilterId", &selectors.relationship_filter_id),
            ("layoutTypeId", &selectors.layout_type_id),
            ("filterFormId", &selectors.filter_form_id),
            ("tooltipId", &selectors.tooltip_id),
        ];
        for (field, value) in identifiers {
            if !IDENTIFIER.is_match(value) {
                return Err(ConfigError::Validation(format!(
                    "Invalid {field}: '{value}'. Expected a bare id or class name"
                )));
            }
        }

        Ok(())
    }

    fn validate_viewport(viewport: &ViewportConfig) -> Result<()> {
        if viewport.graph_height == 0 || viewport.graph_height > 10_000 {
            return Err(ConfigError::Validation(format!(
                "Invalid graph_height: {}. Must be between 1 and 10000",
                viewport.graph_height
            )));
        }

        if let Some(debounce) = viewport.resize_debounce_ms {
            if debounce > 5_000 {
                return Err(ConfigError::Validation(format!(
                    "Invalid resize_debounce_ms: {debounce}. Must be at most 5000"
                )));
            }
        }

        Ok(())
    }

    fn validate_tooltip(tooltip: &TooltipConfig) -> Result<()> {
        if tooltip.hide_delay_ms == 0 || tooltip.hide_delay_ms > 60_000 {
            return Err(ConfigError::Validation(format!(
                "Invalid hide_delay_ms: {}. Must be between 1 and 60000",
                tooltip.hide_delay_ms
            )));
        }

        if !tooltip.vertical_offset.is_finite() {
            return Err(ConfigError::Validation(
                "Tooltip vertical_offset must be finite".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_interaction(interaction: &InteractionConfig) -> Result<()> {
        if interaction.highlight_color.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Highlight color cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_logging(logging: &LoggingConfig) -> Result<()> {
        let level = logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Invalid log level: '{}'. Must be one of {}",
                logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        if !EVENT_NAME.is_match(&logging.operation_event) {
            return Err(ConfigError::Validation(format!(
                "Invalid operation event name: '{}'",
                logging.operation_event
            )));
        }

        Ok(())
    }
}
