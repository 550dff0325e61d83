//! Configuration system for Graph Explorer
//! Page selectors, viewport sizing, tooltip timing and interaction settings

use serde::{Deserialize, Serialize};
use shared_types::{FilterControl, GraphExplorerError, TooltipStyle};
use thiserror::Error;

pub mod parser;
pub mod validation;

pub use parser::ConfigParser;
pub use validation::ConfigValidator;

/// Height, in pixels, the graph is laid out at regardless of container size.
pub const DEFAULT_GRAPH_HEIGHT: u32 = 700;

/// Delay before an unattended tooltip hides itself.
pub const DEFAULT_TOOLTIP_HIDE_DELAY_MS: u32 = 2000;

/// How far above the datum the tooltip floats.
pub const DEFAULT_TOOLTIP_OFFSET_PX: f64 = 30.0;

pub const DEFAULT_HIGHLIGHT_COLOR: &str = "rgba(255, 207, 86, 1)";

pub const DEFAULT_OPERATION_EVENT: &str = "neo4j-operation";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl From<ConfigError> for GraphExplorerError {
    fn from(err: ConfigError) -> Self {
        GraphExplorerError::InvalidConfig {
            message: err.to_string(),
            field: None,
        }
    }
}

/// Complete page configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplorerConfig {
    pub selectors: PageSelectors,
    pub viewport: ViewportConfig,
    pub tooltip: TooltipConfig,
    pub interaction: InteractionConfig,
    pub logging: LoggingConfig,
}

/// Where the page elements live. Ids are bare (no `#`), classes have no dot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSelectors {
    pub container: String,
    pub chart: String,
    pub overlay_class: String,
    pub overlay_active_class: String,
    pub spinner_class: String,
    pub node_type_filter_id: String,
    pub relationship_filter_id: String,
    pub layout_type_id: String,
    pub filter_form_id: String,
    pub legend_item: String,
    pub legend_label: String,
    pub legend_heading: String,
    pub tooltip_id: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            container: ".graph-container".to_string(),
            chart: ".js-plotly-plot".to_string(),
            overlay_class: "graph-overlay".to_string(),
            overlay_active_class: "active".to_string(),
            spinner_class: "spinner".to_string(),
            node_type_filter_id: "nodeTypeFilter".to_string(),
            relationship_filter_id: "relationshipFilter".to_string(),
            layout_type_id: "layoutType".to_string(),
            filter_form_id: "filterForm".to_string(),
            legend_item: ".legend-item".to_string(),
            legend_label: "span".to_string(),
            legend_heading: "h6".to_string(),
            tooltip_id: "graph-tooltip".to_string(),
        }
    }
}

impl PageSelectors {
    pub fn control_id(&self, control: FilterControl) -> &str {
        match control {
            FilterControl::NodeType => &self.node_type_filter_id,
            FilterControl::Relationship => &self.relationship_filter_id,
            FilterControl::Layout => &self.layout_type_id,
        }
    }

    pub fn overlay_selector(&self) -> String {
        format!(".{}", self.overlay_class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportConfig {
    pub graph_height: u32,
    /// When set, bursts of resize events collapse into one re-layout issued
    /// this many milliseconds after the last one.
    pub resize_debounce_ms: Option<u32>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            graph_height: DEFAULT_GRAPH_HEIGHT,
            resize_debounce_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipConfig {
    pub hide_delay_ms: u32,
    pub vertical_offset: f64,
    /// Cancel the pending hide of a tooltip when a newer one is shown. When
    /// false, every show's timer fires and may hide a younger tooltip early.
    pub supersede_pending_hide: bool,
    pub style: TooltipStyle,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: DEFAULT_TOOLTIP_HIDE_DELAY_MS,
            vertical_offset: DEFAULT_TOOLTIP_OFFSET_PX,
            supersede_pending_hide: true,
            style: TooltipStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionConfig {
    pub highlight_color: String,
    /// Submit the filter form as soon as a filter or layout control changes.
    pub auto_submit_on_change: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            auto_submit_on_change: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    pub level: String,
    pub operation_event: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            operation_event: DEFAULT_OPERATION_EVENT.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Falls back to `Info` for anything `log` does not recognise.
    pub fn level(&self) -> log::Level {
        self.level.parse().unwrap_or(log::Level::Info)
    }
}
