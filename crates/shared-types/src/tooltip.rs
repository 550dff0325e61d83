//! Tooltip state shared between the pointer tracker and the page host

use serde::{Deserialize, Serialize};

use crate::geometry::{ChartPoint, ScreenPoint};

/// State of the single page tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub message: String,

    /// Where the datum sits in chart space
    pub position: ChartPoint,

    /// Where the tooltip box is anchored, in page pixels
    pub anchor: ScreenPoint,

    pub visible: bool,

    /// Host clock time (milliseconds) at which the tooltip auto-hides
    pub expires_at_ms: f64,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            message: String::new(),
            position: ChartPoint::default(),
            anchor: ScreenPoint::default(),
            visible: false,
            expires_at_ms: 0.0,
        }
    }
}

impl TooltipState {
    pub fn view(&self) -> TooltipView<'_> {
        TooltipView {
            text: &self.message,
            anchor: self.anchor,
        }
    }
}

/// What the host needs to draw the tooltip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipView<'a> {
    pub text: &'a str,
    pub anchor: ScreenPoint,
}

/// Inline style applied when the tooltip node is first created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TooltipStyle {
    pub background_color: String,
    pub color: String,
    pub padding: String,
    pub border_radius: String,
    pub z_index: String,
    pub font_size: String,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background_color: "rgba(0, 0, 0, 0.7)".to_string(),
            color: "white".to_string(),
            padding: "5px 10px".to_string(),
            border_radius: "3px".to_string(),
            z_index: "1000".to_string(),
            font_size: "12px".to_string(),
        }
    }
}

impl TooltipStyle {
    /// CSS property/value pairs, including the fixed positioning rules.
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("position", "absolute"),
            ("background-color", &self.background_color),
            ("color", &self.color),
            ("padding", &self.padding),
            ("border-radius", &self.border_radius),
            ("pointer-events", "none"),
            ("z-index", &self.z_index),
            ("font-size", &self.font_size),
        ]
    }
}

/// Tooltip message for a click-derived filter label.
pub fn filter_hint(label: &str) -> String {
    format!("Click to filter by {label} nodes")
}
