//! Shared types for the Graph Explorer page layer
//!
//! This crate contains the types shared between the configuration system and
//! the wasm-bridge crate. Nothing here touches the DOM, so everything can be
//! exercised natively.

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod events;
pub mod filter;
pub mod geometry;
pub mod session;
pub mod tooltip;

pub use errors::{ErrorResponse, GraphExplorerError, GraphExplorerResult};
pub use events::{
    Marker, MarkerSize, OperationEvent, PageEvent, PlotPoint, PointRef, PointerEvent, TimerId,
    TimerKind, TraceData,
};
pub use filter::{FilterControl, FilterKind, FilterSelection, LayoutKind, LegendEntry};
pub use geometry::{ChartPoint, ChartRect, ChartSize, ScreenPoint};
pub use session::{OperationLog, OperationRecord, SessionStore};
pub use tooltip::{TooltipState, TooltipStyle, TooltipView};

/// Visibility of the loading overlay.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverlayState {
    #[default]
    Hidden,
    Visible,
}

impl OverlayState {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            OverlayState::Visible
        } else {
            OverlayState::Hidden
        }
    }

    pub fn is_visible(self) -> bool {
        self == OverlayState::Visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_state() {
        assert_eq!(OverlayState::default(), OverlayState::Hidden);
        assert!(OverlayState::from_visible(true).is_visible());
        assert!(!OverlayState::from_visible(false).is_visible());
        assert_eq!(serde_json::to_string(&OverlayState::Visible).unwrap(), "\"visible\"");
    }
}
