//! Chart-space to screen-space mapping used for tooltip placement

use serde::{Deserialize, Serialize};

/// A position in the chart widget's plotting space.
///
/// Node layouts handed to the widget are normalised, so both axes sit
/// roughly inside `[-1, 1]`. Nothing enforces that range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A position in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift upwards by `offset` pixels.
    pub fn raised(self, offset: f64) -> Self {
        Self {
            x: self.x,
            y: self.y - offset,
        }
    }
}

/// The widget's on-screen bounding rectangle, as reported by
/// `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ChartRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a chart-space point into page pixels.
    ///
    /// Assumes a symmetric plotting domain centred on the widget. This is an
    /// approximation: axis ranges, margins and the y-axis direction of the
    /// widget are not consulted.
    pub fn to_screen(&self, point: ChartPoint) -> ScreenPoint {
        let x = self.left + (point.x * self.width / 2.0) + (self.width / 2.0);
        let y = self.top + (point.y * self.height / 2.0) + (self.height / 2.0);
        ScreenPoint::new(x, y)
    }
}

/// Size sent to the widget in a re-layout command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl ChartSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
