//! Page event types, decoupled from the DOM event API

use serde::{Deserialize, Serialize};

use crate::filter::{FilterControl, LegendEntry};
use crate::geometry::ChartPoint;

/// Marker size as the widget reports it: one size per trace, or per point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerSize {
    Uniform(f64),
    PerPoint(Vec<f64>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub size: Option<MarkerSize>,
}

impl Marker {
    /// True when the marker carries a usable size. Node traces always have
    /// one; edge and label traces do not. A uniform size of zero counts as
    /// absent.
    pub fn has_size(&self) -> bool {
        match &self.size {
            Some(MarkerSize::Uniform(size)) => *size != 0.0 && !size.is_nan(),
            Some(MarkerSize::PerPoint(_)) => true,
            None => false,
        }
    }
}

/// The subset of the trace a point belongs to that the tracker reads.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceData {
    pub name: Option<String>,
    #[serde(default)]
    pub customdata: Vec<String>,
}

/// Identifies a datum inside the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointRef {
    pub curve_number: u32,
    pub point_number: u32,
}

/// One entry of a pointer event's `points` list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub curve_number: Option<u32>,
    pub point_number: Option<u32>,
    pub marker: Option<Marker>,
    pub customdata: Option<String>,
    #[serde(default)]
    pub data: TraceData,
}

impl PlotPoint {
    pub fn position(&self) -> Option<ChartPoint> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(ChartPoint::new(x, y)),
            _ => None,
        }
    }

    pub fn point_ref(&self) -> Option<PointRef> {
        Some(PointRef {
            curve_number: self.curve_number?,
            point_number: self.point_number?,
        })
    }

    pub fn has_sized_marker(&self) -> bool {
        self.marker.as_ref().is_some_and(Marker::has_size)
    }

    /// Hover text for this datum: the point's own `customdata`, falling back
    /// to the trace's entry at `point_number`.
    pub fn hover_text(&self) -> Option<&str> {
        if let Some(text) = self.customdata.as_deref() {
            return Some(text);
        }
        let index = self.point_number? as usize;
        self.data.customdata.get(index).map(String::as_str)
    }
}

/// Payload of a `plotly_hover` / `plotly_click` event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub points: Vec<PlotPoint>,
}

impl PointerEvent {
    pub fn new(points: Vec<PlotPoint>) -> Self {
        Self { points }
    }

    /// Only the first hit is considered; ties and multi-point hits are
    /// ignored.
    pub fn primary(&self) -> Option<&PlotPoint> {
        self.points.first()
    }
}

/// Detail of the `neo4j-operation` custom event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationEvent {
    pub operation: String,
    pub timestamp: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    TooltipHide,
    ResizeSettle,
}

/// Token carried by a delayed callback. `token` increases with every
/// scheduling, so an expiry can be matched against the latest request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId {
    pub kind: TimerKind,
    pub token: u64,
}

/// Everything the page reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// DOM content loaded.
    Ready,
    /// Window resized.
    Resize,
    /// The filter form is being submitted.
    FilterSubmitted,
    Hover(PointerEvent),
    Click(PointerEvent),
    LegendClick(LegendEntry),
    TimerExpired(TimerId),
    ControlChanged {
        control: FilterControl,
        value: String,
    },
    Operation(OperationEvent),
    /// The page is being navigated away from.
    Unload,
}

impl PageEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::Ready => "ready",
            PageEvent::Resize => "resize",
            PageEvent::FilterSubmitted => "submit",
            PageEvent::Hover(_) => "hover",
            PageEvent::Click(_) => "click",
            PageEvent::LegendClick(_) => "legendClick",
            PageEvent::TimerExpired(_) => "timerExpire",
            PageEvent::ControlChanged { .. } => "controlChanged",
            PageEvent::Operation(_) => "operation",
            PageEvent::Unload => "unload",
        }
    }
}
