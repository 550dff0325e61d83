//! In-memory page host with a virtual clock
//!
//! Records every command the page logic issues so scenarios can be asserted
//! without a browser. Timers are held until [`GraphPage::advance`] moves the
//! clock past them.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use shared_types::{
    ChartRect, ChartSize, FilterControl, GraphExplorerError, GraphExplorerResult, Marker,
    MarkerSize, PageEvent, PlotPoint, PointRef, PointerEvent, ScreenPoint, TimerId, TooltipView,
};

use crate::host::PageHost;
use crate::page::GraphPage;

/// Epoch the virtual clock starts at: 2024-01-01T00:00:00Z.
pub const START_MS: f64 = 1_704_067_200_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTooltip {
    pub text: String,
    pub anchor: ScreenPoint,
    pub visible: bool,
}

/// Callback run from inside a host command, standing in for JS that reacts
/// synchronously to a widget call.
#[derive(Clone)]
pub struct Hook(Rc<dyn Fn()>);

impl Hook {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    fn call(&self) {
        (self.0)()
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook")
    }
}

#[derive(Debug, Clone)]
pub struct RecordingHost {
    pub now: f64,
    pub container_width: Option<u32>,
    pub chart_rect: Option<ChartRect>,
    /// `None` until the overlay exists
    pub overlay_visible: Option<bool>,
    pub has_form: bool,
    /// Present controls and their current values
    pub controls: HashMap<FilterControl, String>,
    pub relayouts: Vec<ChartSize>,
    pub highlights: Vec<(PointRef, String)>,
    /// `None` until the tooltip node is created
    pub tooltip: Option<RecordedTooltip>,
    pub tooltip_nodes_created: usize,
    pub submissions: usize,
    pub cancelled: Vec<TimerId>,
    pub released: Vec<TimerId>,
    /// Make every relayout call fail
    pub fail_relayout: bool,
    /// Run after every successful relayout
    pub on_relayout: Option<Hook>,
    pending: Vec<(f64, TimerId)>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    /// A page with every element present.
    pub fn new() -> Self {
        let controls = HashMap::from([
            (FilterControl::NodeType, "all".to_string()),
            (FilterControl::Relationship, "all".to_string()),
            (FilterControl::Layout, "kamada_kawai".to_string()),
        ]);
        Self {
            now: START_MS,
            container_width: Some(800),
            chart_rect: Some(ChartRect::new(0.0, 0.0, 800.0, 700.0)),
            overlay_visible: None,
            has_form: true,
            controls,
            relayouts: Vec::new(),
            highlights: Vec::new(),
            tooltip: None,
            tooltip_nodes_created: 0,
            submissions: 0,
            cancelled: Vec::new(),
            released: Vec::new(),
            fail_relayout: false,
            on_relayout: None,
            pending: Vec::new(),
        }
    }

    /// A page with none of the optional elements.
    pub fn empty() -> Self {
        Self {
            container_width: None,
            chart_rect: None,
            has_form: false,
            controls: HashMap::new(),
            ..Self::new()
        }
    }

    pub fn with_container_width(mut self, width: u32) -> Self {
        self.container_width = Some(width);
        self
    }

    pub fn with_chart_rect(mut self, rect: ChartRect) -> Self {
        self.chart_rect = Some(rect);
        self
    }

    pub fn without_container(mut self) -> Self {
        self.container_width = None;
        self
    }

    pub fn without_chart(mut self) -> Self {
        self.chart_rect = None;
        self
    }

    pub fn without_form(mut self) -> Self {
        self.has_form = false;
        self
    }

    pub fn without_control(mut self, control: FilterControl) -> Self {
        self.controls.remove(&control);
        self
    }

    /// Timers still waiting to fire, earliest first.
    pub fn scheduled_timers(&self) -> Vec<TimerId> {
        self.pending.iter().map(|(_, timer)| *timer).collect()
    }

    /// Remove and return the earliest timer due at or before `until`.
    fn pop_due(&mut self, until: f64) -> Option<(f64, TimerId)> {
        let first = self.pending.first()?;
        if first.0 > until {
            return None;
        }
        Some(self.pending.remove(0))
    }
}

impl PageHost for RecordingHost {
    fn now_ms(&self) -> f64 {
        self.now
    }

    fn schedule(&mut self, timer: TimerId, delay_ms: u32) -> GraphExplorerResult<()> {
        let due = self.now + f64::from(delay_ms);
        let index = self.pending.partition_point(|(at, _)| *at <= due);
        self.pending.insert(index, (due, timer));
        Ok(())
    }

    fn cancel(&mut self, timer: TimerId) {
        let before = self.pending.len();
        self.pending.retain(|(_, pending)| *pending != timer);
        if self.pending.len() != before {
            self.cancelled.push(timer);
        }
    }

    fn release_timer(&mut self, timer: TimerId) {
        self.released.push(timer);
    }

    fn container_width(&self) -> Option<u32> {
        self.container_width
    }

    fn ensure_overlay(&mut self) -> GraphExplorerResult<bool> {
        if self.container_width.is_none() {
            return Ok(false);
        }
        self.overlay_visible.get_or_insert(false);
        Ok(true)
    }

    fn set_overlay_visible(&mut self, visible: bool) -> GraphExplorerResult<()> {
        match self.overlay_visible.as_mut() {
            Some(state) => {
                *state = visible;
                Ok(())
            }
            None => Err(GraphExplorerError::Internal {
                message: "overlay toggled before it was created".to_string(),
            }),
        }
    }

    fn has_chart(&self) -> bool {
        self.chart_rect.is_some()
    }

    fn chart_rect(&self) -> Option<ChartRect> {
        self.chart_rect
    }

    fn relayout(&mut self, size: ChartSize) -> GraphExplorerResult<()> {
        if self.fail_relayout {
            return Err(GraphExplorerError::chart_widget(
                "relayout",
                "Plotly is not defined",
            ));
        }
        self.relayouts.push(size);
        if let Some(hook) = &self.on_relayout {
            hook.call();
        }
        Ok(())
    }

    fn highlight(&mut self, point: PointRef, color: &str) -> GraphExplorerResult<()> {
        self.highlights.push((point, color.to_string()));
        Ok(())
    }

    fn show_tooltip(&mut self, view: TooltipView<'_>) -> GraphExplorerResult<()> {
        if self.tooltip.is_none() {
            self.tooltip_nodes_created += 1;
        }
        self.tooltip = Some(RecordedTooltip {
            text: view.text.to_string(),
            anchor: view.anchor,
            visible: true,
        });
        Ok(())
    }

    fn hide_tooltip(&mut self) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.visible = false;
        }
    }

    fn has_control(&self, control: FilterControl) -> bool {
        self.controls.contains_key(&control)
    }

    fn set_control_value(
        &mut self,
        control: FilterControl,
        value: &str,
    ) -> GraphExplorerResult<bool> {
        match self.controls.get_mut(&control) {
            Some(current) => {
                *current = value.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn submit_filter_form(&mut self) -> GraphExplorerResult<bool> {
        if !self.has_form {
            return Ok(false);
        }
        self.submissions += 1;
        Ok(true)
    }
}

impl GraphPage<RecordingHost> {
    /// Move the virtual clock forward by `ms`, dispatching every timer that
    /// comes due on the way, in order.
    pub fn advance(&mut self, ms: f64) {
        let until = self.host().now + ms;
        while let Some((due, timer)) = self.host_mut().pop_due(until) {
            self.host_mut().now = due;
            self.dispatch(PageEvent::TimerExpired(timer));
        }
        self.host_mut().now = until;
    }
}

/// A pointer event on a sized node marker at chart position `(x, y)`.
pub fn node_click(x: f64, y: f64, customdata: &str) -> PointerEvent {
    PointerEvent::new(vec![PlotPoint {
        x: Some(x),
        y: Some(y),
        curve_number: Some(1),
        point_number: Some(0),
        marker: Some(Marker {
            size: Some(MarkerSize::Uniform(20.0)),
        }),
        customdata: Some(customdata.to_string()),
        ..Default::default()
    }])
}
