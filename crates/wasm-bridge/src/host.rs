//! The seam between page logic and the environment it runs in
//!
//! Controllers only talk to a [`PageHost`]. The browser implementation lives
//! in [`crate::wrappers::dom_host`]; [`crate::testing::RecordingHost`] is an
//! in-memory stand-in with a virtual clock.
//!
//! Absent page elements are reported through `Option`/`bool` returns and
//! never as errors. `Err` is reserved for a call into the environment that
//! failed outright.

use shared_types::{
    ChartRect, ChartSize, FilterControl, GraphExplorerResult, PointRef, TimerId, TooltipView,
};

pub trait PageHost {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> f64;

    /// Deliver `PageEvent::TimerExpired(timer)` after `delay_ms`.
    fn schedule(&mut self, timer: TimerId, delay_ms: u32) -> GraphExplorerResult<()>;

    /// Drop a scheduled delivery. Unknown or already fired timers are ignored.
    fn cancel(&mut self, timer: TimerId);

    /// Called once a timer's expiry has been dispatched.
    fn release_timer(&mut self, _timer: TimerId) {}

    /// Measured width of the graph container, `None` without a container.
    fn container_width(&self) -> Option<u32>;

    /// Find or create the loading overlay. `false` when there is no container
    /// to hold it.
    fn ensure_overlay(&mut self) -> GraphExplorerResult<bool>;

    fn set_overlay_visible(&mut self, visible: bool) -> GraphExplorerResult<()>;

    fn has_chart(&self) -> bool;

    /// The chart widget's on-screen rectangle.
    fn chart_rect(&self) -> Option<ChartRect>;

    fn relayout(&mut self, size: ChartSize) -> GraphExplorerResult<()>;

    fn highlight(&mut self, point: PointRef, color: &str) -> GraphExplorerResult<()>;

    /// Draw the page tooltip, creating its node on first use.
    fn show_tooltip(&mut self, view: TooltipView<'_>) -> GraphExplorerResult<()>;

    fn hide_tooltip(&mut self);

    fn has_control(&self, control: FilterControl) -> bool;

    /// Returns `false` when the control is absent.
    fn set_control_value(&mut self, control: FilterControl, value: &str)
        -> GraphExplorerResult<bool>;

    /// Submit the filter form. Returns `false` when there is no form.
    fn submit_filter_form(&mut self) -> GraphExplorerResult<bool>;
}
