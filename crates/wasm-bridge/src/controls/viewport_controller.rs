use config_system::ViewportConfig;
use shared_types::{ChartSize, GraphExplorerResult, OverlayState, TimerId, TimerKind};

use crate::host::PageHost;

/// Keeps the graph sized to its container and owns the loading overlay.
pub struct ViewportController {
    config: ViewportConfig,
    overlay: OverlayState,
    overlay_ready: bool,
    last_size: Option<ChartSize>,
    pending_settle: Option<TimerId>,
    next_token: u64,
}

impl ViewportController {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            config,
            overlay: OverlayState::Hidden,
            overlay_ready: false,
            last_size: None,
            pending_settle: None,
            next_token: 0,
        }
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    pub fn last_size(&self) -> Option<ChartSize> {
        self.last_size
    }

    /// Create or adopt the overlay, then size the graph once.
    pub fn initialize(&mut self, host: &mut impl PageHost) -> GraphExplorerResult<()> {
        self.overlay_ready = host.ensure_overlay()?;
        if !self.overlay_ready {
            log::debug!("No graph container; loading overlay disabled");
        }
        self.resize_graph(host)?;
        Ok(())
    }

    /// Show or hide the loading overlay. Repeating the current state changes
    /// nothing visible.
    pub fn toggle_loading(
        &mut self,
        host: &mut impl PageHost,
        show: bool,
    ) -> GraphExplorerResult<()> {
        if !self.overlay_ready {
            return Ok(());
        }
        host.set_overlay_visible(show)?;
        self.overlay = OverlayState::from_visible(show);
        Ok(())
    }

    /// Re-layout the chart to the container's current width and the fixed
    /// graph height. Returns the size sent, or `None` when the container or
    /// the chart is missing.
    pub fn resize_graph(
        &mut self,
        host: &mut impl PageHost,
    ) -> GraphExplorerResult<Option<ChartSize>> {
        let Some(width) = host.container_width() else {
            return Ok(None);
        };
        if !host.has_chart() {
            return Ok(None);
        }

        let size = ChartSize::new(width, self.config.graph_height);
        host.relayout(size)?;
        log::debug!("Graph relayout to {}x{}", size.width, size.height);
        self.last_size = Some(size);
        Ok(Some(size))
    }

    /// Window resized. Without a debounce this re-lays out immediately;
    /// with one, it re-arms the settle timer.
    pub fn on_resize(&mut self, host: &mut impl PageHost) -> GraphExplorerResult<Option<ChartSize>> {
        let Some(delay) = self.config.resize_debounce_ms else {
            return self.resize_graph(host);
        };

        if let Some(pending) = self.pending_settle.take() {
            host.cancel(pending);
        }
        self.next_token += 1;
        let timer = TimerId {
            kind: TimerKind::ResizeSettle,
            token: self.next_token,
        };
        host.schedule(timer, delay)?;
        self.pending_settle = Some(timer);
        Ok(None)
    }

    pub fn on_timer(
        &mut self,
        host: &mut impl PageHost,
        timer: TimerId,
    ) -> GraphExplorerResult<Option<ChartSize>> {
        if self.pending_settle != Some(timer) {
            return Ok(None);
        }
        self.pending_settle = None;
        self.resize_graph(host)
    }

    /// The filter form is submitting; the navigation that follows clears the
    /// overlay.
    pub fn on_submit(&mut self, host: &mut impl PageHost) -> GraphExplorerResult<()> {
        self.toggle_loading(host, true)
    }

    pub fn cancel_pending(&mut self, host: &mut impl PageHost) {
        if let Some(pending) = self.pending_settle.take() {
            host.cancel(pending);
        }
    }
}
