//! Page event dispatcher
//!
//! `GraphPage` receives every page event, routes it to the viewport
//! controller or the pointer tracker and owns the session store. Handler
//! failures are logged and swallowed; the page never sees them.

use config_system::ExplorerConfig;
use shared_types::{
    FilterControl, FilterSelection, GraphExplorerResult, LayoutKind, OperationEvent,
    OperationRecord, PageEvent, SessionStore, TimerId, TimerKind,
};

use crate::controls::{PointerTracker, ViewportController};
use crate::host::PageHost;

pub struct GraphPage<H: PageHost> {
    host: H,
    config: ExplorerConfig,
    viewport: ViewportController,
    pointer: PointerTracker,
    session: SessionStore,
    initialized: bool,
}

impl<H: PageHost> GraphPage<H> {
    pub fn new(host: H, config: ExplorerConfig) -> Self {
        let viewport = ViewportController::new(config.viewport.clone());
        let pointer = PointerTracker::new(
            config.tooltip.clone(),
            config.interaction.highlight_color.clone(),
        );
        let session = SessionStore::new();
        Self {
            host,
            config,
            viewport,
            pointer,
            session,
            initialized: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn dispatch(&mut self, event: PageEvent) {
        let name = event.name();
        log::trace!("Dispatching {name}");
        if let Err(e) = self.handle(event) {
            log::warn!("{name} handler failed: {e}");
        }
    }

    fn handle(&mut self, event: PageEvent) -> GraphExplorerResult<()> {
        match event {
            PageEvent::Ready => self.on_ready(),
            PageEvent::Resize => self.viewport.on_resize(&mut self.host).map(|_| ()),
            PageEvent::FilterSubmitted => self.viewport.on_submit(&mut self.host),
            PageEvent::Hover(event) => self.pointer.on_hover(&mut self.host, &event).map(|_| ()),
            PageEvent::Click(event) => {
                if let Some(selection) = self.pointer.on_click(&mut self.host, &event)? {
                    log::debug!("Filter requested for node type '{selection}'");
                }
                Ok(())
            }
            PageEvent::LegendClick(entry) => {
                if self.pointer.on_legend_click(&mut self.host, &entry)? {
                    self.viewport.toggle_loading(&mut self.host, true)?;
                }
                Ok(())
            }
            PageEvent::TimerExpired(timer) => self.on_timer(timer),
            PageEvent::ControlChanged { control, value } => self.on_control_changed(control, value),
            PageEvent::Operation(operation) => {
                self.record_operation(operation);
                Ok(())
            }
            PageEvent::Unload => {
                self.on_unload();
                Ok(())
            }
        }
    }

    fn on_ready(&mut self) -> GraphExplorerResult<()> {
        if self.initialized {
            log::debug!("Page already initialized");
            return Ok(());
        }
        self.initialized = true;
        log::info!("Neo4j logger initialized and waiting for operations...");
        self.viewport.initialize(&mut self.host)
    }

    fn on_timer(&mut self, timer: TimerId) -> GraphExplorerResult<()> {
        self.host.release_timer(timer);
        match timer.kind {
            TimerKind::TooltipHide => {
                self.pointer.on_timer(&mut self.host, timer);
                Ok(())
            }
            TimerKind::ResizeSettle => self.viewport.on_timer(&mut self.host, timer).map(|_| ()),
        }
    }

    fn on_control_changed(
        &mut self,
        control: FilterControl,
        value: String,
    ) -> GraphExplorerResult<()> {
        let shown = match control {
            FilterControl::Layout => LayoutKind::parse(&value).as_str().to_string(),
            _ => value,
        };

        if !self.config.interaction.auto_submit_on_change {
            log::info!("{control} set to '{shown}'; applied when the filter form is submitted");
            return Ok(());
        }

        log::debug!("{control} set to '{shown}'; submitting filters");
        if self.host.submit_filter_form()? {
            self.viewport.toggle_loading(&mut self.host, true)?;
        }
        Ok(())
    }

    fn on_unload(&mut self) {
        self.pointer.cancel_pending(&mut self.host);
        self.viewport.cancel_pending(&mut self.host);
        self.session.clear();
        log::debug!("Page session cleared");
    }

    pub fn toggle_loading(&mut self, show: bool) {
        if let Err(e) = self.viewport.toggle_loading(&mut self.host, show) {
            log::warn!("toggle_loading failed: {e}");
        }
    }

    pub fn resize_graph(&mut self) {
        if let Err(e) = self.viewport.resize_graph(&mut self.host) {
            log::warn!("resize_graph failed: {e}");
        }
    }

    pub fn record_operation(&mut self, operation: OperationEvent) -> &OperationRecord {
        let now = self.host.now_ms();
        self.session.operations.record(operation, now)
    }

    pub fn show_all_operations(&self) -> Vec<String> {
        self.session.operations.show_all()
    }

    pub fn requested_filter(&self) -> Option<&FilterSelection> {
        self.pointer.requested_filter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{node_click, RecordingHost};
    use shared_types::{ChartSize, LegendEntry, OverlayState};

    fn page(host: RecordingHost) -> GraphPage<RecordingHost> {
        GraphPage::new(host, ExplorerConfig::default())
    }

    #[test]
    fn test_ready_creates_overlay_and_sizes_graph() {
        let mut page = page(RecordingHost::new().with_container_width(960));
        page.dispatch(PageEvent::Ready);
        page.dispatch(PageEvent::Ready);

        assert!(page.is_initialized());
        assert_eq!(page.host().overlay_visible, Some(false));
        assert_eq!(page.host().relayouts, vec![ChartSize::new(960, 700)]);
    }

    #[test]
    fn test_submit_shows_overlay() {
        let mut page = page(RecordingHost::new());
        page.dispatch(PageEvent::Ready);
        page.dispatch(PageEvent::FilterSubmitted);
        assert_eq!(page.viewport().overlay(), OverlayState::Visible);
        assert_eq!(page.host().overlay_visible, Some(true));
    }

    #[test]
    fn test_failed_relayout_is_swallowed() {
        let mut host = RecordingHost::new();
        host.fail_relayout = true;
        let mut page = page(host);

        page.dispatch(PageEvent::Ready);
        page.dispatch(PageEvent::Resize);
        assert!(page.host().relayouts.is_empty());

        // The overlay was set up before the failing relayout.
        page.dispatch(PageEvent::FilterSubmitted);
        assert_eq!(page.host().overlay_visible, Some(true));
    }

    #[test]
    fn test_legend_click_submits_and_shows_overlay() {
        let mut page = page(RecordingHost::new());
        page.dispatch(PageEvent::Ready);
        page.dispatch(PageEvent::LegendClick(LegendEntry::new("Person", "Node Types")));

        assert_eq!(page.host().submissions, 1);
        assert_eq!(page.viewport().overlay(), OverlayState::Visible);
    }

    #[test]
    fn test_control_change_only_logs_by_default() {
        let mut page = page(RecordingHost::new());
        page.dispatch(PageEvent::ControlChanged {
            control: FilterControl::Layout,
            value: "spring".to_string(),
        });
        assert_eq!(page.host().submissions, 0);
    }

    #[test]
    fn test_control_change_submits_when_enabled() {
        let mut config = ExplorerConfig::default();
        config.interaction.auto_submit_on_change = true;
        let mut page = GraphPage::new(RecordingHost::new(), config);
        page.dispatch(PageEvent::Ready);

        page.dispatch(PageEvent::ControlChanged {
            control: FilterControl::NodeType,
            value: "Person".to_string(),
        });
        assert_eq!(page.host().submissions, 1);
        assert_eq!(page.viewport().overlay(), OverlayState::Visible);
    }

    #[test]
    fn test_unload_clears_session_and_pending_hide() {
        let mut page = page(RecordingHost::new());
        page.dispatch(PageEvent::Ready);
        page.dispatch(PageEvent::Operation(OperationEvent {
            operation: "create_node".to_string(),
            timestamp: "2024-01-01 00:00:00".to_string(),
        }));
        page.dispatch(PageEvent::Click(node_click(0.0, 0.0, "Label: Person")));
        assert_eq!(page.session().operations.len(), 1);
        assert_eq!(page.host().scheduled_timers().len(), 1);

        page.dispatch(PageEvent::Unload);
        assert!(page.session().operations.is_empty());
        assert!(page.host().scheduled_timers().is_empty());
    }

    #[test]
    fn test_timer_expiry_is_released() {
        let mut page = page(RecordingHost::new());
        page.dispatch(PageEvent::Click(node_click(0.0, 0.0, "Label: Person")));
        page.advance(2000.0);
        assert_eq!(page.host().released.len(), 1);
        assert!(!page.pointer().tooltip().visible);
    }
}
