use config_system::TooltipConfig;
use shared_types::tooltip::filter_hint;
use shared_types::{
    ChartPoint, FilterControl, FilterSelection, GraphExplorerResult, LegendEntry, PointerEvent,
    TimerId, TimerKind, TooltipState,
};

use crate::host::PageHost;

/// Turns chart pointer events into highlight commands, tooltip updates and
/// filter requests.
pub struct PointerTracker {
    config: TooltipConfig,
    highlight_color: String,
    tooltip: TooltipState,
    pending_hide: Option<TimerId>,
    next_token: u64,
    requested_filter: Option<FilterSelection>,
}

impl PointerTracker {
    pub fn new(config: TooltipConfig, highlight_color: impl Into<String>) -> Self {
        Self {
            config,
            highlight_color: highlight_color.into(),
            tooltip: TooltipState::default(),
            pending_hide: None,
            next_token: 0,
            requested_filter: None,
        }
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Label of the last clicked node, if any.
    pub fn requested_filter(&self) -> Option<&FilterSelection> {
        self.requested_filter.as_ref()
    }

    /// Recolor a hovered node. Only sized markers carrying hover text are
    /// nodes; edges and edge labels are left alone. Nothing restores the
    /// original color.
    pub fn on_hover(
        &mut self,
        host: &mut impl PageHost,
        event: &PointerEvent,
    ) -> GraphExplorerResult<bool> {
        let Some(point) = event.primary() else {
            return Ok(false);
        };
        if !point.has_sized_marker() || point.hover_text().is_none() {
            return Ok(false);
        }
        let Some(target) = point.point_ref() else {
            return Ok(false);
        };

        host.highlight(target, &self.highlight_color)?;
        Ok(true)
    }

    /// A node click shows a hint for filtering by the node's label. Clicks on
    /// anything without a sized marker, without a parsable label, or on a
    /// page without the node type filter change nothing.
    pub fn on_click(
        &mut self,
        host: &mut impl PageHost,
        event: &PointerEvent,
    ) -> GraphExplorerResult<Option<FilterSelection>> {
        let Some(point) = event.primary() else {
            return Ok(None);
        };
        if !point.has_sized_marker() {
            return Ok(None);
        }
        let Some(selection) = point.hover_text().and_then(FilterSelection::from_customdata) else {
            return Ok(None);
        };
        if !host.has_control(FilterControl::NodeType) {
            return Ok(None);
        }
        let Some(position) = point.position() else {
            return Ok(None);
        };

        if !self.show_tooltip(host, filter_hint(selection.as_str()), position)? {
            return Ok(None);
        }
        self.requested_filter = Some(selection.clone());
        Ok(Some(selection))
    }

    /// Place the tooltip above `position` and (re)start its auto-hide.
    /// Returns `false` when the chart is not on the page.
    pub fn show_tooltip(
        &mut self,
        host: &mut impl PageHost,
        message: String,
        position: ChartPoint,
    ) -> GraphExplorerResult<bool> {
        let Some(rect) = host.chart_rect() else {
            return Ok(false);
        };
        let anchor = rect.to_screen(position).raised(self.config.vertical_offset);
        let now = host.now_ms();

        self.tooltip = TooltipState {
            message,
            position,
            anchor,
            visible: true,
            expires_at_ms: now + f64::from(self.config.hide_delay_ms),
        };
        host.show_tooltip(self.tooltip.view())?;

        if self.config.supersede_pending_hide {
            if let Some(previous) = self.pending_hide.take() {
                host.cancel(previous);
            }
        }
        self.next_token += 1;
        let timer = TimerId {
            kind: TimerKind::TooltipHide,
            token: self.next_token,
        };
        host.schedule(timer, self.config.hide_delay_ms)?;
        self.pending_hide = Some(timer);
        Ok(true)
    }

    /// A hide timer fired. In superseding mode only the latest timer hides;
    /// otherwise any timer does, even one armed for an older tooltip.
    pub fn on_timer(&mut self, host: &mut impl PageHost, timer: TimerId) -> bool {
        let latest = self.pending_hide == Some(timer);
        if !latest && self.config.supersede_pending_hide {
            log::debug!("Ignoring stale tooltip timer {}", timer.token);
            return false;
        }
        if latest {
            self.pending_hide = None;
        }
        self.tooltip.visible = false;
        host.hide_tooltip();
        true
    }

    /// Write a legend label into the matching filter control and submit the
    /// filter form. Returns whether the form was submitted.
    pub fn on_legend_click(
        &mut self,
        host: &mut impl PageHost,
        entry: &LegendEntry,
    ) -> GraphExplorerResult<bool> {
        let control = entry.kind().control();
        if !host.set_control_value(control, entry.label())? {
            log::debug!("No {control} filter on the page; legend click ignored");
            return Ok(false);
        }
        host.submit_filter_form()
    }

    pub fn cancel_pending(&mut self, host: &mut impl PageHost) {
        if let Some(pending) = self.pending_hide.take() {
            host.cancel(pending);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{node_click, RecordingHost};
    use shared_types::{ChartRect, PlotPoint, ScreenPoint};

    fn tracker() -> PointerTracker {
        PointerTracker::new(TooltipConfig::default(), "gold")
    }

    #[test]
    fn test_click_places_tooltip_above_point() {
        let mut host = RecordingHost::new().with_chart_rect(ChartRect::new(100.0, 50.0, 400.0, 300.0));
        let mut pointer = tracker();

        let selection = pointer
            .on_click(&mut host, &node_click(0.0, 0.0, "Label: Person<br>Name: Ada"))
            .unwrap();

        assert_eq!(selection.map(|s| s.to_string()), Some("Person".to_string()));
        let shown = host.tooltip.as_ref().unwrap();
        assert_eq!(shown.text, "Click to filter by Person nodes");
        assert_eq!(shown.anchor, ScreenPoint::new(300.0, 170.0));
        assert!(shown.visible);
        assert_eq!(pointer.tooltip().expires_at_ms, host.now + 2000.0);
        assert_eq!(pointer.requested_filter().unwrap().as_str(), "Person");
    }

    #[test]
    fn test_click_without_marker_is_ignored() {
        let mut host = RecordingHost::new();
        let mut pointer = tracker();
        let event = PointerEvent::new(vec![PlotPoint {
            x: Some(0.2),
            y: Some(0.2),
            customdata: Some("Label: Person".to_string()),
            ..Default::default()
        }]);

        assert_eq!(pointer.on_click(&mut host, &event).unwrap(), None);
        assert!(host.tooltip.is_none());
        assert!(host.scheduled_timers().is_empty());
        assert_eq!(pointer.tooltip(), &TooltipState::default());
        assert!(pointer.requested_filter().is_none());
    }

    #[test]
    fn test_click_requires_node_type_filter() {
        let mut host = RecordingHost::new().without_control(FilterControl::NodeType);
        let mut pointer = tracker();
        let result = pointer
            .on_click(&mut host, &node_click(0.0, 0.0, "Label: Person"))
            .unwrap();
        assert_eq!(result, None);
        assert!(host.tooltip.is_none());
    }

    #[test]
    fn test_click_with_unparsable_label_is_ignored() {
        let mut host = RecordingHost::new();
        let mut pointer = tracker();
        let result = pointer
            .on_click(&mut host, &node_click(0.0, 0.0, "Person"))
            .unwrap();
        assert_eq!(result, None);
        assert!(host.tooltip.is_none());
    }

    #[test]
    fn test_empty_event_is_ignored() {
        let mut host = RecordingHost::new();
        let mut pointer = tracker();
        assert_eq!(pointer.on_click(&mut host, &PointerEvent::default()).unwrap(), None);
        assert!(!pointer.on_hover(&mut host, &PointerEvent::default()).unwrap());
    }

    #[test]
    fn test_hover_highlights_nodes_only() {
        let mut host = RecordingHost::new();
        let mut pointer = tracker();

        assert!(pointer
            .on_hover(&mut host, &node_click(0.1, 0.1, "Label: Person"))
            .unwrap());

        let edge = PointerEvent::new(vec![PlotPoint {
            x: Some(0.1),
            y: Some(0.1),
            curve_number: Some(0),
            point_number: Some(3),
            customdata: Some("Type: KNOWS".to_string()),
            ..Default::default()
        }]);
        assert!(!pointer.on_hover(&mut host, &edge).unwrap());

        assert_eq!(host.highlights.len(), 1);
        assert_eq!(host.highlights[0].1, "gold");
    }

    #[test]
    fn test_stale_timer_is_ignored_when_superseding() {
        let mut host = RecordingHost::new();
        let mut pointer = tracker();
        pointer.on_click(&mut host, &node_click(0.0, 0.0, "Label: A")).unwrap();
        pointer.on_click(&mut host, &node_click(0.5, 0.5, "Label: B")).unwrap();

        assert_eq!(host.cancelled.len(), 1);
        let stale = host.cancelled[0];
        assert!(!pointer.on_timer(&mut host, stale));
        assert!(host.tooltip.as_ref().unwrap().visible);

        let live = host.scheduled_timers()[0];
        assert!(pointer.on_timer(&mut host, live));
        assert!(!host.tooltip.as_ref().unwrap().visible);
        assert!(!pointer.tooltip().visible);
    }

    #[test]
    fn test_legend_click_sets_matching_control() {
        let mut host = RecordingHost::new();
        let mut pointer = tracker();

        let submitted = pointer
            .on_legend_click(&mut host, &LegendEntry::new(" KNOWS ", "Relationship Types"))
            .unwrap();

        assert!(submitted);
        assert_eq!(host.submissions, 1);
        assert_eq!(
            host.controls.get(&FilterControl::Relationship).map(String::as_str),
            Some("KNOWS")
        );
        assert_eq!(
            host.controls.get(&FilterControl::NodeType).map(String::as_str),
            Some("all")
        );
    }

    #[test]
    fn test_legend_click_without_form_sets_value_only() {
        let mut host = RecordingHost::new().without_form();
        let mut pointer = tracker();
        let submitted = pointer
            .on_legend_click(&mut host, &LegendEntry::new("Person", "Node Types"))
            .unwrap();
        assert!(!submitted);
        assert_eq!(host.submissions, 0);
        assert_eq!(
            host.controls.get(&FilterControl::NodeType).map(String::as_str),
            Some("Person")
        );
    }
}
