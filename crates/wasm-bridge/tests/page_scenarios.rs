use config_system::ExplorerConfig;
use graph_explorer_wasm::testing::{node_click, RecordingHost, START_MS};
use graph_explorer_wasm::GraphPage;
use shared_types::{
    ChartRect, ChartSize, FilterControl, LegendEntry, OperationEvent, OverlayState, PageEvent,
    PointRef, ScreenPoint,
};

fn ready_page(host: RecordingHost) -> GraphPage<RecordingHost> {
    ready_page_with(host, ExplorerConfig::default())
}

fn ready_page_with(host: RecordingHost, config: ExplorerConfig) -> GraphPage<RecordingHost> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut page = GraphPage::new(host, config);
    page.dispatch(PageEvent::Ready);
    page
}

fn tooltip_visible(page: &GraphPage<RecordingHost>) -> bool {
    page.host().tooltip.as_ref().is_some_and(|t| t.visible)
}

fn operation(name: &str, timestamp: &str) -> PageEvent {
    PageEvent::Operation(OperationEvent {
        operation: name.to_string(),
        timestamp: timestamp.to_string(),
    })
}

#[test]
fn test_every_resize_uses_current_container_width() {
    let mut page = ready_page(RecordingHost::new().with_container_width(800));

    page.host_mut().container_width = Some(640);
    page.dispatch(PageEvent::Resize);
    page.host_mut().container_width = Some(1280);
    page.dispatch(PageEvent::Resize);

    assert_eq!(
        page.host().relayouts,
        vec![
            ChartSize::new(800, 700),
            ChartSize::new(640, 700),
            ChartSize::new(1280, 700),
        ]
    );
}

#[test]
fn test_toggle_loading_is_idempotent() {
    let mut page = ready_page(RecordingHost::new());

    page.toggle_loading(true);
    page.toggle_loading(true);
    assert_eq!(page.viewport().overlay(), OverlayState::Visible);
    assert_eq!(page.host().overlay_visible, Some(true));

    page.toggle_loading(false);
    assert_eq!(page.viewport().overlay(), OverlayState::Hidden);
    assert_eq!(page.host().overlay_visible, Some(false));
}

#[test]
fn test_tooltip_anchor_at_chart_center() {
    let host = RecordingHost::new().with_chart_rect(ChartRect::new(100.0, 50.0, 400.0, 300.0));
    let mut page = ready_page(host);

    page.dispatch(PageEvent::Click(node_click(0.0, 0.0, "Label: Person")));

    let tooltip = page.host().tooltip.clone().unwrap();
    assert_eq!(tooltip.anchor, ScreenPoint::new(300.0, 170.0));
    assert_eq!(page.pointer().tooltip().position.x, 0.0);
}

#[test]
fn test_tooltip_anchor_at_chart_corner() {
    let host = RecordingHost::new().with_chart_rect(ChartRect::new(100.0, 50.0, 400.0, 300.0));
    let mut page = ready_page(host);

    page.dispatch(PageEvent::Click(node_click(1.0, -1.0, "Label: Person")));

    let tooltip = page.host().tooltip.clone().unwrap();
    assert_eq!(tooltip.anchor, ScreenPoint::new(500.0, 20.0));
}

#[test]
fn test_tooltip_hides_after_delay() {
    let mut page = ready_page(RecordingHost::new());
    page.dispatch(PageEvent::Click(node_click(0.2, 0.4, "Label: Company")));
    assert!(tooltip_visible(&page));

    page.advance(1999.0);
    assert!(tooltip_visible(&page));

    page.advance(1.0);
    assert!(!tooltip_visible(&page));
    assert!(!page.pointer().tooltip().visible);
    assert_eq!(page.host().now, START_MS + 2000.0);
}

#[test]
fn test_second_show_keeps_tooltip_until_its_own_delay() {
    let mut page = ready_page(RecordingHost::new());

    page.dispatch(PageEvent::Click(node_click(0.0, 0.0, "Label: Person")));
    page.advance(500.0);
    page.dispatch(PageEvent::Click(node_click(0.5, 0.5, "Label: Movie")));

    page.advance(1500.0);
    assert!(tooltip_visible(&page), "stale hide must not fire");
    assert_eq!(
        page.host().tooltip.as_ref().unwrap().text,
        "Click to filter by Movie nodes"
    );

    page.advance(500.0);
    assert!(!tooltip_visible(&page));
    assert_eq!(page.host().cancelled.len(), 1);
}

#[test]
fn test_legacy_mode_hides_on_first_timer() {
    let mut config = ExplorerConfig::default();
    config.tooltip.supersede_pending_hide = false;
    let mut page = ready_page_with(RecordingHost::new(), config);

    page.dispatch(PageEvent::Click(node_click(0.0, 0.0, "Label: Person")));
    page.advance(500.0);
    page.dispatch(PageEvent::Click(node_click(0.5, 0.5, "Label: Movie")));
    assert_eq!(page.host().scheduled_timers().len(), 2);

    page.advance(1500.0);
    assert!(!tooltip_visible(&page));
    assert!(page.host().cancelled.is_empty());

    // The second timer still fires; the tooltip stays hidden.
    page.advance(500.0);
    assert!(!tooltip_visible(&page));
    assert!(page.host().scheduled_timers().is_empty());
}

#[test]
fn test_tooltip_node_created_once() {
    let mut page = ready_page(RecordingHost::new());
    for _ in 0..3 {
        page.dispatch(PageEvent::Click(node_click(0.0, 0.0, "Label: Person")));
        page.advance(2500.0);
    }
    assert_eq!(page.host().tooltip_nodes_created, 1);
}

#[test]
fn test_legend_click_submits_once_per_click() {
    let mut page = ready_page(RecordingHost::new());
    let entry = LegendEntry::new("  Person ", "Node Types");

    page.dispatch(PageEvent::LegendClick(entry.clone()));
    assert_eq!(page.host().controls[&FilterControl::NodeType], "Person");
    assert_eq!(page.host().submissions, 1);

    page.dispatch(PageEvent::LegendClick(entry));
    assert_eq!(page.host().submissions, 2);
}

#[test]
fn test_relationship_legend_sets_relationship_filter() {
    let mut page = ready_page(RecordingHost::new());
    page.dispatch(PageEvent::LegendClick(LegendEntry::new("ACTED_IN", "Relationship Types")));

    assert_eq!(page.host().controls[&FilterControl::Relationship], "ACTED_IN");
    assert_eq!(page.host().controls[&FilterControl::NodeType], "all");
    assert_eq!(page.host().submissions, 1);
}

#[test]
fn test_legend_click_without_matching_control_does_nothing() {
    let host = RecordingHost::new().without_control(FilterControl::Relationship);
    let mut page = ready_page(host);
    page.dispatch(PageEvent::LegendClick(LegendEntry::new("KNOWS", "Relationships")));

    assert_eq!(page.host().submissions, 0);
    assert_eq!(page.viewport().overlay(), OverlayState::Hidden);
}

#[test]
fn test_click_without_marker_size_changes_nothing() {
    let mut page = ready_page(RecordingHost::new());
    let mut event = node_click(0.0, 0.0, "Label: Person");
    event.points[0].marker = None;

    page.dispatch(PageEvent::Click(event));

    assert!(page.host().tooltip.is_none());
    assert!(page.host().scheduled_timers().is_empty());
    assert!(page.requested_filter().is_none());
}

#[test]
fn test_click_records_requested_filter() {
    let mut page = ready_page(RecordingHost::new());
    page.dispatch(PageEvent::Click(node_click(0.0, 0.0, "Label: Person<br>Name: Ada")));
    assert_eq!(page.requested_filter().unwrap().as_str(), "Person");
}

#[test]
fn test_markup_in_hover_text_is_kept() {
    let mut page = ready_page(RecordingHost::new());
    page.dispatch(PageEvent::Click(node_click(
        0.0,
        0.0,
        "<b>Label:</b> Person<br><b>Name:</b> Ada",
    )));

    assert_eq!(
        page.host().tooltip.as_ref().unwrap().text,
        "Click to filter by </b> Person nodes"
    );
}

#[test]
fn test_hover_highlights_node() {
    let mut page = ready_page(RecordingHost::new());
    page.dispatch(PageEvent::Hover(node_click(0.0, 0.0, "Label: Person")));

    assert_eq!(
        page.host().highlights,
        vec![(
            PointRef {
                curve_number: 1,
                point_number: 0
            },
            "rgba(255, 207, 86, 1)".to_string()
        )]
    );
}

#[test]
fn test_operation_log_in_order_and_cleared_on_unload() {
    let mut page = ready_page(RecordingHost::new());
    page.dispatch(operation("create_node", "2024-01-01 10:00:00"));
    page.advance(1000.0);
    page.dispatch(operation("delete_node", "2024-01-01 10:00:01"));

    let records = page.session().operations.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].operation, "create_node");
    assert_eq!(records[0].time, "2024-01-01T00:00:00.000Z");
    assert_eq!(records[1].operation, "delete_node");
    assert_eq!(records[1].time, "2024-01-01T00:00:01.000Z");

    assert_eq!(
        page.show_all_operations(),
        vec![
            "1. create_node [2024-01-01 10:00:00]".to_string(),
            "2. delete_node [2024-01-01 10:00:01]".to_string(),
        ]
    );

    page.dispatch(PageEvent::Unload);
    assert!(page.session().operations.is_empty());
    assert!(page.show_all_operations().is_empty());
}

#[test]
fn test_debounced_resizes_relayout_once() {
    let mut config = ExplorerConfig::default();
    config.viewport.resize_debounce_ms = Some(150);
    let mut page = ready_page_with(RecordingHost::new(), config);
    assert_eq!(page.host().relayouts.len(), 1);

    for width in [700, 650, 600, 550, 500] {
        page.host_mut().container_width = Some(width);
        page.dispatch(PageEvent::Resize);
        page.advance(50.0);
    }
    assert_eq!(page.host().relayouts.len(), 1);

    page.advance(100.0);
    assert_eq!(
        page.host().relayouts,
        vec![ChartSize::new(800, 700), ChartSize::new(500, 700)]
    );
    assert_eq!(page.viewport().last_size(), Some(ChartSize::new(500, 700)));
}

#[test]
fn test_page_without_optional_elements_is_inert() {
    let mut page = ready_page(RecordingHost::empty());

    page.dispatch(PageEvent::Resize);
    page.dispatch(PageEvent::FilterSubmitted);
    page.dispatch(PageEvent::Hover(node_click(0.0, 0.0, "Label: Person")));
    page.dispatch(PageEvent::Click(node_click(0.0, 0.0, "Label: Person")));
    page.dispatch(PageEvent::LegendClick(LegendEntry::new("Person", "Node Types")));
    page.toggle_loading(true);

    let host = page.host();
    assert!(page.is_initialized());
    assert!(host.relayouts.is_empty());
    assert_eq!(host.overlay_visible, None);
    assert!(host.tooltip.is_none());
    assert_eq!(host.submissions, 0);
    assert_eq!(page.viewport().overlay(), OverlayState::Hidden);
}

#[test]
fn test_missing_form_keeps_other_features() {
    let mut page = ready_page(RecordingHost::new().without_form());

    page.dispatch(PageEvent::LegendClick(LegendEntry::new("Person", "Node Types")));
    assert_eq!(page.host().submissions, 0);
    assert_eq!(page.viewport().overlay(), OverlayState::Hidden);

    page.dispatch(PageEvent::Resize);
    assert_eq!(page.host().relayouts.len(), 2);
}
