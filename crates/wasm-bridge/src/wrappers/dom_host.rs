use std::collections::HashMap;

use config_system::{ExplorerConfig, PageSelectors};
use shared_types::{
    ChartRect, ChartSize, FilterControl, GraphExplorerError, GraphExplorerResult, PageEvent,
    PointRef, TimerId, TooltipStyle, TooltipView,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, Window,
};

use crate::host::PageHost;
use crate::wrappers::event_sink::EventSink;
use crate::wrappers::plotly;

/// [`PageHost`] backed by the live document.
pub struct DomHost {
    window: Window,
    document: Document,
    selectors: PageSelectors,
    tooltip_style: TooltipStyle,
    sink: EventSink,
    /// Live timeouts with the callbacks they will run
    timers: HashMap<TimerId, (i32, Closure<dyn FnMut()>)>,
    overlay: Option<Element>,
}

impl DomHost {
    pub fn new(window: Window, document: Document, config: &ExplorerConfig, sink: EventSink) -> Self {
        Self {
            window,
            document,
            selectors: config.selectors.clone(),
            tooltip_style: config.tooltip.style.clone(),
            sink,
            timers: HashMap::new(),
            overlay: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selectors(&self) -> &PageSelectors {
        &self.selectors
    }

    pub fn sink(&self) -> &EventSink {
        &self.sink
    }

    /// Timers scheduled and neither fired nor cancelled.
    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn container(&self) -> Option<Element> {
        self.query(&self.selectors.container)
    }

    pub fn chart(&self) -> Option<Element> {
        self.query(&self.selectors.chart)
    }

    pub fn control(&self, control: FilterControl) -> Option<Element> {
        self.document
            .get_element_by_id(self.selectors.control_id(control))
    }

    pub fn filter_form(&self) -> Option<HtmlFormElement> {
        self.document
            .get_element_by_id(&self.selectors.filter_form_id)
            .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
    }

    fn tooltip_node(&self) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(&self.selectors.tooltip_id)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
    }

    fn create_tooltip_node(&self) -> GraphExplorerResult<HtmlElement> {
        let node: HtmlElement = self.document.create_element("div")?.unchecked_into();
        node.set_id(&self.selectors.tooltip_id);
        let style = node.style();
        for (property, value) in self.tooltip_style.declarations() {
            style.set_property(property, value)?;
        }

        let body = self.document.body().ok_or_else(|| GraphExplorerError::JsInterop {
            message: "document has no body".to_string(),
        })?;
        body.append_child(&node)?;
        Ok(node)
    }
}

impl PageHost for DomHost {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn schedule(&mut self, timer: TimerId, delay_ms: u32) -> GraphExplorerResult<()> {
        let sink = self.sink.clone();
        let callback =
            Closure::<dyn FnMut()>::once(move || sink.send(PageEvent::TimerExpired(timer)));
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                i32::try_from(delay_ms).unwrap_or(i32::MAX),
            )?;
        self.timers.insert(timer, (handle, callback));
        Ok(())
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some((handle, _callback)) = self.timers.remove(&timer) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn release_timer(&mut self, timer: TimerId) {
        // Usually called from inside the callback being dropped; wasm-bindgen
        // defers freeing it until the call returns.
        self.timers.remove(&timer);
    }

    fn container_width(&self) -> Option<u32> {
        let container = self.container()?.dyn_into::<HtmlElement>().ok()?;
        Some(container.offset_width().max(0) as u32)
    }

    fn ensure_overlay(&mut self) -> GraphExplorerResult<bool> {
        let Some(container) = self.container() else {
            return Ok(false);
        };

        let overlay = match self.query(&self.selectors.overlay_selector()) {
            Some(existing) => existing,
            None => {
                let overlay = self.document.create_element("div")?;
                overlay.set_class_name(&self.selectors.overlay_class);
                let spinner = self.document.create_element("div")?;
                spinner.set_class_name(&self.selectors.spinner_class);
                overlay.append_child(&spinner)?;
                container.append_child(&overlay)?;
                overlay
            }
        };
        self.overlay = Some(overlay);
        Ok(true)
    }

    fn set_overlay_visible(&mut self, visible: bool) -> GraphExplorerResult<()> {
        if let Some(overlay) = &self.overlay {
            overlay
                .class_list()
                .toggle_with_force(&self.selectors.overlay_active_class, visible)?;
        }
        Ok(())
    }

    fn has_chart(&self) -> bool {
        self.chart().is_some()
    }

    fn chart_rect(&self) -> Option<ChartRect> {
        let rect = self.chart()?.get_bounding_client_rect();
        Some(ChartRect::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }

    fn relayout(&mut self, size: ChartSize) -> GraphExplorerResult<()> {
        match self.chart() {
            Some(chart) => plotly::relayout(&chart, size),
            None => Ok(()),
        }
    }

    fn highlight(&mut self, point: PointRef, color: &str) -> GraphExplorerResult<()> {
        match self.chart() {
            Some(chart) => plotly::highlight_point(&chart, point, color),
            None => Ok(()),
        }
    }

    fn show_tooltip(&mut self, view: TooltipView<'_>) -> GraphExplorerResult<()> {
        let node = match self.tooltip_node() {
            Some(node) => node,
            None => self.create_tooltip_node()?,
        };

        let style = node.style();
        style.set_property("left", &format!("{}px", view.anchor.x))?;
        style.set_property("top", &format!("{}px", view.anchor.y))?;
        node.set_text_content(Some(view.text));
        style.set_property("display", "block")?;
        Ok(())
    }

    fn hide_tooltip(&mut self) {
        if let Some(node) = self.tooltip_node() {
            if let Err(e) = node.style().set_property("display", "none") {
                log::debug!("Could not hide tooltip: {e:?}");
            }
        }
    }

    fn has_control(&self, control: FilterControl) -> bool {
        self.control(control).is_some()
    }

    fn set_control_value(
        &mut self,
        control: FilterControl,
        value: &str,
    ) -> GraphExplorerResult<bool> {
        let Some(element) = self.control(control) else {
            return Ok(false);
        };

        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else {
            js_sys::Reflect::set(&element, &"value".into(), &value.into())?;
        }
        Ok(true)
    }

    fn submit_filter_form(&mut self) -> GraphExplorerResult<bool> {
        let Some(form) = self.filter_form() else {
            return Ok(false);
        };
        form.submit()?;
        Ok(true)
    }
}
