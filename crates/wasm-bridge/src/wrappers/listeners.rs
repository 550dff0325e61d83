//! DOM and chart event subscriptions
//!
//! Every binding is optional: an element missing from the page simply gets
//! no listener.

use shared_types::{FilterControl, LegendEntry, OperationEvent, PageEvent, PointerEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, Element, EventTarget, HtmlElement};

use crate::wrappers::dom_host::DomHost;
use crate::wrappers::event_sink::EventSink;
use crate::wrappers::plotly;

pub type Listener = Closure<dyn FnMut(JsValue)>;

/// Owns the closures handed to the DOM; dropping it invalidates them.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<Listener>,
}

impl ListenerSet {
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn on(
        &mut self,
        target: &EventTarget,
        event: &str,
        handler: impl FnMut(JsValue) + 'static,
    ) -> Result<(), JsValue> {
        let listener = Listener::new(handler);
        target.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
        self.listeners.push(listener);
        Ok(())
    }

    /// Bind everything the page offers. `window` and `document` are always
    /// present; the rest is looked up through the host.
    pub fn bind_page(
        &mut self,
        window: &web_sys::Window,
        host: &DomHost,
        operation_event: &str,
    ) -> Result<(), JsValue> {
        let sink = host.sink().clone();
        self.on(window, "resize", send(&sink, |_| Some(PageEvent::Resize)))?;
        self.on(window, "pagehide", send(&sink, |_| Some(PageEvent::Unload)))?;

        if let Some(form) = host.filter_form() {
            self.on(&form, "submit", send(&sink, |_| Some(PageEvent::FilterSubmitted)))?;
        }

        for control in FilterControl::ALL {
            if let Some(element) = host.control(control) {
                self.on(
                    &element,
                    "change",
                    send(&sink, move |event| {
                        Some(PageEvent::ControlChanged {
                            control,
                            value: target_value(&event).unwrap_or_default(),
                        })
                    }),
                )?;
            }
        }

        if let Some(chart) = host.chart() {
            self.bind_chart(&chart, &sink);
        }

        self.bind_legend(host, &sink)?;

        self.on(
            host.document(),
            operation_event,
            send(&sink, |event| operation_from_event(&event).map(PageEvent::Operation)),
        )?;

        log::debug!("Bound {} page listeners", self.listeners.len());
        Ok(())
    }

    fn bind_chart(&mut self, chart: &Element, sink: &EventSink) {
        let bindings: [(&'static str, fn(PointerEvent) -> PageEvent); 2] = [
            ("plotly_hover", PageEvent::Hover),
            ("plotly_click", PageEvent::Click),
        ];

        for (name, wrap) in bindings {
            let listener = Listener::new(send(sink, move |data| {
                match plotly::pointer_event_from_js(&data) {
                    Ok(event) => Some(wrap(event)),
                    Err(e) => {
                        log::debug!("Ignoring {name} payload: {e}");
                        None
                    }
                }
            }));
            match plotly::subscribe(chart, name, listener.as_ref().unchecked_ref()) {
                Ok(()) => self.listeners.push(listener),
                Err(e) => log::warn!("Chart events unavailable: {e}"),
            }
        }
    }

    fn bind_legend(&mut self, host: &DomHost, sink: &EventSink) -> Result<(), JsValue> {
        let selectors = host.selectors();
        let items = host.document().query_selector_all(&selectors.legend_item)?;

        for index in 0..items.length() {
            let Some(item) = items.get(index).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            if let Some(styled) = item.dyn_ref::<HtmlElement>() {
                styled.style().set_property("cursor", "pointer")?;
            }

            let label_selector = selectors.legend_label.clone();
            let heading_selector = selectors.legend_heading.clone();
            let entry_source = item.clone();
            self.on(
                &item,
                "click",
                send(sink, move |_| {
                    legend_entry(&entry_source, &label_selector, &heading_selector)
                        .map(PageEvent::LegendClick)
                }),
            )?;
        }
        Ok(())
    }
}

/// Wrap an event translator so its output goes through `sink`.
fn send(
    sink: &EventSink,
    mut translate: impl FnMut(JsValue) -> Option<PageEvent> + 'static,
) -> impl FnMut(JsValue) + 'static {
    let sink = sink.clone();
    move |event| {
        if let Some(page_event) = translate(event) {
            sink.send(page_event);
        }
    }
}

fn target_value(event: &JsValue) -> Option<String> {
    let target = event.dyn_ref::<web_sys::Event>()?.target()?;
    js_sys::Reflect::get(&target, &"value".into()).ok()?.as_string()
}

/// Decode the `{operation, timestamp}` detail of an operation event.
pub fn operation_from_event(event: &JsValue) -> Option<OperationEvent> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    match serde_wasm_bindgen::from_value(detail) {
        Ok(operation) => Some(operation),
        Err(e) => {
            log::debug!("Ignoring malformed operation event: {e}");
            None
        }
    }
}

/// Read a legend item's label and its group heading at click time.
pub fn legend_entry(
    item: &Element,
    label_selector: &str,
    heading_selector: &str,
) -> Option<LegendEntry> {
    let label = item.query_selector(label_selector).ok()??.text_content()?;
    let heading = item
        .parent_element()?
        .query_selector(heading_selector)
        .ok()??
        .text_content()?;
    Some(LegendEntry::new(label.trim(), heading))
}
