//! WASM bridge crate for Graph Explorer
//! Binds the page interaction layer to the live document and the Plotly widget

use std::cell::RefCell;
use std::rc::Rc;

use config_system::{ConfigParser, ConfigValidator, ExplorerConfig};
use shared_types::{ErrorResponse, GraphExplorerError, OperationEvent, PageEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// Core modules
pub mod controls;
pub mod host;
pub mod page;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod wrappers;

pub use host::PageHost;
pub use page::GraphPage;

use wrappers::dom_host::DomHost;
use wrappers::event_sink::{EventSink, SharedPage};
use wrappers::listeners::ListenerSet;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// The page layer for one document. Create it once per page load; it
/// initializes itself on `DOMContentLoaded` (or immediately when the
/// document has already loaded).
#[wasm_bindgen]
pub struct GraphExplorer {
    page: SharedPage,
    sink: EventSink,
    listeners: Rc<RefCell<ListenerSet>>,
    // Keeps the DOMContentLoaded callback alive until it has run.
    _ready: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl GraphExplorer {
    /// `config` may be a JSON string, a plain object or `undefined`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GraphExplorer, JsValue> {
        let config = load_config(config)?;
        // Ignore the error when a logger is already installed.
        let _ = console_log::init_with_level(config.logging.level());

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object"))?;

        let page: SharedPage = Rc::new_cyclic(|weak| {
            let sink = EventSink::new(weak.clone());
            let host = DomHost::new(window.clone(), document.clone(), &config, sink);
            RefCell::new(GraphPage::new(host, config.clone()))
        });
        let sink = page.borrow().host().sink().clone();
        let listeners = Rc::new(RefCell::new(ListenerSet::default()));

        let attach = {
            let page = Rc::clone(&page);
            let listeners = Rc::clone(&listeners);
            let sink = sink.clone();
            let window = window.clone();
            let operation_event = config.logging.operation_event.clone();
            move || attach_page(&page, &sink, &listeners, &window, &operation_event)
        };

        let ready = if document.ready_state() == "loading" {
            let mut attach = Some(attach);
            let callback = Closure::<dyn FnMut()>::new(move || {
                if let Some(attach) = attach.take() {
                    attach();
                }
            });
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                callback.as_ref().unchecked_ref(),
            )?;
            Some(callback)
        } else {
            attach();
            None
        };

        log::info!("Graph explorer created");
        Ok(GraphExplorer {
            page,
            sink,
            listeners,
            _ready: ready,
        })
    }

    #[wasm_bindgen(js_name = toggleLoading)]
    pub fn toggle_loading(&self, show: bool) {
        self.with_page(|page| page.toggle_loading(show));
    }

    #[wasm_bindgen(js_name = resizeGraph)]
    pub fn resize_graph(&self) {
        self.with_page(|page| page.resize_graph());
    }

    /// Log and return the numbered operation history of this session.
    #[wasm_bindgen(js_name = showAllOperations)]
    pub fn show_all_operations(&self) -> js_sys::Array {
        let lines = self
            .with_page(|page| page.show_all_operations())
            .unwrap_or_default();
        lines.iter().map(|line| JsValue::from_str(line)).collect()
    }

    /// The recorded operations as plain objects.
    pub fn operations(&self) -> Result<JsValue, JsValue> {
        let records = self
            .with_page(|page| page.session().operations.records().to_vec())
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(&records).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = logOperation)]
    pub fn log_operation(&self, operation: String, timestamp: String) {
        self.sink
            .send(PageEvent::Operation(OperationEvent { operation, timestamp }));
    }

    #[wasm_bindgen(js_name = requestedFilter)]
    pub fn requested_filter(&self) -> Option<String> {
        self.with_page(|page| page.requested_filter().map(|f| f.to_string()))
            .flatten()
    }

    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl GraphExplorer {
    /// Run `f` on the page, then deliver any events it raised.
    fn with_page<R>(&self, f: impl FnOnce(&mut GraphPage<DomHost>) -> R) -> Option<R> {
        let result = match self.page.try_borrow_mut() {
            Ok(mut page) => Some(f(&mut page)),
            Err(_) => {
                log::warn!("Graph explorer is busy; call ignored");
                None
            }
        };
        self.sink.flush();
        result
    }
}

fn attach_page(
    page: &SharedPage,
    sink: &EventSink,
    listeners: &Rc<RefCell<ListenerSet>>,
    window: &web_sys::Window,
    operation_event: &str,
) {
    sink.send(PageEvent::Ready);

    let bound = {
        let Ok(page) = page.try_borrow() else {
            log::warn!("Graph explorer is busy; listeners not bound");
            return;
        };
        listeners
            .borrow_mut()
            .bind_page(window, page.host(), operation_event)
    };
    if let Err(e) = bound {
        log::warn!("Binding page listeners failed: {}", GraphExplorerError::from(e));
    }
}

fn load_config(config: JsValue) -> Result<ExplorerConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(ExplorerConfig::default());
    }

    if let Some(json) = config.as_string() {
        return ConfigParser::parse_json(&json).map_err(|e| config_error(e.into()));
    }

    let config: ExplorerConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| config_error(GraphExplorerError::invalid_config("config", e.to_string())))?;
    ConfigValidator::validate(&config).map_err(|e| config_error(e.into()))?;
    Ok(config)
}

fn config_error(error: GraphExplorerError) -> JsValue {
    let response = ErrorResponse::new(error).with_component("ExplorerConfig");
    JsValue::from_str(&response.to_json())
}
