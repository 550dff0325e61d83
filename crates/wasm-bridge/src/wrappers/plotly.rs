//! Bindings to the Plotly chart widget and its event payloads
//!
//! Plotly point objects hold references back into the figure (`fullData`,
//! axes, the graph div), so payloads are read field by field instead of
//! being deserialized wholesale.

use js_sys::{Array, Object, Promise, Reflect};
use shared_types::{
    ChartSize, GraphExplorerError, GraphExplorerResult, Marker, MarkerSize, PlotPoint, PointRef,
    PointerEvent, TraceData,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = relayout, catch)]
    fn plotly_relayout(graph_div: &Element, update: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, js_name = restyle, catch)]
    fn plotly_restyle(
        graph_div: &Element,
        update: &JsValue,
        traces: &JsValue,
    ) -> Result<Promise, JsValue>;

    /// A `.js-plotly-plot` div after Plotly has attached its event emitter.
    #[wasm_bindgen(extends = Element)]
    pub type PlotlyGraphDiv;

    #[wasm_bindgen(method, catch, js_name = on)]
    fn plotly_on(
        this: &PlotlyGraphDiv,
        event: &str,
        handler: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;
}

/// Subscribe `handler` to a Plotly event (`plotly_hover`, `plotly_click`).
pub fn subscribe(
    graph_div: &Element,
    event: &str,
    handler: &js_sys::Function,
) -> GraphExplorerResult<()> {
    let graph_div: &PlotlyGraphDiv = graph_div.unchecked_ref();
    graph_div
        .plotly_on(event, handler)
        .map(|_| ())
        .map_err(|e| GraphExplorerError::chart_widget("on", describe(&e)))
}

pub fn relayout(graph_div: &Element, size: ChartSize) -> GraphExplorerResult<()> {
    let update = serde_wasm_bindgen::to_value(&size).map_err(|e| {
        GraphExplorerError::Serialization {
            message: e.to_string(),
        }
    })?;
    let promise = plotly_relayout(graph_div, &update)
        .map_err(|e| GraphExplorerError::chart_widget("relayout", describe(&e)))?;
    settle("relayout", promise);
    Ok(())
}

/// Set one point's marker color, keeping the rest of the trace's colors.
pub fn highlight_point(graph_div: &Element, point: PointRef, color: &str) -> GraphExplorerResult<()> {
    let trace = Reflect::get(graph_div, &"data".into())
        .and_then(|data| Reflect::get_u32(&data, point.curve_number))?;
    if trace.is_undefined() {
        return Err(GraphExplorerError::chart_widget(
            "restyle",
            format!("no trace {}", point.curve_number),
        ));
    }

    let marker = Reflect::get(&trace, &"marker".into())?;
    let current = if marker.is_object() {
        Reflect::get(&marker, &"color".into())?
    } else {
        JsValue::UNDEFINED
    };

    let colors = if Array::is_array(&current) {
        Array::from(&current)
    } else {
        let count = Reflect::get(&trace, &"x".into())
            .ok()
            .filter(Array::is_array)
            .map(|x| Array::from(&x).length())
            .unwrap_or(point.point_number + 1);
        let filled = Array::new_with_length(count);
        filled.fill(&current, 0, count);
        filled
    };
    colors.set(point.point_number, JsValue::from_str(color));

    let update = Object::new();
    Reflect::set(&update, &"marker.color".into(), &Array::of1(&colors))?;
    let traces = Array::of1(&JsValue::from(point.curve_number));
    let promise = plotly_restyle(graph_div, &update, &traces)
        .map_err(|e| GraphExplorerError::chart_widget("restyle", describe(&e)))?;
    settle("restyle", promise);
    Ok(())
}

/// Plotly commands resolve asynchronously; a rejection is only worth a log
/// line.
fn settle(call: &'static str, promise: Promise) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("Plotly.{call} rejected: {}", describe(&e));
        }
    });
}

fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Read a `plotly_hover` / `plotly_click` payload.
pub fn pointer_event_from_js(data: &JsValue) -> GraphExplorerResult<PointerEvent> {
    let points = Reflect::get(data, &"points".into())?;
    if !Array::is_array(&points) {
        return Err(GraphExplorerError::InvalidPayload {
            message: "event has no points list".to_string(),
        });
    }

    let points = Array::from(&points)
        .iter()
        .map(|point| plot_point_from_js(&point))
        .collect::<GraphExplorerResult<Vec<_>>>()?;
    Ok(PointerEvent::new(points))
}

fn plot_point_from_js(point: &JsValue) -> GraphExplorerResult<PlotPoint> {
    let data = Reflect::get(point, &"data".into())?;
    let trace = if data.is_object() {
        trace_from_js(&data)?
    } else {
        TraceData::default()
    };

    // Plotly copies styling onto the point only for some trace types; fall
    // back to the trace's own marker.
    let mut marker = marker_from_js(&Reflect::get(point, &"marker".into())?)?;
    if marker.is_none() && data.is_object() {
        marker = marker_from_js(&Reflect::get(&data, &"marker".into())?)?;
    }

    Ok(PlotPoint {
        x: number_field(point, "x")?,
        y: number_field(point, "y")?,
        curve_number: index_field(point, "curveNumber")?,
        point_number: index_field(point, "pointNumber")?,
        marker,
        customdata: Reflect::get(point, &"customdata".into())?.as_string(),
        data: trace,
    })
}

fn trace_from_js(data: &JsValue) -> GraphExplorerResult<TraceData> {
    let customdata = Reflect::get(data, &"customdata".into())?;
    let customdata = if Array::is_array(&customdata) {
        Array::from(&customdata)
            .iter()
            .map(|entry| entry.as_string().unwrap_or_default())
            .collect()
    } else {
        Vec::new()
    };

    Ok(TraceData {
        name: Reflect::get(data, &"name".into())?.as_string(),
        customdata,
    })
}

fn marker_from_js(marker: &JsValue) -> GraphExplorerResult<Option<Marker>> {
    if !marker.is_object() {
        return Ok(None);
    }

    let size = Reflect::get(marker, &"size".into())?;
    let size = if let Some(size) = size.as_f64() {
        Some(MarkerSize::Uniform(size))
    } else if Array::is_array(&size) {
        Some(MarkerSize::PerPoint(
            Array::from(&size)
                .iter()
                .map(|s| s.as_f64().unwrap_or(0.0))
                .collect(),
        ))
    } else {
        None
    };

    Ok(Some(Marker { size }))
}

fn number_field(object: &JsValue, key: &str) -> GraphExplorerResult<Option<f64>> {
    Ok(Reflect::get(object, &key.into())?.as_f64())
}

fn index_field(object: &JsValue, key: &str) -> GraphExplorerResult<Option<u32>> {
    Ok(number_field(object, key)?
        .filter(|n| *n >= 0.0 && n.fract() == 0.0)
        .map(|n| n as u32))
}
