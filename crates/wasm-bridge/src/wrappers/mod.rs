pub mod dom_host;
pub mod event_sink;
pub mod listeners;
pub mod plotly;
