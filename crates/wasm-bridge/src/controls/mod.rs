pub mod pointer_tracker;
pub mod viewport_controller;

pub use pointer_tracker::PointerTracker;
pub use viewport_controller::ViewportController;
