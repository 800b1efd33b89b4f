//! Property dashboards behind the view router

pub mod components;
pub mod data;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

// Re-export main types and functions for external use
pub use data::{DashboardSource, SampleData};
pub use renderer::render_dashboard;
pub use state::DashboardState;
