// src/dashboard/mod.rs

pub mod data;
pub mod filter;
pub mod sort;
pub mod state;
pub mod view;

pub use data::DashboardData;
pub use filter::{DashboardQuery, FilterState};
pub use sort::SortColumn;
pub use state::{shared_loading, snapshot, spawn_loader, DashboardState, SharedDashboard};
pub use view::{AppState, BandSlice, SubAreaBar};
