pub mod dashboard;
pub mod status;

pub use dashboard::dashboard_page;
pub use status::{error_page, load_error_page, loading_page};
