pub use duckboard_app as app;
pub use duckboard_domain as domain;
pub use duckboard_infra as infra;
pub use duckboard_ui as ui;

pub mod error;
