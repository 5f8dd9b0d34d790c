pub mod filter_service;
pub mod metrics_service;
pub mod sparkline_service;
pub mod tooltip_service;
