pub mod dashboard_service;
pub mod export_service;
pub mod load_service;
