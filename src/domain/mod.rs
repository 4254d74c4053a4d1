pub mod aggregate;
pub mod date_column;
pub mod entities;
pub mod errors;
pub mod filter;
pub mod metrics;
