pub mod detail;
pub mod state;
