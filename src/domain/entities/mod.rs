pub mod selector;
pub mod summary;
pub mod table;
