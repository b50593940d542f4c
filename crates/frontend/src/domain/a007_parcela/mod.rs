pub mod api;
pub mod ui;
pub mod weather;
