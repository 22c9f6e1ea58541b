pub mod config;
pub mod logging;
pub mod ai;
pub mod address;
pub mod web_ui;
