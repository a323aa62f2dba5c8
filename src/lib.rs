// Re-export all public modules so they can be used from main.rs
pub mod logging;
pub mod ui;
pub mod utils;

// MVC layout
pub mod controller;
pub mod model;
pub mod view;
