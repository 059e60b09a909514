// Work-order scheduling engine
// Exports all modules for testing and reuse

pub mod interaction;
pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
