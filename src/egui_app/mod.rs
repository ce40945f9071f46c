//! egui front end: controller, UI model and renderer.

pub mod controller;
pub mod state;
pub mod ui;
