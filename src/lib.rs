//! Library exports for the binary, benchmarks and tests.
/// Application directory resolution.
pub mod app_dirs;
/// egui front end.
pub mod egui_app;
/// Input collection for the form.
pub mod form;
/// Tracing setup.
pub mod logging;
/// Classifier models.
pub mod ml;
/// Pipeline artifact, row format and invoker.
pub mod pipeline;
/// Per-field values and records.
pub mod record;
/// Built-in sample records.
pub mod samples;
/// Form field definitions.
pub mod schema;
/// TOML settings.
pub mod settings;
/// Startup sequence.
pub mod startup;
