//! Startup sequence: the pipeline must load before any form exists.

use thiserror::Error;
use tracing::{info, warn};

use crate::egui_app::controller::FormController;
use crate::pipeline::{ArtifactLoader, LoadError, Pipeline, PipelineInvoker};
use crate::samples::SampleStore;
use crate::schema::FieldSchema;
use crate::settings::ConfigError;

/// Conditions that stop the app before the form is shown.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load settings: {0}")]
    Settings(#[from] ConfigError),
    #[error("Cannot start without a prediction pipeline: {0}")]
    Pipeline(#[from] LoadError),
}

/// Load the pipeline through `loader` and build the form controller.
///
/// The invoker keeps the loaded pipeline for the rest of the process, so
/// every later prediction reuses it.
pub fn bootstrap(loader: impl ArtifactLoader + 'static) -> Result<FormController, StartupError> {
    let invoker = PipelineInvoker::new(loader);
    let pipeline = invoker.load()?;
    let schema = FieldSchema::student();
    let mismatches = pipeline.check_schema(&schema);
    for mismatch in &mismatches {
        warn!(%mismatch, "Pipeline and form schema disagree");
    }
    info!(
        fields = schema.len(),
        mismatches = mismatches.len(),
        "Form ready"
    );
    Ok(FormController::new(schema, SampleStore::builtin(), invoker))
}
