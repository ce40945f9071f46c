//! Prediction pipeline: artifact format, single-row input and the load-once
//! invoker.
//!
//! A pipeline couples per-column preprocessing with a classifier and maps
//! one [`TabularRow`] to one [`Prediction`]. Columns are matched by name.

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::FieldSchema;

mod artifact;
mod frame;
mod invoker;

pub use artifact::{
    ARTIFACT_FORMAT_VERSION, Classifier, ColumnSpec, ColumnTransform, FittedPipeline,
    PipelineArtifact, SchemaMismatch, UnknownCategoryPolicy,
};
pub use frame::TabularRow;
pub use invoker::{ArtifactLoader, DEFAULT_ARTIFACT_PATH, JsonArtifactLoader, PipelineInvoker};

/// Single label produced for one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Probability of `label`, when the model reports one.
    pub confidence: Option<f32>,
}

impl Prediction {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confidence: None,
        }
    }
}

/// A loaded, read-only inference pipeline.
pub trait Pipeline: Send + Sync {
    /// Column names the pipeline was fit on.
    fn columns(&self) -> Vec<String>;

    /// Predict the label for exactly one row.
    fn predict(&self, row: &TabularRow) -> Result<Prediction, PredictError>;

    /// Report where the form schema and the pipeline's columns disagree.
    ///
    /// The default compares column names only.
    fn check_schema(&self, schema: &FieldSchema) -> Vec<SchemaMismatch> {
        let columns = self.columns();
        let mut mismatches: Vec<SchemaMismatch> = schema
            .names()
            .filter(|name| !columns.iter().any(|column| column.as_str() == *name))
            .map(|name| SchemaMismatch::NotInArtifact(name.to_string()))
            .collect();
        mismatches.extend(
            columns
                .into_iter()
                .filter(|column| schema.field(column).is_none())
                .map(SchemaMismatch::NotInSchema),
        );
        mismatches
    }
}

/// The artifact could not be turned into a pipeline. Fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Pipeline artifact not found at {path}")]
    Missing { path: PathBuf },
    #[error("Failed to read pipeline artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Pipeline artifact {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Pipeline artifact {path} rejected: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// The row does not fit what the pipeline was fit on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("Column {0:?} is required by the pipeline but missing from the input")]
    MissingColumn(String),
    #[error("Column {0:?} was not seen when the pipeline was fit")]
    UnexpectedColumn(String),
    #[error("Column {column:?} is empty and the pipeline has no fill value for it")]
    MissingValue { column: String },
    #[error("Column {column:?}: could not convert {value:?} to a number")]
    NotNumeric { column: String, value: String },
    #[error("Column {column:?}: found unknown category {value:?}")]
    UnknownCategory { column: String, value: String },
    #[error("Model failed: {0}")]
    Model(String),
}

/// Anything that stops a predict call from producing a label.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Predict(#[from] PredictError),
}
