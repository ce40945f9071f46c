//! JSON pipeline artifact: per-column preprocessing followed by a classifier.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ml::gbdt_stump::{GbdtStumpModel, argmax};
use crate::ml::logreg::LogRegModel;
use crate::schema::{FieldKind, FieldSchema};

use super::{Pipeline, PredictError, Prediction, TabularRow};

/// Artifact layout version understood by this build.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Serialized pipeline as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub format_version: u32,
    /// Input columns in encoding order.
    pub columns: Vec<ColumnSpec>,
    pub classifier: Classifier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub transform: ColumnTransform,
}

/// How one input cell becomes feature values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnTransform {
    /// Parse as a number and standardize to `(x - mean) / scale`.
    Numeric {
        mean: f32,
        scale: f32,
        /// Raw value substituted for empty cells.
        #[serde(default)]
        impute: Option<f32>,
    },
    /// One slot per category, set to 1.0 for the matching category.
    OneHot {
        categories: Vec<String>,
        #[serde(default)]
        handle_unknown: UnknownCategoryPolicy,
    },
}

/// Behaviour for a category that was not seen during fitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    #[default]
    Error,
    /// Encode as all zeros.
    Ignore,
}

impl ColumnTransform {
    fn width(&self) -> usize {
        match self {
            ColumnTransform::Numeric { .. } => 1,
            ColumnTransform::OneHot { categories, .. } => categories.len(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            ColumnTransform::Numeric {
                mean,
                scale,
                impute,
            } => {
                if !mean.is_finite() {
                    return Err("mean must be finite".to_string());
                }
                if !scale.is_finite() || *scale <= 0.0 {
                    return Err("scale must be > 0".to_string());
                }
                if impute.is_some_and(|value| !value.is_finite()) {
                    return Err("impute must be finite".to_string());
                }
            }
            ColumnTransform::OneHot { categories, .. } => {
                if categories.is_empty() {
                    return Err("no categories".to_string());
                }
                let unique: HashSet<_> = categories.iter().collect();
                if unique.len() != categories.len() {
                    return Err("duplicate categories".to_string());
                }
            }
        }
        Ok(())
    }

    fn encode(&self, column: &str, raw: &str, out: &mut Vec<f32>) -> Result<(), PredictError> {
        match self {
            ColumnTransform::Numeric {
                mean,
                scale,
                impute,
            } => {
                let trimmed = raw.trim();
                let value = if trimmed.is_empty() {
                    impute.ok_or_else(|| PredictError::MissingValue {
                        column: column.to_string(),
                    })?
                } else {
                    trimmed
                        .parse::<f32>()
                        .ok()
                        .filter(|value| value.is_finite())
                        .ok_or_else(|| PredictError::NotNumeric {
                            column: column.to_string(),
                            value: raw.to_string(),
                        })?
                };
                out.push((value - mean) / scale);
            }
            ColumnTransform::OneHot {
                categories,
                handle_unknown,
            } => {
                let hit = categories.iter().position(|category| category == raw);
                if hit.is_none() && *handle_unknown == UnknownCategoryPolicy::Error {
                    return Err(PredictError::UnknownCategory {
                        column: column.to_string(),
                        value: raw.to_string(),
                    });
                }
                out.extend((0..categories.len()).map(|idx| {
                    if Some(idx) == hit { 1.0 } else { 0.0 }
                }));
            }
        }
        Ok(())
    }
}

/// Final estimator of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    GbdtStump(GbdtStumpModel),
    LogisticRegression(LogRegModel),
}

impl Classifier {
    fn feature_len(&self) -> usize {
        match self {
            Classifier::GbdtStump(model) => model.feature_len,
            Classifier::LogisticRegression(model) => model.feature_len,
        }
    }

    fn classes(&self) -> &[String] {
        match self {
            Classifier::GbdtStump(model) => &model.classes,
            Classifier::LogisticRegression(model) => &model.classes,
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Classifier::GbdtStump(model) => model.validate(),
            Classifier::LogisticRegression(model) => model.validate(),
        }
    }

    fn predict_proba(&self, features: &[f32]) -> Vec<f32> {
        match self {
            Classifier::GbdtStump(model) => model.predict_proba(features),
            Classifier::LogisticRegression(model) => model.predict_proba(features),
        }
    }
}

/// Disagreement between the form schema and an artifact's columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatch {
    #[error("form field {0:?} has no pipeline column")]
    NotInArtifact(String),
    #[error("pipeline column {0:?} has no form field")]
    NotInSchema(String),
    #[error("column {column:?} should be {expected}")]
    KindMismatch {
        column: String,
        expected: &'static str,
    },
    #[error("choice {choice:?} of {column:?} is not a known category")]
    UnknownChoice { column: String, choice: String },
}

/// A validated artifact, ready to predict.
#[derive(Debug, Clone)]
pub struct FittedPipeline {
    artifact: PipelineArtifact,
}

impl FittedPipeline {
    /// Validate an artifact's structure and encoded width.
    pub fn from_artifact(artifact: PipelineArtifact) -> Result<Self, String> {
        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(format!(
                "Unsupported format_version {} (expected {ARTIFACT_FORMAT_VERSION})",
                artifact.format_version
            ));
        }
        if artifact.columns.is_empty() {
            return Err("Artifact declares no columns".to_string());
        }
        let mut seen = HashSet::new();
        for column in &artifact.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(format!("Duplicate column {:?}", column.name));
            }
            column
                .transform
                .validate()
                .map_err(|reason| format!("Column {:?}: {reason}", column.name))?;
        }
        artifact.classifier.validate()?;
        let width: usize = artifact.columns.iter().map(|c| c.transform.width()).sum();
        if width != artifact.classifier.feature_len() {
            return Err(format!(
                "Columns encode {width} features but the classifier expects {}",
                artifact.classifier.feature_len()
            ));
        }
        Ok(Self { artifact })
    }

    /// Parse and validate artifact JSON.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let artifact: PipelineArtifact = serde_json::from_slice(bytes)?;
        Self::from_artifact(artifact).map_err(serde::de::Error::custom)
    }

    pub fn artifact(&self) -> &PipelineArtifact {
        &self.artifact
    }

    pub fn classes(&self) -> &[String] {
        self.artifact.classifier.classes()
    }

    /// Encode a row into the classifier's feature vector.
    pub fn encode(&self, row: &TabularRow) -> Result<Vec<f32>, PredictError> {
        if let Some(extra) = row
            .columns()
            .find(|name| !self.artifact.columns.iter().any(|c| c.name == *name))
        {
            return Err(PredictError::UnexpectedColumn(extra.to_string()));
        }
        let mut features = Vec::with_capacity(self.artifact.classifier.feature_len());
        for column in &self.artifact.columns {
            let raw = row
                .get(&column.name)
                .ok_or_else(|| PredictError::MissingColumn(column.name.clone()))?;
            column.transform.encode(&column.name, raw, &mut features)?;
        }
        Ok(features)
    }

    /// Compare artifact columns with the form schema.
    pub fn schema_mismatches(&self, schema: &FieldSchema) -> Vec<SchemaMismatch> {
        let mut mismatches = Vec::new();
        for field in schema.fields() {
            let Some(column) = self.artifact.columns.iter().find(|c| c.name == field.name) else {
                mismatches.push(SchemaMismatch::NotInArtifact(field.name.to_string()));
                continue;
            };
            match (&field.kind, &column.transform) {
                (FieldKind::Text, _) => {}
                (FieldKind::IntegerRange { .. }, ColumnTransform::Numeric { .. }) => {}
                (FieldKind::IntegerRange { .. }, _) => {
                    mismatches.push(SchemaMismatch::KindMismatch {
                        column: field.name.to_string(),
                        expected: "numeric",
                    });
                }
                (
                    FieldKind::Choice(choices),
                    ColumnTransform::OneHot {
                        categories,
                        handle_unknown,
                    },
                ) => {
                    if *handle_unknown == UnknownCategoryPolicy::Error {
                        mismatches.extend(
                            choices
                                .iter()
                                .filter(|choice| !categories.iter().any(|c| c.as_str() == **choice))
                                .map(|choice| SchemaMismatch::UnknownChoice {
                                    column: field.name.to_string(),
                                    choice: choice.to_string(),
                                }),
                        );
                    }
                }
                (FieldKind::Choice(_), _) => {
                    mismatches.push(SchemaMismatch::KindMismatch {
                        column: field.name.to_string(),
                        expected: "one-hot encoded",
                    });
                }
            }
        }
        mismatches.extend(
            self.artifact
                .columns
                .iter()
                .filter(|column| schema.field(&column.name).is_none())
                .map(|column| SchemaMismatch::NotInSchema(column.name.clone())),
        );
        mismatches
    }
}

impl Pipeline for FittedPipeline {
    fn columns(&self) -> Vec<String> {
        self.artifact.columns.iter().map(|c| c.name.clone()).collect()
    }

    fn predict(&self, row: &TabularRow) -> Result<Prediction, PredictError> {
        let features = self.encode(row)?;
        let proba = self.artifact.classifier.predict_proba(&features);
        if proba.is_empty() {
            return Err(PredictError::Model(
                "classifier produced no probabilities".to_string(),
            ));
        }
        let best = argmax(&proba);
        let label = self
            .classes()
            .get(best)
            .cloned()
            .ok_or_else(|| PredictError::Model(format!("class index {best} out of range")))?;
        Ok(Prediction {
            label,
            confidence: proba.get(best).copied(),
        })
    }

    fn check_schema(&self, schema: &FieldSchema) -> Vec<SchemaMismatch> {
        self.schema_mismatches(schema)
    }
}
