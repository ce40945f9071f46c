use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::record::FrozenRecord;

use super::{FittedPipeline, InvokeError, LoadError, Pipeline, Prediction, TabularRow};

/// Artifact location, relative to the working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "assets/student_pipeline.json";

/// Source of the trained pipeline.
pub trait ArtifactLoader {
    fn load_artifact(&self) -> Result<Arc<dyn Pipeline>, LoadError>;
}

/// Reads a [`FittedPipeline`] from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonArtifactLoader {
    path: PathBuf,
}

impl JsonArtifactLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonArtifactLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACT_PATH)
    }
}

impl ArtifactLoader for JsonArtifactLoader {
    fn load_artifact(&self) -> Result<Arc<dyn Pipeline>, LoadError> {
        let bytes = std::fs::read(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::Missing {
                    path: self.path.clone(),
                }
            } else {
                LoadError::Read {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        let artifact = serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
            path: self.path.clone(),
            source,
        })?;
        let pipeline =
            FittedPipeline::from_artifact(artifact).map_err(|reason| LoadError::Invalid {
                path: self.path.clone(),
                reason,
            })?;
        info!(
            path = %self.path.display(),
            classes = ?pipeline.classes(),
            "Loaded prediction pipeline"
        );
        Ok(Arc::new(pipeline))
    }
}

/// Loads the pipeline on first use and reuses it for every later call.
///
/// The app creates one invoker per process, so the artifact is read once.
pub struct PipelineInvoker {
    loader: Box<dyn ArtifactLoader>,
    pipeline: OnceLock<Arc<dyn Pipeline>>,
}

impl PipelineInvoker {
    pub fn new(loader: impl ArtifactLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            pipeline: OnceLock::new(),
        }
    }

    /// Return the cached pipeline, invoking the loader only if nothing is cached.
    ///
    /// A failed load caches nothing.
    pub fn load(&self) -> Result<Arc<dyn Pipeline>, LoadError> {
        if let Some(pipeline) = self.pipeline.get() {
            return Ok(Arc::clone(pipeline));
        }
        let loaded = self.loader.load_artifact()?;
        Ok(Arc::clone(self.pipeline.get_or_init(|| loaded)))
    }

    pub fn is_loaded(&self) -> bool {
        self.pipeline.get().is_some()
    }

    /// Predict one frozen record.
    pub fn predict(&self, record: &FrozenRecord) -> Result<Prediction, InvokeError> {
        let pipeline = self.load()?;
        let row = TabularRow::from_record(record);
        debug!(columns = row.len(), "Invoking pipeline");
        Ok(pipeline.predict(&row)?)
    }
}

impl std::fmt::Debug for PipelineInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineInvoker")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::InputCollector;
    use crate::pipeline::PredictError;
    use crate::schema::FieldSchema;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct ConstantPipeline;

    impl Pipeline for ConstantPipeline {
        fn columns(&self) -> Vec<String> {
            Vec::new()
        }

        fn predict(&self, _row: &TabularRow) -> Result<Prediction, PredictError> {
            Ok(Prediction::label("Pass"))
        }
    }

    struct CountingLoader {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl ArtifactLoader for CountingLoader {
        fn load_artifact(&self) -> Result<Arc<dyn Pipeline>, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LoadError::Missing {
                    path: PathBuf::from("nowhere.json"),
                });
            }
            Ok(Arc::new(ConstantPipeline))
        }
    }

    #[test]
    fn loader_runs_once_across_many_predictions() {
        let calls = Arc::new(AtomicUsize::new(0));
        let invoker = PipelineInvoker::new(CountingLoader {
            calls: Arc::clone(&calls),
            fail: false,
        });
        let record = InputCollector::new(FieldSchema::student()).freeze();
        invoker.load().unwrap();
        for _ in 0..5 {
            assert_eq!(invoker.predict(&record).unwrap().label, "Pass");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(invoker.is_loaded());
    }

    #[test]
    fn failed_load_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let invoker = PipelineInvoker::new(CountingLoader {
            calls: Arc::clone(&calls),
            fail: true,
        });
        assert!(matches!(invoker.load(), Err(LoadError::Missing { .. })));
        assert!(!invoker.is_loaded());
    }

    #[test]
    fn json_loader_reports_missing_and_corrupt_files() {
        let dir = tempdir().unwrap();
        let missing = JsonArtifactLoader::new(dir.path().join("absent.json"));
        assert!(matches!(
            missing.load_artifact().err(),
            Some(LoadError::Missing { .. })
        ));

        let corrupt_path = dir.path().join("corrupt.json");
        std::fs::write(&corrupt_path, b"{ not json").unwrap();
        assert!(matches!(
            JsonArtifactLoader::new(&corrupt_path).load_artifact().err(),
            Some(LoadError::Parse { .. })
        ));

        let invalid_path = dir.path().join("invalid.json");
        std::fs::write(
            &invalid_path,
            br#"{"format_version":1,"columns":[],"classifier":{"kind":"logistic_regression","feature_len":0,"classes":["a","b"],"weights":[],"bias":[0,0]}}"#,
        )
        .unwrap();
        assert!(matches!(
            JsonArtifactLoader::new(&invalid_path).load_artifact().err(),
            Some(LoadError::Invalid { .. })
        ));
    }
}
