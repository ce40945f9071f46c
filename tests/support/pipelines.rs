use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use prognos::pipeline::{
    ArtifactLoader, JsonArtifactLoader, LoadError, Pipeline, PredictError, Prediction, TabularRow,
};
use prognos::schema::FieldSchema;

/// Path of the artifact shipped with the crate.
pub fn bundled_artifact_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/student_pipeline.json")
}

pub fn bundled_loader() -> JsonArtifactLoader {
    JsonArtifactLoader::new(bundled_artifact_path())
}

/// Pipeline double that remembers every row and echoes a fixed label.
pub struct EchoPipeline {
    pub label: String,
    pub rows: Mutex<Vec<TabularRow>>,
}

impl EchoPipeline {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn rows(&self) -> Vec<TabularRow> {
        self.rows.lock().unwrap().clone()
    }
}

impl Pipeline for EchoPipeline {
    fn columns(&self) -> Vec<String> {
        FieldSchema::student().names().map(str::to_string).collect()
    }

    fn predict(&self, row: &TabularRow) -> Result<Prediction, PredictError> {
        self.rows.lock().unwrap().push(row.clone());
        Ok(Prediction::label(self.label.clone()))
    }
}

/// Loader that counts how often the artifact is actually read.
pub struct CountingLoader {
    pub pipeline: Arc<EchoPipeline>,
    pub loads: Arc<AtomicUsize>,
}

impl CountingLoader {
    pub fn new(pipeline: Arc<EchoPipeline>) -> (Self, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        let loader = Self {
            pipeline,
            loads: Arc::clone(&loads),
        };
        (loader, loads)
    }
}

impl ArtifactLoader for CountingLoader {
    fn load_artifact(&self) -> Result<Arc<dyn Pipeline>, LoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let pipeline: Arc<dyn Pipeline> = self.pipeline.clone();
        Ok(pipeline)
    }
}

/// Pipeline double whose every prediction fails with the same error.
pub struct FailingPipeline(pub PredictError);

impl Pipeline for FailingPipeline {
    fn columns(&self) -> Vec<String> {
        FieldSchema::student().names().map(str::to_string).collect()
    }

    fn predict(&self, _row: &TabularRow) -> Result<Prediction, PredictError> {
        Err(self.0.clone())
    }
}

/// Loader that hands out a prebuilt pipeline.
pub struct StaticLoader(pub Arc<dyn Pipeline>);

impl ArtifactLoader for StaticLoader {
    fn load_artifact(&self) -> Result<Arc<dyn Pipeline>, LoadError> {
        Ok(Arc::clone(&self.0))
    }
}

/// Loader that always fails, as if the artifact were missing.
pub struct MissingLoader;

impl ArtifactLoader for MissingLoader {
    fn load_artifact(&self) -> Result<Arc<dyn Pipeline>, LoadError> {
        Err(LoadError::Missing {
            path: PathBuf::from("assets/absent_pipeline.json"),
        })
    }
}
