//! Classifiers that can sit at the end of a prediction pipeline.
//!
//! Both models are plain data loaded from JSON and evaluated in Rust; neither
//! is trained here.

pub mod gbdt_stump;
pub mod logreg;
