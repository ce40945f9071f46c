//! Deterministic gradient-boosted decision-stump classifier.
//!
//! Multi-class prediction uses one stump per class per boosting round, with
//! the summed raw scores turned into probabilities by softmax.

mod model;

pub use model::{GbdtStumpModel, Stump, argmax, softmax};
