//! Multinomial logistic regression over an encoded feature vector.

use serde::{Deserialize, Serialize};

use crate::ml::gbdt_stump::{argmax, softmax};

/// Linear classifier with temperature-scaled softmax output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRegModel {
    pub feature_len: usize,
    pub classes: Vec<String>,
    /// Row-major `[n_classes][feature_len]`.
    pub weights: Vec<f32>,
    pub bias: Vec<f32>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    1.0
}

impl LogRegModel {
    pub fn validate(&self) -> Result<(), String> {
        let classes = self.classes.len();
        if classes < 2 {
            return Err("Model must contain at least 2 classes".to_string());
        }
        if self.weights.len() != classes * self.feature_len {
            return Err(format!(
                "weights length {} does not match {classes} classes x {} features",
                self.weights.len(),
                self.feature_len
            ));
        }
        if self.bias.len() != classes {
            return Err("bias length mismatch".to_string());
        }
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err("temperature must be > 0".to_string());
        }
        Ok(())
    }

    fn logits(&self, features: &[f32]) -> Vec<f32> {
        let temp = self.temperature.max(1e-6);
        self.bias
            .iter()
            .enumerate()
            .map(|(class_idx, bias)| {
                let row = &self.weights[class_idx * self.feature_len..][..self.feature_len];
                let dot: f32 = row.iter().zip(features).map(|(w, x)| w * x).sum();
                (bias + dot) / temp
            })
            .collect()
    }

    /// Class probabilities, or an empty vector when the width is wrong.
    pub fn predict_proba(&self, features: &[f32]) -> Vec<f32> {
        if features.len() != self.feature_len {
            return Vec::new();
        }
        softmax(&self.logits(features))
    }

    pub fn predict_class_index(&self, features: &[f32]) -> usize {
        argmax(&self.predict_proba(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LogRegModel {
        LogRegModel {
            feature_len: 2,
            classes: vec!["low".into(), "high".into()],
            weights: vec![-1.0, 0.0, 1.0, 0.0],
            bias: vec![0.0, 0.0],
            temperature: 1.0,
        }
    }

    #[test]
    fn probabilities_follow_weights() {
        let model = model();
        model.validate().unwrap();
        assert_eq!(model.predict_class_index(&[2.0, 0.0]), 1);
        assert_eq!(model.predict_class_index(&[-2.0, 0.0]), 0);
        let probs = model.predict_proba(&[0.5, 3.0]);
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn wrong_width_yields_no_probabilities() {
        assert!(model().predict_proba(&[1.0]).is_empty());
    }

    #[test]
    fn validate_catches_weight_shape() {
        let mut model = model();
        model.weights.pop();
        assert!(model.validate().is_err());
    }
}
