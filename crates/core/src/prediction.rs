//! Condition prediction contract.
//!
//! Candidate conditions come from an external inference service. This module holds the shape
//! of its answer and the [`ConditionPredictor`] seam; the HTTP implementation lives in the
//! `condition-predictor` crate. Predicted conditions are only displayed, never scored.

use crate::constants::DEFAULT_PREDICTION_SUMMARY;
use crate::selection::SelectedSymptom;
use serde::{Deserialize, Serialize};

/// Qualitative likelihood attached to a predicted condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbabilityLabel {
    Low,
    Medium,
    High,
}

impl ProbabilityLabel {
    /// Wire spelling, as sent by the prediction service.
    pub fn as_str(self) -> &'static str {
        match self {
            ProbabilityLabel::Low => "Low",
            ProbabilityLabel::Medium => "Medium",
            ProbabilityLabel::High => "High",
        }
    }
}

impl std::fmt::Display for ProbabilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A condition suggested by the external predictor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    #[serde(rename = "probability")]
    pub probability_label: ProbabilityLabel,
    #[serde(default)]
    pub description: String,
}

/// A successful predictor response. Conditions keep the order the service sent them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default = "default_summary")]
    pub summary: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

fn default_summary() -> String {
    DEFAULT_PREDICTION_SUMMARY.to_string()
}

impl Prediction {
    /// A prediction with the default summary and no conditions.
    pub fn empty() -> Self {
        Self {
            summary: default_summary(),
            conditions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Ways a prediction request can fail. An empty condition list is a success, not an error.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    #[error("prediction request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("failed to reach prediction service: {0}")]
    Transport(String),
    #[error("prediction service returned HTTP status {0}")]
    Status(u16),
    #[error("failed to decode prediction response: {0}")]
    Decode(String),
}

pub type PredictorResult<T> = std::result::Result<T, PredictorError>;

/// Source of condition predictions for a set of selected symptoms.
#[async_trait::async_trait]
pub trait ConditionPredictor: Send + Sync {
    async fn predict(&self, symptoms: &[SelectedSymptom]) -> PredictorResult<Prediction>;
}
