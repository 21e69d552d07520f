//! Session report assembly.
//!
//! A report merges the patient's identity, the submitted symptoms, the local OPG
//! recommendation and whatever the external predictor returned. A failed prediction does not
//! stop a report being produced; it is recorded alongside the local advisory instead.

use crate::constants::{DIFFERENTIAL_LIMIT, NO_CONDITIONS_MESSAGE, PREDICTION_FAILED_MESSAGE};
use crate::engine::{CandidateCondition, OpgTier, RecommendationResult};
use crate::patient::PatientDetails;
use crate::prediction::{Condition, Prediction, PredictorError};
use crate::selection::SelectedSymptom;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the external prediction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionStatus {
    Completed,
    Failed { message: String },
}

impl PredictionStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, PredictionStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub patient_name: String,
    pub age: u8,
    pub gender: String,
    pub symptoms: Vec<SelectedSymptom>,
    pub conditions: Vec<Condition>,
    pub summary: String,
    pub advisory_text: String,
    pub needs_imaging: bool,
    pub tier: OpgTier,
    pub score: u8,
    /// Local shortlist from the catalog's associated conditions.
    pub candidates: Vec<CandidateCondition>,
    pub prediction_status: PredictionStatus,
    pub generated_at: DateTime<Utc>,
}

impl SessionReport {
    /// Merges the session inputs with the recommendation and the prediction outcome.
    pub fn assemble(
        patient: &PatientDetails,
        symptoms: Vec<SelectedSymptom>,
        recommendation: RecommendationResult,
        candidates: Vec<CandidateCondition>,
        prediction: Result<Prediction, PredictorError>,
    ) -> Self {
        let (prediction, prediction_status) = match prediction {
            Ok(prediction) => (prediction, PredictionStatus::Completed),
            Err(_) => (
                Prediction::empty(),
                PredictionStatus::Failed {
                    message: PREDICTION_FAILED_MESSAGE.to_string(),
                },
            ),
        };

        Self {
            patient_name: patient.name.to_string(),
            age: patient.age,
            gender: patient.gender.to_string(),
            symptoms,
            conditions: prediction.conditions,
            summary: prediction.summary,
            advisory_text: recommendation.advisory_text,
            needs_imaging: recommendation.needs_imaging,
            tier: recommendation.tier,
            score: recommendation.score,
            candidates,
            prediction_status,
            generated_at: Utc::now(),
        }
    }

    /// At most the first three predicted conditions.
    pub fn differential(&self) -> &[Condition] {
        let n = self.conditions.len().min(DIFFERENTIAL_LIMIT);
        &self.conditions[..n]
    }

    /// Line shown above the condition list.
    pub fn conditions_message(&self) -> String {
        match &self.prediction_status {
            PredictionStatus::Failed { message } => message.clone(),
            PredictionStatus::Completed if self.conditions.is_empty() => {
                NO_CONDITIONS_MESSAGE.to_string()
            }
            PredictionStatus::Completed => {
                format!("Detected Conditions ({})", self.conditions.len())
            }
        }
    }
}
