//! # Condition Predictor
//!
//! HTTP client for the external condition prediction service.
//!
//! The service accepts the submitted symptoms and answers with a summary and a ranked list of
//! candidate conditions:
//!
//! ```text
//! POST {base_url}/predict_conditions
//! {"symptoms": [{"name": "Loose teeth", "severity": 8}]}
//!
//! 200 OK
//! {"summary": "...", "conditions": [{"name": "...", "probability": "High", "description": "..."}]}
//! ```
//!
//! Transport failures, non-2xx statuses, timeouts and undecodable bodies are reported as
//! distinct [`PredictorError`] variants so callers can tell them apart from an empty result.

#![warn(rust_2018_idioms)]

use serde::Serialize;
use std::time::Duration;
use triage_core::constants::PREDICT_CONDITIONS_PATH;
use triage_core::{ConditionPredictor, Prediction, PredictorError, PredictorResult, SelectedSymptom};

#[derive(Serialize)]
struct PredictRequest<'a> {
    symptoms: &'a [SelectedSymptom],
}

/// [`ConditionPredictor`] backed by the remote prediction service.
#[derive(Clone, Debug)]
pub struct HttpConditionPredictor {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpConditionPredictor {
    /// Create a client for the service at `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `PredictorError::Transport` if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> PredictorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictorError::Transport(e.to_string()))?;

        Ok(Self {
            endpoint: format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                PREDICT_CONDITIONS_PATH
            ),
            client,
            timeout,
        })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_error(&self, e: reqwest::Error) -> PredictorError {
        if e.is_timeout() {
            PredictorError::Timeout(self.timeout)
        } else if e.is_decode() {
            PredictorError::Decode(e.to_string())
        } else {
            PredictorError::Transport(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl ConditionPredictor for HttpConditionPredictor {
    async fn predict(&self, symptoms: &[SelectedSymptom]) -> PredictorResult<Prediction> {
        tracing::debug!(endpoint = %self.endpoint, symptoms = symptoms.len(), "requesting condition prediction");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { symptoms })
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictorError::Status(status.as_u16()));
        }

        let prediction: Prediction = response.json().await.map_err(|e| self.map_error(e))?;
        tracing::debug!(
            conditions = prediction.conditions.len(),
            "condition prediction received"
        );
        Ok(prediction)
    }
}
