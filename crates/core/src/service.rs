//! Triage service.
//!
//! Ties the catalog, the session store and the condition predictor together. This is the
//! calling layer for the engine: it rejects empty submissions before scoring, and it computes
//! the local recommendation before awaiting the external prediction so a slow or failing
//! predictor can never hold back or suppress the advisory.

use crate::catalog::SymptomCatalog;
use crate::engine::{candidate_conditions, recommend, RecommendationResult};
use crate::patient::PatientDetails;
use crate::prediction::{ConditionPredictor, Prediction, PredictorError};
use crate::report::SessionReport;
use crate::selection::SelectedSymptom;
use crate::session::{SessionStore, TriageSession};
use crate::{TriageError, TriageResult};
use std::sync::Arc;
use std::time::Duration;
use triage_types::Severity;
use uuid::Uuid;

#[derive(Clone)]
pub struct TriageService {
    catalog: Arc<SymptomCatalog>,
    predictor: Arc<dyn ConditionPredictor>,
    sessions: SessionStore,
    predictor_timeout: Duration,
}

impl TriageService {
    pub fn new(
        catalog: Arc<SymptomCatalog>,
        predictor: Arc<dyn ConditionPredictor>,
        predictor_timeout: Duration,
    ) -> Self {
        Self {
            catalog,
            predictor,
            sessions: SessionStore::new(),
            predictor_timeout,
        }
    }

    pub fn catalog(&self) -> &SymptomCatalog {
        &self.catalog
    }

    /// Scores a symptom set without a session.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::NoSymptomsSelected` if `selections` is empty.
    pub fn recommend(&self, selections: &[SelectedSymptom]) -> TriageResult<RecommendationResult> {
        if selections.is_empty() {
            return Err(TriageError::NoSymptomsSelected);
        }
        Ok(recommend(&self.catalog, selections))
    }

    pub async fn start_session(&self, patient: PatientDetails) -> TriageSession {
        let session = self.sessions.create(patient).await;
        tracing::info!(session_id = %session.id, "triage session started");
        session
    }

    pub async fn session(&self, id: Uuid) -> TriageResult<TriageSession> {
        self.sessions.get(id).await
    }

    /// Selects or deselects a catalog symptom.
    ///
    /// Returns the symptom's severity if it is selected after the call, read under the same
    /// lock as the toggle, or `None` if it was deselected.
    ///
    /// # Errors
    ///
    /// Returns a `TriageError` if:
    /// - the session does not exist,
    /// - `name` is not in the catalog.
    pub async fn toggle_symptom(&self, id: Uuid, name: &str) -> TriageResult<Option<Severity>> {
        if !self.catalog.contains(name) {
            return Err(TriageError::UnknownSymptom(name.to_string()));
        }
        self.sessions
            .update(id, |session| {
                session.selection.toggle(name);
                Ok(session.selection.severity_of(name))
            })
            .await
    }

    pub async fn set_severity(&self, id: Uuid, name: &str, severity: Severity) -> TriageResult<()> {
        self.sessions
            .update(id, |session| session.selection.set_severity(name, severity))
            .await
    }

    /// Scores the session's selection, asks the predictor for conditions and stores the
    /// resulting report on the session.
    ///
    /// # Errors
    ///
    /// Returns a `TriageError` if:
    /// - the session does not exist (or ended while the prediction was in flight),
    /// - no symptoms are selected.
    ///
    /// Predictor failures are not errors here; they are recorded on the report.
    pub async fn submit(&self, id: Uuid) -> TriageResult<SessionReport> {
        let session = self.sessions.get(id).await?;
        let symptoms = session.selection.selections();
        if symptoms.is_empty() {
            return Err(TriageError::NoSymptomsSelected);
        }

        let recommendation = recommend(&self.catalog, &symptoms);
        let candidates = candidate_conditions(&self.catalog, &symptoms);
        tracing::debug!(
            session_id = %id,
            score = recommendation.score,
            tier = %recommendation.tier,
            "local recommendation computed"
        );

        let prediction = self.predict(&symptoms).await;
        if let Err(e) = &prediction {
            tracing::warn!(session_id = %id, error = %e, "condition prediction failed");
        }

        let report = SessionReport::assemble(
            &session.patient,
            symptoms,
            recommendation,
            candidates,
            prediction,
        );

        let stored = report.clone();
        self.sessions
            .update(id, move |session| {
                session.report = Some(stored);
                Ok(())
            })
            .await?;

        tracing::info!(session_id = %id, score = report.score, "triage report generated");
        Ok(report)
    }

    /// The most recently generated report for a session.
    pub async fn report(&self, id: Uuid) -> TriageResult<SessionReport> {
        self.sessions
            .get(id)
            .await?
            .report
            .ok_or(TriageError::ReportNotGenerated(id))
    }

    pub async fn end_session(&self, id: Uuid) -> TriageResult<()> {
        self.sessions.remove(id).await?;
        tracing::info!(session_id = %id, "triage session ended");
        Ok(())
    }

    async fn predict(&self, symptoms: &[SelectedSymptom]) -> Result<Prediction, PredictorError> {
        match tokio::time::timeout(self.predictor_timeout, self.predictor.predict(symptoms)).await
        {
            Ok(result) => result,
            Err(_) => Err(PredictorError::Timeout(self.predictor_timeout)),
        }
    }
}
