//! In-memory triage sessions.
//!
//! Sessions live for the lifetime of the process only and are never written to disk. Each
//! session owns its symptom selection exclusively; the store lock is held only for the
//! duration of a read or a closure-based update, never across an await point.

use crate::patient::PatientDetails;
use crate::report::SessionReport;
use crate::selection::SymptomSelection;
use crate::{TriageError, TriageResult};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TriageSession {
    pub id: Uuid,
    pub patient: PatientDetails,
    pub selection: SymptomSelection,
    pub report: Option<SessionReport>,
    pub created_at: DateTime<Utc>,
}

impl TriageSession {
    pub fn new(patient: PatientDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient,
            selection: SymptomSelection::new(),
            report: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, TriageSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session for the given patient and returns its snapshot.
    pub async fn create(&self, patient: PatientDetails) -> TriageSession {
        let session = TriageSession::new(patient);
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Returns a snapshot of the session.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::SessionNotFound` if no session has this id.
    pub async fn get(&self, id: Uuid) -> TriageResult<TriageSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(TriageError::SessionNotFound(id))
    }

    /// Applies `f` to the session under the write lock and returns its result.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> TriageResult<T>
    where
        F: FnOnce(&mut TriageSession) -> TriageResult<T>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(TriageError::SessionNotFound(id))?;
        f(session)
    }

    /// Ends a session, discarding its selection and report.
    pub async fn remove(&self, id: Uuid) -> TriageResult<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(TriageError::SessionNotFound(id))
    }
}
