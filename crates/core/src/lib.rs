//! # Triage Core
//!
//! Core business logic for the dental symptom-triage service.
//!
//! This crate contains pure data operations:
//! - The symptom catalog and per-session symptom selection
//! - The OPG recommendation engine and the candidate-condition shortlist
//! - Patient intake validation and session report assembly
//! - An in-memory, process-lifetime session store
//!
//! **No API concerns**: HTTP servers, the outbound predictor client and authentication belong
//! in `api-rest`, `condition-predictor` and `api-shared`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod patient;
pub mod prediction;
pub mod report;
pub mod selection;
pub mod service;
pub mod session;
pub mod validation;

pub use catalog::{Symptom, SymptomCatalog};
pub use config::TriageConfig;
pub use engine::{candidate_conditions, recommend, CandidateCondition, OpgTier, RecommendationResult};
pub use error::{TriageError, TriageResult};
pub use patient::PatientDetails;
pub use prediction::{
    Condition, ConditionPredictor, Prediction, PredictorError, PredictorResult, ProbabilityLabel,
};
pub use report::{PredictionStatus, SessionReport};
pub use selection::{SelectedSymptom, SymptomSelection};
pub use service::TriageService;
pub use session::{SessionStore, TriageSession};

pub use triage_types::{NonEmptyText, Severity, TypesError};
