//! Constants used throughout the triage core crate.
//!
//! Scoring thresholds, defaults and user-facing messages live here so the engine, the report
//! assembler and the API layers agree on them.

/// Average score at or above which an OPG is strongly recommended.
pub const STRONG_THRESHOLD: f64 = 70.0;

/// Average score at or above which an OPG should be considered.
pub const CONSIDER_THRESHOLD: f64 = 40.0;

/// Severity at which a symptom contributes exactly its catalog weight.
pub const NEUTRAL_SEVERITY: f64 = 5.0;

/// Scale factor applied to each weighted contribution.
pub const CONTRIBUTION_SCALE: f64 = 20.0;

/// Upper bound of the reported score.
pub const MAX_SCORE: u8 = 100;

/// Number of conditions shown in a differential diagnosis excerpt.
pub const DIFFERENTIAL_LIMIT: usize = 3;

/// Default REST bind address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default base URL of the external condition prediction service.
pub const DEFAULT_PREDICTOR_URL: &str = "http://localhost:5000";

/// Path of the prediction endpoint on the external service.
pub const PREDICT_CONDITIONS_PATH: &str = "/predict_conditions";

/// Default predictor timeout in seconds.
pub const DEFAULT_PREDICTOR_TIMEOUT_SECS: u64 = 10;

/// Largest accepted predictor timeout in seconds.
pub const MAX_PREDICTOR_TIMEOUT_SECS: u64 = 120;

/// Summary shown when the predictor does not supply one.
pub const DEFAULT_PREDICTION_SUMMARY: &str =
    "Based on your symptoms, a clinical examination is recommended";

/// Message shown when the predictor returned no conditions.
pub const NO_CONDITIONS_MESSAGE: &str = "No specific conditions identified";

/// Message shown when the prediction request failed.
pub const PREDICTION_FAILED_MESSAGE: &str = "Failed to analyze symptoms. Please try again.";

/// Message shown when patient intake is incomplete.
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required!";
