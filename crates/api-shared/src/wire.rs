//! JSON request and response bodies for the REST API.
//!
//! Severities arrive as plain integers and are range-checked by the handlers, so a bad value
//! produces a readable 400 instead of a body-decoding failure.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned with every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SymptomRes {
    pub name: String,
    pub weight: f64,
    pub associated_conditions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListSymptomsRes {
    pub symptoms: Vec<SymptomRes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SelectedSymptomMsg {
    pub name: String,
    pub severity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecommendReq {
    pub symptoms: Vec<SelectedSymptomMsg>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecommendRes {
    pub advisory_text: String,
    pub needs_imaging: bool,
    pub score: u8,
    /// One of `strong`, `consider`, `unnecessary`.
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateSessionReq {
    pub patient_name: String,
    /// Free-text age as entered on the intake form.
    pub age: String,
    pub gender: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionRes {
    pub id: String,
    pub patient_name: String,
    pub age: u8,
    pub gender: String,
    pub symptoms: Vec<SelectedSymptomMsg>,
    pub has_report: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ToggleSymptomRes {
    pub name: String,
    pub selected: bool,
    /// Current severity when selected.
    pub severity: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SetSeverityReq {
    pub severity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SetSeverityRes {
    pub name: String,
    pub severity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConditionMsg {
    pub name: String,
    /// One of `Low`, `Medium`, `High`.
    pub probability: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CandidateConditionMsg {
    pub name: String,
    pub weight: f64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportRes {
    pub patient_name: String,
    pub age: u8,
    pub gender: String,
    pub symptoms: Vec<SelectedSymptomMsg>,
    pub summary: String,
    pub conditions: Vec<ConditionMsg>,
    /// First three predicted conditions.
    pub differential: Vec<ConditionMsg>,
    pub conditions_message: String,
    pub advisory_text: String,
    pub needs_imaging: bool,
    pub tier: String,
    pub score: u8,
    pub candidates: Vec<CandidateConditionMsg>,
    pub prediction_failed: bool,
    pub generated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_req_reads_plain_json() {
        let req: RecommendReq = serde_json::from_str(
            r#"{"symptoms":[{"name":"Loose teeth","severity":10}]}"#,
        )
        .expect("valid json");
        assert_eq!(req.symptoms[0].severity, 10);
    }
}
