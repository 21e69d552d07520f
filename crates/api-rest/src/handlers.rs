//! REST endpoint handlers.
//!
//! Handlers translate between the JSON wire types in `api-shared` and the domain types in
//! `triage-core`. They hold no state of their own; everything goes through
//! [`TriageService`](triage_core::TriageService).

use crate::error::ApiError;
use crate::AppState;
use api_shared::{
    CandidateConditionMsg, ConditionMsg, CreateSessionReq, ErrorRes, HealthRes, HealthService,
    ListSymptomsRes, RecommendReq, RecommendRes, ReportRes, SelectedSymptomMsg, SessionRes,
    SetSeverityReq, SetSeverityRes, SymptomRes, ToggleSymptomRes,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use triage_core::{Condition, PatientDetails, SelectedSymptom, SessionReport, Severity, TriageSession};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks. Never requires an API key.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/symptoms",
    responses(
        (status = 200, description = "Symptom catalog in display order", body = ListSymptomsRes)
    )
)]
/// List the symptom catalog in its stable display order.
pub async fn list_symptoms(State(state): State<AppState>) -> Json<ListSymptomsRes> {
    let symptoms = state
        .service
        .catalog()
        .iter()
        .map(|s| SymptomRes {
            name: s.name.clone(),
            weight: s.weight,
            associated_conditions: s.associated_conditions.clone(),
        })
        .collect();
    Json(ListSymptomsRes { symptoms })
}

#[utoipa::path(
    post,
    path = "/recommend",
    request_body = RecommendReq,
    responses(
        (status = 200, description = "OPG recommendation", body = RecommendRes),
        (status = 400, description = "No symptoms or severity out of range", body = ErrorRes)
    )
)]
/// Score a symptom set without starting a session
///
/// Names absent from the catalog are accepted; they contribute nothing but still count
/// towards the average.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not valid JSON for [`RecommendReq`],
/// - the symptom list is empty,
/// - a severity is outside 1-10.
pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendReq>, JsonRejection>,
) -> Result<Json<RecommendRes>, ApiError> {
    let Json(req) = payload?;
    let selections = req
        .symptoms
        .into_iter()
        .map(|s| Severity::new(s.severity).map(|severity| SelectedSymptom::new(s.name, severity)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let result = state.service.recommend(&selections)?;
    Ok(Json(RecommendRes {
        advisory_text: result.advisory_text,
        needs_imaging: result.needs_imaging,
        score: result.score,
        tier: result.tier.to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/sessions",
    request_body = CreateSessionReq,
    responses(
        (status = 201, description = "Session started", body = SessionRes),
        (status = 400, description = "Incomplete or invalid patient details", body = ErrorRes)
    )
)]
/// Start a triage session from the patient intake form
///
/// # Errors
/// Returns `400 Bad Request` if any intake field is missing or invalid.
pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionReq>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionRes>), ApiError> {
    let Json(req) = payload?;
    let patient = PatientDetails::new(&req.patient_name, &req.age, &req.gender, &req.phone_number)?;
    let session = state.service.start_session(patient).await;
    Ok((StatusCode::CREATED, Json(session_res(&session))))
}

#[utoipa::path(
    get,
    path = "/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session state", body = SessionRes),
        (status = 400, description = "Malformed session id", body = ErrorRes),
        (status = 404, description = "Unknown session", body = ErrorRes)
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionRes>, ApiError> {
    let session = state.service.session(parse_session_id(&id)?).await?;
    Ok(Json(session_res(&session)))
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session ended"),
        (status = 404, description = "Unknown session", body = ErrorRes)
    )
)]
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.end_session(parse_session_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/symptoms/{name}/toggle",
    params(
        ("id" = String, Path, description = "Session id"),
        ("name" = String, Path, description = "Catalog symptom name")
    ),
    responses(
        (status = 200, description = "Selection toggled", body = ToggleSymptomRes),
        (status = 404, description = "Unknown session or symptom", body = ErrorRes)
    )
)]
/// Select or deselect a symptom
///
/// A newly selected symptom starts at severity 5 unless it was adjusted earlier in the session.
pub async fn toggle_symptom(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<ToggleSymptomRes>, ApiError> {
    let id = parse_session_id(&id)?;
    let severity = state.service.toggle_symptom(id, &name).await?;

    Ok(Json(ToggleSymptomRes {
        name,
        selected: severity.is_some(),
        severity: severity.map(u8::from),
    }))
}

#[utoipa::path(
    put,
    path = "/sessions/{id}/symptoms/{name}",
    request_body = SetSeverityReq,
    params(
        ("id" = String, Path, description = "Session id"),
        ("name" = String, Path, description = "Selected symptom name")
    ),
    responses(
        (status = 200, description = "Severity updated", body = SetSeverityRes),
        (status = 400, description = "Severity out of range or symptom not selected", body = ErrorRes),
        (status = 404, description = "Unknown session", body = ErrorRes)
    )
)]
pub async fn set_severity(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
    payload: Result<Json<SetSeverityReq>, JsonRejection>,
) -> Result<Json<SetSeverityRes>, ApiError> {
    let Json(req) = payload?;
    let id = parse_session_id(&id)?;
    let severity = Severity::new(req.severity).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    state.service.set_severity(id, &name, severity).await?;

    Ok(Json(SetSeverityRes {
        name,
        severity: severity.value(),
    }))
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/submit",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Report generated", body = ReportRes),
        (status = 400, description = "No symptoms selected", body = ErrorRes),
        (status = 404, description = "Unknown session", body = ErrorRes)
    )
)]
/// Submit the selected symptoms for assessment
///
/// The OPG recommendation is always produced. If the external prediction service fails or
/// times out, the report carries `prediction_failed = true` and no conditions.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportRes>, ApiError> {
    let report = state.service.submit(parse_session_id(&id)?).await?;
    Ok(Json(report_res(&report)))
}

#[utoipa::path(
    get,
    path = "/sessions/{id}/report",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Latest report", body = ReportRes),
        (status = 404, description = "Unknown session or no report yet", body = ErrorRes)
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportRes>, ApiError> {
    let report = state.service.report(parse_session_id(&id)?).await?;
    Ok(Json(report_res(&report)))
}

fn parse_session_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::BadRequest("Invalid session id".into()))
}

fn selected_msg(s: &SelectedSymptom) -> SelectedSymptomMsg {
    SelectedSymptomMsg {
        name: s.name.clone(),
        severity: i64::from(s.severity.value()),
    }
}

fn condition_msg(c: &Condition) -> ConditionMsg {
    ConditionMsg {
        name: c.name.clone(),
        probability: c.probability_label.to_string(),
        description: c.description.clone(),
    }
}

fn session_res(session: &TriageSession) -> SessionRes {
    SessionRes {
        id: session.id.to_string(),
        patient_name: session.patient.name.to_string(),
        age: session.patient.age,
        gender: session.patient.gender.to_string(),
        symptoms: session
            .selection
            .selections()
            .iter()
            .map(selected_msg)
            .collect(),
        has_report: session.report.is_some(),
        created_at: session.created_at.to_rfc3339(),
    }
}

fn report_res(report: &SessionReport) -> ReportRes {
    ReportRes {
        patient_name: report.patient_name.clone(),
        age: report.age,
        gender: report.gender.clone(),
        symptoms: report.symptoms.iter().map(selected_msg).collect(),
        summary: report.summary.clone(),
        conditions: report.conditions.iter().map(condition_msg).collect(),
        differential: report.differential().iter().map(condition_msg).collect(),
        conditions_message: report.conditions_message(),
        advisory_text: report.advisory_text.clone(),
        needs_imaging: report.needs_imaging,
        tier: report.tier.to_string(),
        score: report.score,
        candidates: report
            .candidates
            .iter()
            .map(|c| CandidateConditionMsg {
                name: c.name.clone(),
                weight: c.weight,
                share: c.share,
            })
            .collect(),
        prediction_failed: report.prediction_status.is_failed(),
        generated_at: report.generated_at.to_rfc3339(),
    }
}
