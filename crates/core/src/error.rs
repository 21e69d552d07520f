#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Please select at least one symptom")]
    NoSymptomsSelected,
    #[error("unknown symptom: {0}")]
    UnknownSymptom(String),
    #[error("symptom is not selected: {0}")]
    SymptomNotSelected(String),
    #[error("session not found: {0}")]
    SessionNotFound(uuid::Uuid),
    #[error("no report has been generated for session {0}")]
    ReportNotGenerated(uuid::Uuid),
    #[error(transparent)]
    Types(#[from] triage_types::TypesError),

    #[error("invalid symptom catalog: {0}")]
    InvalidCatalog(String),
    #[error("failed to read symptom catalog: {0}")]
    CatalogRead(std::io::Error),
    #[error("failed to parse symptom catalog YAML: {0}")]
    CatalogParse(serde_yaml::Error),
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
