use thiserror::Error;

/// Errores del planner. La exportación no intenta recuperarse: si falta el
/// programa o el backend PDF falla, no se produce salida parcial.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("no program selected for export")]
    MissingProgram,
    #[error("program '{0}' not found")]
    ProgramNotFound(String),
    #[error("failed to build PDF: {0}")]
    Pdf(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
