use crate::types::DbId;

/// Why a required input field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    /// The field was not supplied at all.
    Required,
    /// The field was supplied but empty or whitespace only.
    Blank,
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: FieldProblem,
}

impl FieldError {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            problem: FieldProblem::Required,
        }
    }

    pub fn blank(field: &'static str) -> Self {
        Self {
            field,
            problem: FieldProblem::Blank,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required fields: {}", field_names(.0))]
    MissingFields(Vec<FieldError>),

    /// Unknown username, wrong password and inactive account all map here.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Logout failed")]
    LogoutFailed,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stable machine-readable key for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::MissingFields(_) => "MISSING_FIELD",
            CoreError::InvalidCredentials => "INVALID_CREDENTIALS",
            CoreError::TokenInvalid => "TOKEN_INVALID",
            CoreError::TokenExpired => "TOKEN_EXPIRED",
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::LogoutFailed => "LOGOUT_FAILED",
            CoreError::Store(_) | CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Convenience alias for fallible domain operations.
pub type CoreResult<T> = Result<T, CoreError>;

fn field_names(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.field)
        .collect::<Vec<_>>()
        .join(", ")
}
