//! User-facing error and status text.
//!
//! Domain errors carry kinds and field names only; the Spanish strings
//! existing clients match on are produced here and nowhere else.

use aula_core::error::{CoreError, FieldError, FieldProblem};

pub const INVALID_CREDENTIALS: &str = "Credenciales incorrectas";
pub const TOKEN_INVALID: &str = "Token inválido";
pub const LOGOUT_FAILED: &str = "Error al cerrar sesión";
pub const LOGOUT_SUCCESS: &str = "Cierre de sesión exitoso";
pub const INCOMPLETE_FORM: &str = "Por favor, completa todos los campos requeridos.";
pub const CREDENTIALS_NOT_PROVIDED: &str = "Las credenciales de autenticación no se proveyeron.";
pub const BAD_AUTH_HEADER: &str = "Formato de autorización inválido. Se esperaba: Bearer <token>";
pub const NOT_FOUND: &str = "No encontrado.";
pub const INTERNAL_ERROR: &str = "Ha ocurrido un error interno";

/// Text for a single rejected field.
pub fn field_error(error: &FieldError) -> String {
    match error.problem {
        FieldProblem::Required => format!("El campo {} es requerido.", error.field),
        FieldProblem::Blank => format!("El campo {} no puede estar vacío.", error.field),
    }
}

/// One field gets its own message; several collapse into a generic one.
pub fn missing_fields(errors: &[FieldError]) -> String {
    match errors {
        [single] => field_error(single),
        _ => INCOMPLETE_FORM.to_string(),
    }
}

/// User-facing text for a domain error.
pub fn core_error(error: &CoreError) -> String {
    match error {
        CoreError::MissingFields(fields) => missing_fields(fields),
        CoreError::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
        CoreError::TokenInvalid | CoreError::TokenExpired => TOKEN_INVALID.to_string(),
        CoreError::NotFound { .. } => NOT_FOUND.to_string(),
        CoreError::LogoutFailed => LOGOUT_FAILED.to_string(),
        CoreError::Store(_) | CoreError::Internal(_) => INTERNAL_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_missing_field_names_the_field() {
        assert_eq!(
            missing_fields(&[FieldError::required("username")]),
            "El campo username es requerido."
        );
        assert_eq!(
            missing_fields(&[FieldError::blank("password")]),
            "El campo password no puede estar vacío."
        );
    }

    #[test]
    fn several_missing_fields_use_generic_text() {
        let errors = [FieldError::required("username"), FieldError::blank("password")];
        assert_eq!(missing_fields(&errors), INCOMPLETE_FORM);
    }

    #[test]
    fn expired_and_invalid_tokens_read_the_same() {
        assert_eq!(core_error(&CoreError::TokenExpired), TOKEN_INVALID);
        assert_eq!(core_error(&CoreError::TokenInvalid), TOKEN_INVALID);
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let text = core_error(&CoreError::Store("password=hunter2".into()));
        assert_eq!(text, INTERNAL_ERROR);
    }
}
