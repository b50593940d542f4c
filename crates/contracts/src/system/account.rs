//! Own-account endpoints under `/api/account`.

use serde::{Deserialize, Serialize};

use crate::shared::validation::{is_valid_email, non_empty, FieldErrors, PASSWORD_MIN_LEN};
use crate::system::auth::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perfil {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rol: Role,
    #[serde(default)]
    pub debe_cambiar_password: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePerfilDto {
    pub nombre: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    pub password_actual: String,
    pub password_nueva: String,
}

/// Reason a password is rejected, if any.
pub fn password_problem(password: &str) -> Option<&'static str> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Some("La contraseña debe tener al menos 8 caracteres");
    }
    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Some("La contraseña debe combinar letras y números");
    }
    None
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerfilForm {
    pub nombre: String,
    pub email: String,
}

impl PerfilForm {
    pub fn from_perfil(p: &Perfil) -> Self {
        Self {
            nombre: p.nombre.clone().unwrap_or_default(),
            email: p.email.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<UpdatePerfilDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(email) = non_empty(&self.email) {
            if !is_valid_email(&email) {
                errors.add("email", "Email no válido");
            }
        }
        if self.nombre.trim().chars().count() > 100 {
            errors.add("nombre", "El nombre no puede superar 100 caracteres");
        }
        errors.into_result(UpdatePerfilDto {
            nombre: non_empty(&self.nombre),
            email: non_empty(&self.email),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub actual: String,
    pub nueva: String,
    pub confirmacion: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<ChangePasswordDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.actual.is_empty() {
            errors.add("actual", "Introduce tu contraseña actual");
        }
        if let Some(problem) = password_problem(&self.nueva) {
            errors.add("nueva", problem);
        } else if self.nueva == self.actual {
            errors.add("nueva", "La nueva contraseña debe ser distinta de la actual");
        }
        if self.confirmacion != self.nueva {
            errors.add("confirmacion", "Las contraseñas no coinciden");
        }
        errors.into_result(ChangePasswordDto {
            password_actual: self.actual.clone(),
            password_nueva: self.nueva.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_rules() {
        assert!(password_problem("abc12").is_some());
        assert!(password_problem("soloLetras").is_some());
        assert!(password_problem("12345678").is_some());
        assert_eq!(password_problem("tempranillo7"), None);
    }

    #[test]
    fn test_password_form() {
        let form = PasswordForm {
            actual: "viejo1234".into(),
            nueva: "viejo1234".into(),
            confirmacion: "otra".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("nueva"));
        assert!(errors.contains("confirmacion"));

        let form = PasswordForm {
            actual: "viejo1234".into(),
            nueva: "nuevo5678".into(),
            confirmacion: "nuevo5678".into(),
        };
        let dto = form.validate().unwrap();
        assert_eq!(dto.password_nueva, "nuevo5678");
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["passwordActual"], "viejo1234");
    }

    #[test]
    fn test_profile_form_normalizes() {
        let form = PerfilForm {
            nombre: "  ".into(),
            email: " marta@bodega.es ".into(),
        };
        let dto = form.validate().unwrap();
        assert_eq!(dto.nombre, None);
        assert_eq!(dto.email.as_deref(), Some("marta@bodega.es"));
    }
}
