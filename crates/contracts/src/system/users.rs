use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::shared::validation::{is_valid_email, non_empty, FieldErrors};
use crate::system::account::password_problem;
use crate::system::auth::Role;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]{3,50}$").expect("username regex"));

/// Tenant-scoped account as listed by `/api/{slug}/usuarios`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rol: Role,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub debe_cambiar_password: bool,
    #[serde(default)]
    pub ultimo_acceso: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsuarioDto {
    pub username: String,
    pub password: String,
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub rol: Role,
}

/// PATCH body. Role and active flag are omitted when editing oneself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsuarioDto {
    pub nombre: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rol: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}

/// Admin reset of someone else's password; the user must change it at next login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordDto {
    pub password: String,
}

pub fn is_valid_username(value: &str) -> bool {
    USERNAME_RE.is_match(value.trim())
}

/// `true` when the logged-in user is looking at their own account.
pub fn is_self(current_user_id: Option<i64>, target_id: i64) -> bool {
    current_user_id == Some(target_id)
}

/// Raw form state of the user editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsuarioForm {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub nombre: String,
    pub email: String,
    pub rol: Role,
    pub activo: bool,
}

impl UsuarioForm {
    pub fn new() -> Self {
        Self {
            activo: true,
            ..Self::default()
        }
    }

    pub fn from_usuario(u: &Usuario) -> Self {
        Self {
            username: u.username.clone(),
            password: String::new(),
            password_confirm: String::new(),
            nombre: u.nombre.clone().unwrap_or_default(),
            email: u.email.clone().unwrap_or_default(),
            rol: u.rol,
            activo: u.activo,
        }
    }

    fn check_common(&self, errors: &mut FieldErrors) {
        if let Some(email) = non_empty(&self.email) {
            if !is_valid_email(&email) {
                errors.add("email", "Email no válido");
            }
        }
        if self.nombre.trim().chars().count() > 100 {
            errors.add("nombre", "El nombre no puede superar 100 caracteres");
        }
    }

    pub fn validate_create(&self) -> Result<CreateUsuarioDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !is_valid_username(&self.username) {
            errors.add(
                "username",
                "Usuario de 3 a 50 caracteres: letras, números, punto, guion o guion bajo",
            );
        }
        if let Some(problem) = password_problem(&self.password) {
            errors.add("password", problem);
        }
        if self.password != self.password_confirm {
            errors.add("password_confirm", "Las contraseñas no coinciden");
        }
        self.check_common(&mut errors);

        errors.into_result(CreateUsuarioDto {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            nombre: non_empty(&self.nombre),
            email: non_empty(&self.email),
            rol: self.rol,
        })
    }

    /// Validate an edit of `original`. Changing one's own role or active flag
    /// is refused here; the fields are dropped from the payload for self edits.
    pub fn validate_update(
        &self,
        original: &Usuario,
        current_user_id: Option<i64>,
    ) -> Result<UpdateUsuarioDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        self.check_common(&mut errors);

        let editing_self = is_self(current_user_id, original.id);
        if editing_self {
            if self.rol != original.rol {
                errors.add("rol", "No puedes cambiar tu propio rol");
            }
            if self.activo != original.activo {
                errors.add("activo", "No puedes desactivar tu propia cuenta");
            }
        }

        errors.into_result(UpdateUsuarioDto {
            nombre: non_empty(&self.nombre),
            email: non_empty(&self.email),
            rol: (!editing_self).then_some(self.rol),
            activo: (!editing_self).then_some(self.activo),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario(id: i64, rol: Role) -> Usuario {
        Usuario {
            id,
            username: "luis".into(),
            nombre: None,
            email: None,
            rol,
            activo: true,
            debe_cambiar_password: false,
            ultimo_acceso: None,
        }
    }

    #[test]
    fn test_create_validation() {
        let mut form = UsuarioForm::new();
        form.username = "a".into();
        form.password = "corta".into();
        form.password_confirm = "otra".into();
        form.email = "luis@".into();
        let errors = form.validate_create().unwrap_err();
        assert!(errors.contains("username"));
        assert!(errors.contains("password"));
        assert!(errors.contains("password_confirm"));
        assert!(errors.contains("email"));

        form.username = " luis.g ".into();
        form.password = "vendimia2025".into();
        form.password_confirm = "vendimia2025".into();
        form.email = String::new();
        let dto = form.validate_create().unwrap();
        assert_eq!(dto.username, "luis.g");
        assert_eq!(dto.email, None);
        assert_eq!(dto.rol, Role::Operario);
    }

    #[test]
    fn test_self_role_change_blocked() {
        let original = usuario(5, Role::Admin);
        let mut form = UsuarioForm::from_usuario(&original);
        form.rol = Role::Operario;
        let errors = form.validate_update(&original, Some(5)).unwrap_err();
        assert!(errors.contains("rol"));

        form.rol = Role::Admin;
        form.activo = false;
        let errors = form.validate_update(&original, Some(5)).unwrap_err();
        assert!(errors.contains("activo"));
    }

    #[test]
    fn test_self_edit_omits_role_and_active() {
        let original = usuario(5, Role::Admin);
        let mut form = UsuarioForm::from_usuario(&original);
        form.nombre = " Luis ".into();
        let dto = form.validate_update(&original, Some(5)).unwrap();
        assert_eq!(dto.rol, None);
        assert_eq!(dto.activo, None);
        assert_eq!(dto.nombre.as_deref(), Some("Luis"));
        let body = serde_json::to_value(&dto).unwrap();
        assert!(body.get("rol").is_none());
    }

    #[test]
    fn test_admin_can_change_others() {
        let original = usuario(9, Role::Operario);
        let mut form = UsuarioForm::from_usuario(&original);
        form.rol = Role::Admin;
        form.activo = false;
        let dto = form.validate_update(&original, Some(5)).unwrap();
        assert_eq!(dto.rol, Some(Role::Admin));
        assert_eq!(dto.activo, Some(false));
    }
}
