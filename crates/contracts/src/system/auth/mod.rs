use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    #[serde(alias = "usuario")]
    pub user: StoredUser,
}

/// Tenant-scoped role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[default]
    #[serde(rename = "OPERARIO", other)]
    Operario,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Operario => "Operario",
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Operario => "OPERARIO",
        }
    }

    /// Anything but `ADMIN` is an operator.
    pub fn from_code(code: &str) -> Role {
        if code.trim().eq_ignore_ascii_case("ADMIN") {
            Role::Admin
        } else {
            Role::Operario
        }
    }
}

/// Tenant descriptor embedded in the login payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodegaRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// User/tenant descriptor persisted under `vinops_user`.
///
/// Fields the frontend does not know about are kept in `extra` so that
/// rewriting the stored descriptor after a local edit never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, alias = "role", skip_serializing_if = "Option::is_none")]
    pub rol: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodega: Option<BodegaRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodega_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodega_nombre: Option<String>,
    #[serde(default, alias = "mustChangePassword")]
    pub debe_cambiar_password: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredUser {
    pub fn tenant_slug(&self) -> Option<&str> {
        self.bodega
            .as_ref()
            .and_then(|b| b.slug.as_deref())
            .or(self.slug.as_deref())
            .or(self.bodega_slug.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn tenant_name(&self) -> Option<&str> {
        self.bodega_nombre
            .as_deref()
            .or_else(|| self.bodega.as_ref().and_then(|b| b.nombre.as_deref()))
            .filter(|s| !s.trim().is_empty())
    }

    pub fn role(&self) -> Role {
        self.rol.unwrap_or_default()
    }

    /// Mirror a renamed tenant into the descriptor so the top bar stays in sync.
    pub fn set_tenant_name(&mut self, nombre: &str) {
        self.bodega_nombre = Some(nombre.to_string());
        if let Some(bodega) = self.bodega.as_mut() {
            bodega.nombre = Some(nombre.to_string());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no hay token de sesión")]
    MissingToken,
    #[error("no hay datos de usuario")]
    MissingUser,
    #[error("datos de usuario ilegibles: {0}")]
    InvalidUser(String),
    #[error("el usuario no tiene bodega asociada")]
    MissingTenant,
}

/// Authenticated session rebuilt from the two storage keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: StoredUser,
    pub slug: String,
    pub role: Role,
}

impl Session {
    /// Build a session from raw storage values.
    pub fn restore(token: Option<&str>, user_json: Option<&str>) -> Result<Self, SessionError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::MissingToken)?;
        let raw_user = user_json
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(SessionError::MissingUser)?;
        let user: StoredUser = serde_json::from_str(raw_user)
            .map_err(|e| SessionError::InvalidUser(e.to_string()))?;
        Self::new(token.to_string(), user)
    }

    pub fn new(token: String, user: StoredUser) -> Result<Self, SessionError> {
        let slug = user
            .tenant_slug()
            .ok_or(SessionError::MissingTenant)?
            .to_string();
        let role = user.role();
        Ok(Self {
            token,
            user,
            slug,
            role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.id
    }

    pub fn display_name(&self) -> &str {
        self.user
            .nombre
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.user.username)
    }

    pub fn tenant_name(&self) -> &str {
        self.user.tenant_name().unwrap_or(&self.slug)
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// `/api/{slug}/{suffix}` for tenant-scoped resources.
    pub fn tenant_path(&self, suffix: &str) -> String {
        format!("/api/{}/{}", self.slug, suffix.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_JSON: &str = r#"{
        "id": 7,
        "username": "marta",
        "nombre": "Marta Gil",
        "rol": "ADMIN",
        "bodega": { "id": 3, "nombre": "Bodega Toro", "slug": "bodega-toro" },
        "debeCambiarPassword": false,
        "ultimoAcceso": "2025-09-01T10:00:00"
    }"#;

    #[test]
    fn test_restore_session() {
        let session = Session::restore(Some("abc"), Some(USER_JSON)).unwrap();
        assert_eq!(session.slug, "bodega-toro");
        assert!(session.is_admin());
        assert_eq!(session.display_name(), "Marta Gil");
        assert_eq!(session.tenant_name(), "Bodega Toro");
        assert_eq!(session.bearer(), "Bearer abc");
        assert_eq!(session.tenant_path("/clientes"), "/api/bodega-toro/clientes");
    }

    #[test]
    fn test_restore_requires_token_and_user() {
        assert_eq!(
            Session::restore(None, Some(USER_JSON)),
            Err(SessionError::MissingToken)
        );
        assert_eq!(
            Session::restore(Some("  "), Some(USER_JSON)),
            Err(SessionError::MissingToken)
        );
        assert_eq!(Session::restore(Some("t"), None), Err(SessionError::MissingUser));
        assert!(matches!(
            Session::restore(Some("t"), Some("{not json")),
            Err(SessionError::InvalidUser(_))
        ));
    }

    #[test]
    fn test_flat_descriptor_and_role_alias() {
        let json = r#"{"username":"pepe","role":"SUPERVISOR","slug":"vina-sol","bodegaNombre":"Viña Sol"}"#;
        let session = Session::restore(Some("t"), Some(json)).unwrap();
        assert_eq!(session.slug, "vina-sol");
        assert_eq!(session.role, Role::Operario);
        assert_eq!(session.tenant_name(), "Viña Sol");
        assert_eq!(session.display_name(), "pepe");
    }

    #[test]
    fn test_missing_tenant() {
        let json = r#"{"username":"pepe"}"#;
        assert_eq!(
            Session::restore(Some("t"), Some(json)),
            Err(SessionError::MissingTenant)
        );
    }

    #[test]
    fn test_rename_keeps_unknown_fields() {
        let mut user: StoredUser = serde_json::from_str(USER_JSON).unwrap();
        user.set_tenant_name("Bodega Toro Nueva");
        let written = serde_json::to_string(&user).unwrap();
        let reread: StoredUser = serde_json::from_str(&written).unwrap();
        assert_eq!(reread.tenant_name(), Some("Bodega Toro Nueva"));
        assert_eq!(
            reread.extra.get("ultimoAcceso").and_then(Value::as_str),
            Some("2025-09-01T10:00:00")
        );
        assert_eq!(reread.bodega.unwrap().nombre.as_deref(), Some("Bodega Toro Nueva"));
    }

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("ADMIN"), Role::Admin);
        assert_eq!(Role::from_code("admin"), Role::Admin);
        assert_eq!(Role::from_code("OPERARIO"), Role::Operario);
        assert_eq!(Role::from_code("JEFE"), Role::Operario);
    }
}
