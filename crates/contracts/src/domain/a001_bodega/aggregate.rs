use serde::{Deserialize, Serialize};

use crate::shared::geocoding::{country_code_for, location_queries};
use crate::shared::validation::{
    is_valid_email, is_valid_name, is_valid_phone, is_valid_postal_code, is_valid_tax_id,
    non_empty, normalize_tax_id, FieldErrors,
};

/// Tenant profile, `GET /api/bodegas/{slug}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bodega {
    #[serde(default)]
    pub id: Option<i64>,
    pub nombre: String,
    pub slug: String,
    #[serde(default)]
    pub cif: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub codigo_postal: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub provincia: Option<String>,
    #[serde(default)]
    pub pais: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Bodega {
    /// Location queries for the weather widget, most specific first.
    pub fn location_queries(&self) -> Vec<String> {
        location_queries(
            self.ciudad.as_deref(),
            self.provincia.as_deref(),
            self.pais.as_deref(),
        )
    }

    pub fn preferred_country_code(&self) -> Option<&'static str> {
        self.pais.as_deref().and_then(country_code_for)
    }
}

/// `PATCH /api/bodegas/{slug}` body. The slug itself is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBodegaDto {
    pub nombre: String,
    pub cif: Option<String>,
    pub direccion: Option<String>,
    pub codigo_postal: Option<String>,
    pub ciudad: Option<String>,
    pub provincia: Option<String>,
    pub pais: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodegaForm {
    pub nombre: String,
    pub cif: String,
    pub direccion: String,
    pub codigo_postal: String,
    pub ciudad: String,
    pub provincia: String,
    pub pais: String,
    pub telefono: String,
    pub email: String,
}

impl BodegaForm {
    pub fn from_bodega(b: &Bodega) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            nombre: b.nombre.clone(),
            cif: text(&b.cif),
            direccion: text(&b.direccion),
            codigo_postal: text(&b.codigo_postal),
            ciudad: text(&b.ciudad),
            provincia: text(&b.provincia),
            pais: text(&b.pais),
            telefono: text(&b.telefono),
            email: text(&b.email),
        }
    }

    pub fn validate(&self) -> Result<UpdateBodegaDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !is_valid_name(&self.nombre) {
            errors.add("nombre", "El nombre debe tener entre 3 y 100 caracteres");
        }
        if non_empty(&self.cif).is_some() && !is_valid_tax_id(&self.cif) {
            errors.add("cif", "CIF no válido");
        }
        if non_empty(&self.codigo_postal).is_some() && !is_valid_postal_code(&self.codigo_postal) {
            errors.add("codigo_postal", "Código postal de 5 dígitos");
        }
        if non_empty(&self.telefono).is_some() && !is_valid_phone(&self.telefono) {
            errors.add("telefono", "Teléfono no válido");
        }
        if non_empty(&self.email).is_some() && !is_valid_email(&self.email) {
            errors.add("email", "Email no válido");
        }

        errors.into_result(UpdateBodegaDto {
            nombre: self.nombre.trim().to_string(),
            cif: non_empty(&self.cif).map(|c| normalize_tax_id(&c)),
            direccion: non_empty(&self.direccion),
            codigo_postal: non_empty(&self.codigo_postal),
            ciudad: non_empty(&self.ciudad),
            provincia: non_empty(&self.provincia),
            pais: non_empty(&self.pais),
            telefono: non_empty(&self.telefono),
            email: non_empty(&self.email),
        })
    }
}

// ============================================================================
// Registration assistant (`POST /api/chat-registro-bodega`)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRol {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMensaje {
    pub rol: ChatRol,
    pub contenido: String,
}

/// The whole conversation is sent on every turn; the backend is stateless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRegistroRequest {
    pub mensajes: Vec<ChatMensaje>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRegistroResponse {
    pub respuesta: String,
    /// Set once the backend has created the tenant and its admin user.
    #[serde(default)]
    pub completado: bool,
    #[serde(default)]
    pub bodega_slug: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_validation_and_normalization() {
        let mut form = BodegaForm {
            nombre: "Bo".into(),
            codigo_postal: "4900".into(),
            ..BodegaForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("nombre"));
        assert!(errors.contains("codigo_postal"));

        form.nombre = "  Bodega Toro ".into();
        form.codigo_postal = "49800".into();
        form.cif = "b-49123456".into();
        let dto = form.validate().unwrap();
        assert_eq!(dto.nombre, "Bodega Toro");
        assert_eq!(dto.cif.as_deref(), Some("B49123456"));
        assert_eq!(dto.telefono, None);
    }

    #[test]
    fn test_location_queries_from_address() {
        let bodega = Bodega {
            nombre: "Bodega Toro".into(),
            slug: "bodega-toro".into(),
            ciudad: Some("Toro".into()),
            pais: Some("España".into()),
            ..Bodega::default()
        };
        assert_eq!(bodega.location_queries(), vec!["Toro, España", "Toro", "España"]);
        assert_eq!(bodega.preferred_country_code(), Some("ES"));
    }

    #[test]
    fn test_chat_payload_shape() {
        let req = ChatRegistroRequest {
            mensajes: vec![ChatMensaje {
                rol: ChatRol::User,
                contenido: "Hola".into(),
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["mensajes"][0]["rol"], "user");

        let resp: ChatRegistroResponse =
            serde_json::from_str(r#"{"respuesta":"¿Cómo se llama tu bodega?"}"#).unwrap();
        assert!(!resp.completado);
    }
}
