use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::validation::{non_empty, parse_optional_int, FieldErrors};

/// Wine production batch, `/api/{slug}/lotes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lote {
    pub id: i64,
    pub producto_id: i64,
    #[serde(default)]
    pub producto_nombre: Option<String>,
    pub codigo: String,
    #[serde(default)]
    pub anada: Option<i32>,
    #[serde(default)]
    pub botellas_disponibles: i64,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDate>,
    #[serde(default)]
    pub notas: Option<String>,
}

impl Lote {
    pub fn has_stock(&self) -> bool {
        self.botellas_disponibles > 0
    }
}

/// Bottling run recorded against a lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embotellado {
    pub id: i64,
    pub lote_id: i64,
    pub fecha: NaiveDate,
    pub botellas: i64,
    #[serde(default)]
    pub notas: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotePayload {
    pub producto_id: i64,
    pub codigo: String,
    pub anada: Option<i32>,
    pub notas: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbotelladoPayload {
    pub fecha: NaiveDate,
    pub botellas: i64,
    pub notas: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoteForm {
    pub producto_id: Option<i64>,
    pub codigo: String,
    pub anada: String,
    pub notas: String,
}

impl LoteForm {
    pub fn validate(&self) -> Result<LotePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.producto_id.is_none() {
            errors.add("producto", "Selecciona el vino del lote");
        }
        let codigo = self.codigo.trim();
        if codigo.is_empty() || codigo.chars().count() > 30 {
            errors.add("codigo", "El código es obligatorio (máx. 30 caracteres)");
        }
        let anada = match parse_optional_int(&self.anada) {
            Ok(Some(a)) if (1900..=2100).contains(&a) => Some(a as i32),
            Ok(None) => None,
            _ => {
                errors.add("anada", "Añada no válida");
                None
            }
        };
        match self.producto_id {
            Some(producto_id) if errors.is_empty() => Ok(LotePayload {
                producto_id,
                codigo: codigo.to_string(),
                anada,
                notas: non_empty(&self.notas),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbotelladoForm {
    pub fecha: String,
    pub botellas: String,
    pub notas: String,
}

impl EmbotelladoForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            fecha: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Bottling cannot be dated in the future.
    pub fn validate(&self, today: NaiveDate) -> Result<EmbotelladoPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let fecha = NaiveDate::parse_from_str(self.fecha.trim(), "%Y-%m-%d").ok();
        match fecha {
            None => errors.add("fecha", "Fecha no válida"),
            Some(f) if f > today => errors.add("fecha", "La fecha no puede ser futura"),
            Some(_) => {}
        }
        let botellas = match self.botellas.trim().parse::<i64>() {
            Ok(b) if b > 0 => b,
            _ => {
                errors.add("botellas", "Número de botellas mayor que 0");
                0
            }
        };
        match fecha {
            Some(fecha) if errors.is_empty() => Ok(EmbotelladoPayload {
                fecha,
                botellas,
                notas: non_empty(&self.notas),
            }),
            _ => Err(errors),
        }
    }
}

/// Map a backend rejection of a lot deletion to a friendlier message.
///
/// Relies on the backend wording: stock-related rejections mention
/// "stock"/"botellas", history-related ones mention bottling or deliveries.
pub fn friendly_delete_error(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("stock") || lower.contains("botellas disponibles") {
        "No se puede eliminar el lote porque todavía tiene botellas disponibles.".to_string()
    } else if lower.contains("embotellado") {
        "No se puede eliminar el lote porque tiene embotellados registrados.".to_string()
    } else if lower.contains("entrega") || lower.contains("albar") {
        "No se puede eliminar el lote porque aparece en albaranes.".to_string()
    } else if raw.trim().is_empty() {
        "No se pudo eliminar el lote.".to_string()
    } else {
        format!("No se pudo eliminar el lote: {}", raw.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
    }

    #[test]
    fn test_friendly_delete_error() {
        assert!(friendly_delete_error("Lote con stock > 0").contains("botellas disponibles"));
        assert!(friendly_delete_error("Existen embotellados asociados").contains("embotellados"));
        assert!(friendly_delete_error("Referenciado por entregas").contains("albaranes"));
        assert_eq!(
            friendly_delete_error("Error interno"),
            "No se pudo eliminar el lote: Error interno"
        );
        assert_eq!(friendly_delete_error(""), "No se pudo eliminar el lote.");
    }

    #[test]
    fn test_lote_form() {
        let form = LoteForm::default();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("producto"));
        assert!(errors.contains("codigo"));

        let form = LoteForm {
            producto_id: Some(3),
            codigo: " L-2024-01 ".into(),
            anada: "2024".into(),
            notas: String::new(),
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.codigo, "L-2024-01");
        assert_eq!(payload.anada, Some(2024));
    }

    #[test]
    fn test_embotellado_form() {
        let mut form = EmbotelladoForm::new(today());
        form.botellas = "0".into();
        assert!(form.validate(today()).unwrap_err().contains("botellas"));

        form.botellas = "600".into();
        form.fecha = "2025-09-16".into();
        assert!(form.validate(today()).unwrap_err().contains("fecha"));

        form.fecha = "2025-09-15".into();
        assert_eq!(form.validate(today()).unwrap().botellas, 600);
    }
}
