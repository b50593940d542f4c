use serde::{Deserialize, Serialize};

use crate::shared::validation::{
    is_valid_name, non_empty, parse_optional_decimal, parse_optional_int, FieldErrors,
};

/// Vineyard plot, `/api/{slug}/parcelas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcela {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub superficie_ha: Option<f64>,
    #[serde(default)]
    pub altitud_m: Option<i64>,
    #[serde(default)]
    pub variedad: Option<String>,
    #[serde(default)]
    pub municipio: Option<String>,
    #[serde(default)]
    pub ano_plantacion: Option<i32>,
    #[serde(default)]
    pub notas: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelaPayload {
    pub nombre: String,
    pub superficie_ha: Option<f64>,
    pub altitud_m: Option<i64>,
    pub variedad: Option<String>,
    pub municipio: Option<String>,
    pub ano_plantacion: Option<i32>,
    pub notas: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParcelaForm {
    pub nombre: String,
    pub superficie_ha: String,
    pub altitud_m: String,
    pub variedad: String,
    pub municipio: String,
    pub ano_plantacion: String,
    pub notas: String,
}

impl ParcelaForm {
    pub fn from_parcela(p: &Parcela) -> Self {
        Self {
            nombre: p.nombre.clone(),
            superficie_ha: p.superficie_ha.map(|v| v.to_string()).unwrap_or_default(),
            altitud_m: p.altitud_m.map(|v| v.to_string()).unwrap_or_default(),
            variedad: p.variedad.clone().unwrap_or_default(),
            municipio: p.municipio.clone().unwrap_or_default(),
            ano_plantacion: p.ano_plantacion.map(|v| v.to_string()).unwrap_or_default(),
            notas: p.notas.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self, current_year: i32) -> Result<ParcelaPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !is_valid_name(&self.nombre) {
            errors.add("nombre", "El nombre debe tener entre 3 y 100 caracteres");
        }
        let superficie_ha = match parse_optional_decimal(&self.superficie_ha) {
            Ok(Some(s)) if s > 0.0 && s <= 10_000.0 => Some(s),
            Ok(None) => None,
            _ => {
                errors.add("superficie_ha", "Superficie en hectáreas mayor que 0");
                None
            }
        };
        let altitud_m = match parse_optional_int(&self.altitud_m) {
            Ok(Some(a)) if (-100..=3000).contains(&a) => Some(a),
            Ok(None) => None,
            _ => {
                errors.add("altitud_m", "Altitud entre -100 y 3000 m");
                None
            }
        };
        let ano_plantacion = match parse_optional_int(&self.ano_plantacion) {
            Ok(Some(a)) if a >= 1850 && a <= current_year as i64 => Some(a as i32),
            Ok(None) => None,
            _ => {
                errors.add("ano_plantacion", "Año de plantación no válido");
                None
            }
        };

        errors.into_result(ParcelaPayload {
            nombre: self.nombre.trim().to_string(),
            superficie_ha,
            altitud_m,
            variedad: non_empty(&self.variedad),
            municipio: non_empty(&self.municipio),
            ano_plantacion,
            notas: non_empty(&self.notas),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parcela_form() {
        let form = ParcelaForm {
            nombre: "La Viña Vieja".into(),
            superficie_ha: "abc".into(),
            altitud_m: "5000".into(),
            ano_plantacion: "2030".into(),
            ..ParcelaForm::default()
        };
        let errors = form.validate(2025).unwrap_err();
        assert!(errors.contains("superficie_ha"));
        assert!(errors.contains("altitud_m"));
        assert!(errors.contains("ano_plantacion"));

        let form = ParcelaForm {
            nombre: "La Viña Vieja".into(),
            superficie_ha: "2,75".into(),
            altitud_m: "720".into(),
            ano_plantacion: "1965".into(),
            variedad: " Tinta de Toro ".into(),
            ..ParcelaForm::default()
        };
        let payload = form.validate(2025).unwrap();
        assert_eq!(payload.superficie_ha, Some(2.75));
        assert_eq!(payload.variedad.as_deref(), Some("Tinta de Toro"));
        assert_eq!(payload.municipio, None);
    }
}
