//! Dated field events recorded against a plot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::validation::{non_empty, parse_optional_decimal, parse_optional_int, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoRegistro {
    #[default]
    Labor,
    Tratamiento,
    Muestreo,
    Vendimia,
}

impl TipoRegistro {
    pub const ALL: [TipoRegistro; 4] = [
        TipoRegistro::Labor,
        TipoRegistro::Tratamiento,
        TipoRegistro::Muestreo,
        TipoRegistro::Vendimia,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TipoRegistro::Labor => "Labor",
            TipoRegistro::Tratamiento => "Tratamiento",
            TipoRegistro::Muestreo => "Muestreo",
            TipoRegistro::Vendimia => "Vendimia",
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            TipoRegistro::Labor => "LABOR",
            TipoRegistro::Tratamiento => "TRATAMIENTO",
            TipoRegistro::Muestreo => "MUESTREO",
            TipoRegistro::Vendimia => "VENDIMIA",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_code() == code)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatosLabor {
    /// Pruning, tilling, green harvest...
    pub labor: String,
    #[serde(default)]
    pub horas: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatosTratamiento {
    pub producto: String,
    pub dosis: f64,
    #[serde(default)]
    pub unidad_dosis: Option<String>,
    /// Pre-harvest interval in days.
    #[serde(default)]
    pub plazo_seguridad_dias: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatosMuestreo {
    #[serde(default)]
    pub grado_brix: Option<f64>,
    #[serde(default)]
    pub acidez_total: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatosVendimia {
    pub kilos: f64,
    #[serde(default)]
    pub grado_probable: Option<f64>,
}

/// Variant-specific part of a record, tagged on `tipo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetalleRegistro {
    Labor(DatosLabor),
    Tratamiento(DatosTratamiento),
    Muestreo(DatosMuestreo),
    Vendimia(DatosVendimia),
}

impl DetalleRegistro {
    pub fn tipo(&self) -> TipoRegistro {
        match self {
            DetalleRegistro::Labor(_) => TipoRegistro::Labor,
            DetalleRegistro::Tratamiento(_) => TipoRegistro::Tratamiento,
            DetalleRegistro::Muestreo(_) => TipoRegistro::Muestreo,
            DetalleRegistro::Vendimia(_) => TipoRegistro::Vendimia,
        }
    }

    /// One-line summary for the records table.
    pub fn summary(&self) -> String {
        match self {
            DetalleRegistro::Labor(l) => match l.horas {
                Some(h) => format!("{} ({} h)", l.labor, h),
                None => l.labor.clone(),
            },
            DetalleRegistro::Tratamiento(t) => {
                let unidad = t.unidad_dosis.as_deref().unwrap_or("");
                let mut s = format!("{} · {} {}", t.producto, t.dosis, unidad);
                if let Some(p) = t.plazo_seguridad_dias {
                    s.push_str(&format!(" · plazo {} días", p));
                }
                s.trim_end().to_string()
            }
            DetalleRegistro::Muestreo(m) => {
                let mut parts = Vec::new();
                if let Some(b) = m.grado_brix {
                    parts.push(format!("{} ºBx", b));
                }
                if let Some(a) = m.acidez_total {
                    parts.push(format!("AT {} g/l", a));
                }
                if let Some(p) = m.ph {
                    parts.push(format!("pH {}", p));
                }
                parts.join(" · ")
            }
            DetalleRegistro::Vendimia(v) => match v.grado_probable {
                Some(g) => format!("{} kg · {} % vol", v.kilos, g),
                None => format!("{} kg", v.kilos),
            },
        }
    }
}

/// Record as returned by `/api/{slug}/parcelas/{id}/registros`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroVinedo {
    pub id: i64,
    pub parcela_id: i64,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(flatten)]
    pub detalle: DetalleRegistro,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroPayload {
    pub fecha: NaiveDate,
    pub observaciones: Option<String>,
    #[serde(flatten)]
    pub detalle: DetalleRegistro,
}

/// Editor state: one text field per possible attribute, only the ones of
/// the selected `tipo` are read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistroForm {
    pub tipo: TipoRegistro,
    pub fecha: String,
    pub observaciones: String,
    pub labor: String,
    pub horas: String,
    pub producto: String,
    pub dosis: String,
    pub unidad_dosis: String,
    pub plazo_seguridad_dias: String,
    pub grado_brix: String,
    pub acidez_total: String,
    pub ph: String,
    pub kilos: String,
    pub grado_probable: String,
}

fn bounded(
    raw: &str,
    field: &'static str,
    min: f64,
    max: f64,
    message: &'static str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    match parse_optional_decimal(raw) {
        Ok(Some(v)) if v >= min && v <= max => Some(v),
        Ok(None) => None,
        _ => {
            errors.add(field, message);
            None
        }
    }
}

impl RegistroForm {
    pub fn new(tipo: TipoRegistro, today: NaiveDate) -> Self {
        Self {
            tipo,
            fecha: today.format("%Y-%m-%d").to_string(),
            unidad_dosis: "l/ha".to_string(),
            ..Self::default()
        }
    }

    pub fn validate(&self, today: NaiveDate) -> Result<RegistroPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let fecha = NaiveDate::parse_from_str(self.fecha.trim(), "%Y-%m-%d").ok();
        match fecha {
            None => errors.add("fecha", "Fecha no válida"),
            Some(f) if f > today => errors.add("fecha", "La fecha no puede ser futura"),
            Some(_) => {}
        }

        let detalle = match self.tipo {
            TipoRegistro::Labor => {
                let labor = self.labor.trim();
                if labor.chars().count() < 2 {
                    errors.add("labor", "Describe la labor realizada");
                }
                let horas = bounded(&self.horas, "horas", 0.1, 24.0, "Horas entre 0,1 y 24", &mut errors);
                DetalleRegistro::Labor(DatosLabor {
                    labor: labor.to_string(),
                    horas,
                })
            }
            TipoRegistro::Tratamiento => {
                let producto = self.producto.trim();
                if producto.is_empty() {
                    errors.add("producto", "Indica el producto aplicado");
                }
                let dosis = match parse_optional_decimal(&self.dosis) {
                    Ok(Some(d)) if d > 0.0 => d,
                    _ => {
                        errors.add("dosis", "Dosis mayor que 0");
                        0.0
                    }
                };
                let plazo = match parse_optional_int(&self.plazo_seguridad_dias) {
                    Ok(Some(p)) if p >= 0 => Some(p),
                    Ok(None) => None,
                    _ => {
                        errors.add("plazo_seguridad_dias", "Plazo de seguridad en días");
                        None
                    }
                };
                DetalleRegistro::Tratamiento(DatosTratamiento {
                    producto: producto.to_string(),
                    dosis,
                    unidad_dosis: non_empty(&self.unidad_dosis),
                    plazo_seguridad_dias: plazo,
                })
            }
            TipoRegistro::Muestreo => {
                let grado_brix = bounded(&self.grado_brix, "grado_brix", 0.0, 40.0, "ºBrix entre 0 y 40", &mut errors);
                let acidez_total = bounded(&self.acidez_total, "acidez_total", 0.0, 20.0, "Acidez entre 0 y 20 g/l", &mut errors);
                let ph = bounded(&self.ph, "ph", 2.5, 4.5, "pH entre 2,5 y 4,5", &mut errors);
                let all_blank = [&self.grado_brix, &self.acidez_total, &self.ph]
                    .iter()
                    .all(|v| v.trim().is_empty());
                if all_blank {
                    errors.add("grado_brix", "Indica al menos un valor del muestreo");
                }
                DetalleRegistro::Muestreo(DatosMuestreo {
                    grado_brix,
                    acidez_total,
                    ph,
                })
            }
            TipoRegistro::Vendimia => {
                let kilos = match parse_optional_decimal(&self.kilos) {
                    Ok(Some(k)) if k > 0.0 => k,
                    _ => {
                        errors.add("kilos", "Kilos vendimiados mayor que 0");
                        0.0
                    }
                };
                let grado_probable = bounded(&self.grado_probable, "grado_probable", 0.0, 20.0, "Grado probable entre 0 y 20", &mut errors);
                DetalleRegistro::Vendimia(DatosVendimia {
                    kilos,
                    grado_probable,
                })
            }
        };

        match fecha {
            Some(fecha) if errors.is_empty() => Ok(RegistroPayload {
                fecha,
                observaciones: non_empty(&self.observaciones),
                detalle,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
    }

    #[test]
    fn test_deserialize_mixed_records() {
        let json = r#"[
            {"id":1,"parcelaId":4,"fecha":"2025-03-01","tipo":"LABOR","labor":"Poda","horas":6},
            {"id":2,"parcelaId":4,"fecha":"2025-06-10","tipo":"TRATAMIENTO","producto":"Azufre","dosis":3.5,"unidadDosis":"kg/ha","plazoSeguridadDias":21},
            {"id":3,"parcelaId":4,"fecha":"2025-09-01","tipo":"MUESTREO","gradoBrix":22.4,"ph":3.4},
            {"id":4,"parcelaId":4,"fecha":"2025-09-20","tipo":"VENDIMIA","kilos":5200}
        ]"#;
        let registros: Vec<RegistroVinedo> = serde_json::from_str(json).unwrap();
        let tipos: Vec<TipoRegistro> = registros.iter().map(|r| r.detalle.tipo()).collect();
        assert_eq!(tipos, TipoRegistro::ALL.to_vec());
        assert_eq!(registros[0].detalle.summary(), "Poda (6 h)");
        assert_eq!(registros[1].detalle.summary(), "Azufre · 3.5 kg/ha · plazo 21 días");
        assert_eq!(registros[2].detalle.summary(), "22.4 ºBx · pH 3.4");
        assert_eq!(registros[3].detalle.summary(), "5200 kg");
    }

    #[test]
    fn test_treatment_requires_product_and_dose() {
        let form = RegistroForm::new(TipoRegistro::Tratamiento, today());
        let errors = form.validate(today()).unwrap_err();
        assert!(errors.contains("producto"));
        assert!(errors.contains("dosis"));
        assert!(!errors.contains("kilos"));
    }

    #[test]
    fn test_sampling_needs_one_value_in_range() {
        let mut form = RegistroForm::new(TipoRegistro::Muestreo, today());
        assert!(form.validate(today()).unwrap_err().contains("grado_brix"));

        form.ph = "5.1".into();
        assert!(form.validate(today()).unwrap_err().contains("ph"));

        form.ph = "3,45".into();
        let payload = form.validate(today()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["tipo"], "MUESTREO");
        assert_eq!(json["ph"], 3.45);
        assert!(json["gradoBrix"].is_null());
    }

    #[test]
    fn test_harvest_payload_and_future_date() {
        let mut form = RegistroForm::new(TipoRegistro::Vendimia, today());
        form.kilos = "4800".into();
        form.fecha = "2025-09-30".into();
        assert!(form.validate(today()).unwrap_err().contains("fecha"));

        form.fecha = "2025-09-14".into();
        let payload = form.validate(today()).unwrap();
        match payload.detalle {
            DetalleRegistro::Vendimia(v) => assert_eq!(v.kilos, 4800.0),
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_labor_ignores_other_variant_fields() {
        let mut form = RegistroForm::new(TipoRegistro::Labor, today());
        form.labor = "Espergura".into();
        form.kilos = "not a number".into();
        assert!(form.validate(today()).is_ok());
    }
}
