use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::validation::{non_empty, parse_optional_decimal, FieldErrors};

// ============================================================================
// Lifecycle
// ============================================================================

/// Delivery note state. `Anulado` and `Entregado` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoEntrega {
    #[default]
    Borrador,
    Confirmado,
    Entregado,
    Anulado,
}

impl EstadoEntrega {
    pub const ALL: [EstadoEntrega; 4] = [
        EstadoEntrega::Borrador,
        EstadoEntrega::Confirmado,
        EstadoEntrega::Entregado,
        EstadoEntrega::Anulado,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EstadoEntrega::Borrador => "Borrador",
            EstadoEntrega::Confirmado => "Confirmado",
            EstadoEntrega::Entregado => "Entregado",
            EstadoEntrega::Anulado => "Anulado",
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            EstadoEntrega::Borrador => "BORRADOR",
            EstadoEntrega::Confirmado => "CONFIRMADO",
            EstadoEntrega::Entregado => "ENTREGADO",
            EstadoEntrega::Anulado => "ANULADO",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_code() == code)
    }

    /// CSS modifier for the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            EstadoEntrega::Borrador => "badge badge--neutral",
            EstadoEntrega::Confirmado => "badge badge--info",
            EstadoEntrega::Entregado => "badge badge--success",
            EstadoEntrega::Anulado => "badge badge--error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EstadoEntrega::Entregado | EstadoEntrega::Anulado)
    }

    /// Only drafts can be edited.
    pub fn is_editable(&self) -> bool {
        *self == EstadoEntrega::Borrador
    }

    pub fn can_transition_to(&self, next: EstadoEntrega) -> bool {
        use EstadoEntrega::*;
        matches!(
            (self, next),
            (Borrador, Confirmado) | (Confirmado, Entregado) | (Borrador, Anulado) | (Confirmado, Anulado)
        )
    }

    pub fn available_actions(&self) -> Vec<AccionEntrega> {
        AccionEntrega::ALL
            .into_iter()
            .filter(|a| self.can_transition_to(a.target()))
            .collect()
    }
}

/// State-changing action, posted to `/entregas/{id}/{segment}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccionEntrega {
    Confirmar,
    Entregar,
    Anular,
}

impl AccionEntrega {
    pub const ALL: [AccionEntrega; 3] = [
        AccionEntrega::Confirmar,
        AccionEntrega::Entregar,
        AccionEntrega::Anular,
    ];

    pub fn target(&self) -> EstadoEntrega {
        match self {
            AccionEntrega::Confirmar => EstadoEntrega::Confirmado,
            AccionEntrega::Entregar => EstadoEntrega::Entregado,
            AccionEntrega::Anular => EstadoEntrega::Anulado,
        }
    }

    pub fn path_segment(&self) -> &'static str {
        match self {
            AccionEntrega::Confirmar => "confirmar",
            AccionEntrega::Entregar => "entregar",
            AccionEntrega::Anular => "anular",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccionEntrega::Confirmar => "Confirmar",
            AccionEntrega::Entregar => "Marcar entregado",
            AccionEntrega::Anular => "Anular",
        }
    }

    pub fn confirm_message(&self) -> &'static str {
        match self {
            AccionEntrega::Confirmar => "¿Confirmar el albarán? Ya no podrá editarse.",
            AccionEntrega::Entregar => "¿Marcar el albarán como entregado?",
            AccionEntrega::Anular => "¿Anular el albarán? Esta acción no se puede deshacer.",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineaEntrega {
    pub producto_id: i64,
    #[serde(default)]
    pub producto_nombre: Option<String>,
    #[serde(default)]
    pub lote_id: Option<i64>,
    #[serde(default)]
    pub lote_codigo: Option<String>,
    pub cantidad: i64,
    #[serde(default)]
    pub precio_unitario: Option<f64>,
}

impl LineaEntrega {
    pub fn importe(&self) -> Option<f64> {
        self.precio_unitario.map(|p| p * self.cantidad as f64)
    }
}

/// Delivery note / draft invoice, `/api/{slug}/entregas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entrega {
    pub id: i64,
    #[serde(default)]
    pub numero: Option<String>,
    pub cliente_id: i64,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    pub fecha: NaiveDate,
    #[serde(default)]
    pub incluir_precios: bool,
    #[serde(default)]
    pub estado: EstadoEntrega,
    #[serde(default)]
    pub lineas: Vec<LineaEntrega>,
    #[serde(default)]
    pub observaciones: Option<String>,
}

impl Entrega {
    pub fn total_botellas(&self) -> i64 {
        self.lineas.iter().map(|l| l.cantidad).sum()
    }

    /// Sum of line amounts; `None` when prices are not included.
    pub fn total(&self) -> Option<f64> {
        if !self.incluir_precios {
            return None;
        }
        Some(self.lineas.iter().filter_map(LineaEntrega::importe).sum())
    }

    pub fn display_number(&self) -> String {
        self.numero
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

/// List filter sent as query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntregaFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<EstadoEntrega>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desde: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hasta: Option<NaiveDate>,
}

// ============================================================================
// Form
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineaPayload {
    pub producto_id: i64,
    pub lote_id: Option<i64>,
    pub cantidad: i64,
    pub precio_unitario: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntregaPayload {
    pub cliente_id: i64,
    pub fecha: NaiveDate,
    pub incluir_precios: bool,
    pub observaciones: Option<String>,
    pub lineas: Vec<LineaPayload>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineaForm {
    pub producto_id: Option<i64>,
    pub lote_id: Option<i64>,
    pub cantidad: String,
    pub precio_unitario: String,
}

impl LineaForm {
    pub fn from_linea(l: &LineaEntrega) -> Self {
        Self {
            producto_id: Some(l.producto_id),
            lote_id: l.lote_id,
            cantidad: l.cantidad.to_string(),
            precio_unitario: l.precio_unitario.map(|p| p.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntregaForm {
    pub cliente_id: Option<i64>,
    pub fecha: String,
    pub incluir_precios: bool,
    pub observaciones: String,
    pub lineas: Vec<LineaForm>,
}

impl EntregaForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            fecha: today.format("%Y-%m-%d").to_string(),
            lineas: vec![LineaForm::default()],
            ..Self::default()
        }
    }

    pub fn from_entrega(e: &Entrega) -> Self {
        Self {
            cliente_id: Some(e.cliente_id),
            fecha: e.fecha.format("%Y-%m-%d").to_string(),
            incluir_precios: e.incluir_precios,
            observaciones: e.observaciones.clone().unwrap_or_default(),
            lineas: e.lineas.iter().map(LineaForm::from_linea).collect(),
        }
    }

    pub fn validate(&self) -> Result<EntregaPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.cliente_id.is_none() {
            errors.add("cliente", "Selecciona un cliente");
        }
        let fecha = NaiveDate::parse_from_str(self.fecha.trim(), "%Y-%m-%d").ok();
        if fecha.is_none() {
            errors.add("fecha", "Fecha no válida");
        }

        let mut lineas = Vec::with_capacity(self.lineas.len());
        if self.lineas.is_empty() {
            errors.add("lineas", "Añade al menos una línea");
        }
        for (i, linea) in self.lineas.iter().enumerate() {
            let n = i + 1;
            let Some(producto_id) = linea.producto_id else {
                errors.add("lineas", format!("Línea {}: selecciona un producto", n));
                continue;
            };
            let cantidad = match linea.cantidad.trim().parse::<i64>() {
                Ok(c) if c > 0 => c,
                _ => {
                    errors.add("lineas", format!("Línea {}: la cantidad debe ser un entero mayor que 0", n));
                    continue;
                }
            };
            let precio_unitario = match parse_optional_decimal(&linea.precio_unitario) {
                Ok(Some(p)) if p >= 0.0 => Some(p),
                Ok(None) if !self.incluir_precios => None,
                Ok(None) => {
                    errors.add("lineas", format!("Línea {}: indica el precio unitario", n));
                    continue;
                }
                _ => {
                    errors.add("lineas", format!("Línea {}: precio no válido", n));
                    continue;
                }
            };
            lineas.push(LineaPayload {
                producto_id,
                lote_id: linea.lote_id,
                cantidad,
                precio_unitario: if self.incluir_precios { precio_unitario } else { None },
            });
        }

        match (self.cliente_id, fecha) {
            (Some(cliente_id), Some(fecha)) if errors.is_empty() => Ok(EntregaPayload {
                cliente_id,
                fecha,
                incluir_precios: self.incluir_precios,
                observaciones: non_empty(&self.observaciones),
                lineas,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lifecycle_transitions() {
        use EstadoEntrega::*;
        assert!(Borrador.can_transition_to(Confirmado));
        assert!(Confirmado.can_transition_to(Entregado));
        assert!(Borrador.can_transition_to(Anulado));
        assert!(Confirmado.can_transition_to(Anulado));
        assert!(!Borrador.can_transition_to(Entregado));
        assert!(!Entregado.can_transition_to(Anulado));
        assert!(!Anulado.can_transition_to(Borrador));
        assert!(Anulado.available_actions().is_empty());
        assert!(Entregado.available_actions().is_empty());
        assert_eq!(
            Borrador.available_actions(),
            vec![AccionEntrega::Confirmar, AccionEntrega::Anular]
        );
        assert_eq!(EstadoEntrega::from_code("ANULADO"), Some(Anulado));
        assert_eq!(EstadoEntrega::from_code("x"), None);
    }

    #[test]
    fn test_totals() {
        let json = r#"{
            "id": 3, "clienteId": 1, "fecha": "2025-09-10", "incluirPrecios": true,
            "estado": "CONFIRMADO",
            "lineas": [
                {"productoId": 1, "cantidad": 6, "precioUnitario": 12.5},
                {"productoId": 2, "cantidad": 12, "precioUnitario": 8.0}
            ]
        }"#;
        let mut entrega: Entrega = serde_json::from_str(json).unwrap();
        assert_eq!(entrega.total_botellas(), 18);
        assert_eq!(entrega.total(), Some(171.0));
        assert_eq!(entrega.display_number(), "#3");
        entrega.incluir_precios = false;
        assert_eq!(entrega.total(), None);
    }

    #[test]
    fn test_form_validation() {
        let mut form = EntregaForm::new(date(2025, 9, 10));
        form.incluir_precios = true;
        form.lineas[0].producto_id = Some(4);
        form.lineas[0].cantidad = "0".into();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("cliente"));
        assert!(errors.get("lineas").unwrap().starts_with("Línea 1"));

        form.cliente_id = Some(8);
        form.lineas[0].cantidad = "12".into();
        let errors = form.validate().unwrap_err();
        assert!(errors.get("lineas").unwrap().contains("precio"));

        form.lineas[0].precio_unitario = "9,50".into();
        let payload = form.validate().unwrap();
        assert_eq!(payload.fecha, date(2025, 9, 10));
        assert_eq!(payload.lineas[0].precio_unitario, Some(9.5));
        assert_eq!(payload.observaciones, None);
    }

    #[test]
    fn test_prices_dropped_when_not_included() {
        let mut form = EntregaForm::new(date(2025, 9, 10));
        form.cliente_id = Some(1);
        form.lineas[0] = LineaForm {
            producto_id: Some(2),
            lote_id: Some(5),
            cantidad: "3".into(),
            precio_unitario: "7".into(),
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.lineas[0].precio_unitario, None);
        assert_eq!(payload.lineas[0].lote_id, Some(5));
    }

    #[test]
    fn test_filter_serialization_skips_empty() {
        let filter = EntregaFilter {
            estado: Some(EstadoEntrega::Borrador),
            ..EntregaFilter::default()
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json, serde_json::json!({"estado": "BORRADOR"}));
    }
}
