use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::shared::validation::{non_empty, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoEvento {
    Cata,
    Feria,
    Visita,
    #[default]
    #[serde(other)]
    Otro,
}

impl TipoEvento {
    pub const ALL: [TipoEvento; 4] = [
        TipoEvento::Cata,
        TipoEvento::Feria,
        TipoEvento::Visita,
        TipoEvento::Otro,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            TipoEvento::Cata => "CATA",
            TipoEvento::Feria => "FERIA",
            TipoEvento::Visita => "VISITA",
            TipoEvento::Otro => "OTRO",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_code() == code)
            .unwrap_or_default()
    }

    /// Chip colour in the calendar.
    pub fn color(&self) -> &'static str {
        match self {
            TipoEvento::Cata => "#8e24aa",
            TipoEvento::Feria => "#1e88e5",
            TipoEvento::Visita => "#43a047",
            TipoEvento::Otro => "#757575",
        }
    }
}

/// Calendar entry, `/api/{slug}/eventos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evento {
    pub id: i64,
    pub titulo: String,
    #[serde(default)]
    pub tipo: TipoEvento,
    pub fecha_hora: NaiveDateTime,
    #[serde(default)]
    pub ubicacion: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
}

impl Evento {
    pub fn fecha(&self) -> NaiveDate {
        self.fecha_hora.date()
    }

    pub fn hora(&self) -> String {
        self.fecha_hora.format("%H:%M").to_string()
    }
}

/// Events on or after `from`, soonest first, at most `limit`.
pub fn upcoming(eventos: &[Evento], from: NaiveDateTime, limit: usize) -> Vec<Evento> {
    let mut next: Vec<Evento> = eventos
        .iter()
        .filter(|e| e.fecha_hora >= from)
        .cloned()
        .collect();
    next.sort_by_key(|e| e.fecha_hora);
    next.truncate(limit);
    next
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventoPayload {
    pub titulo: String,
    pub tipo: TipoEvento,
    pub fecha_hora: NaiveDateTime,
    pub ubicacion: Option<String>,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventoForm {
    pub titulo: String,
    pub tipo: TipoEvento,
    /// `yyyy-mm-dd` from a date input.
    pub fecha: String,
    /// `HH:MM` from a time input; blank means 00:00.
    pub hora: String,
    pub ubicacion: String,
    pub descripcion: String,
}

impl EventoForm {
    pub fn new(fecha: NaiveDate) -> Self {
        Self {
            fecha: fecha.format("%Y-%m-%d").to_string(),
            hora: "10:00".to_string(),
            ..Self::default()
        }
    }

    pub fn from_evento(e: &Evento) -> Self {
        Self {
            titulo: e.titulo.clone(),
            tipo: e.tipo,
            fecha: e.fecha().format("%Y-%m-%d").to_string(),
            hora: e.hora(),
            ubicacion: e.ubicacion.clone().unwrap_or_default(),
            descripcion: e.descripcion.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<EventoPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let titulo = self.titulo.trim();
        if titulo.chars().count() < 3 || titulo.chars().count() > 150 {
            errors.add("titulo", "El título debe tener entre 3 y 150 caracteres");
        }
        let fecha = NaiveDate::parse_from_str(self.fecha.trim(), "%Y-%m-%d").ok();
        if fecha.is_none() {
            errors.add("fecha", "Fecha no válida");
        }
        let hora = match self.hora.trim() {
            "" => Some(NaiveTime::MIN),
            h => NaiveTime::parse_from_str(h, "%H:%M").ok(),
        };
        if hora.is_none() {
            errors.add("hora", "Hora no válida (HH:MM)");
        }

        match (fecha, hora) {
            (Some(f), Some(h)) if errors.is_empty() => Ok(EventoPayload {
                titulo: titulo.to_string(),
                tipo: self.tipo,
                fecha_hora: f.and_time(h),
                ubicacion: non_empty(&self.ubicacion),
                descripcion: non_empty(&self.descripcion),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evento(id: i64, fecha_hora: &str) -> Evento {
        Evento {
            id,
            titulo: format!("Evento {}", id),
            tipo: TipoEvento::Cata,
            fecha_hora: NaiveDateTime::parse_from_str(fecha_hora, "%Y-%m-%dT%H:%M:%S").unwrap(),
            ubicacion: None,
            descripcion: None,
        }
    }

    #[test]
    fn test_deserialize_unknown_type_as_otro() {
        let json = r#"{"id":7,"titulo":"Concurso","tipo":"CONCURSO","fechaHora":"2025-10-04T18:30:00"}"#;
        let e: Evento = serde_json::from_str(json).unwrap();
        assert_eq!(e.tipo, TipoEvento::Otro);
        assert_eq!(e.fecha(), NaiveDate::from_ymd_opt(2025, 10, 4).unwrap());
        assert_eq!(e.hora(), "18:30");
    }

    #[test]
    fn test_form_validation() {
        let form = EventoForm {
            titulo: "  ".into(),
            fecha: "2025-13-01".into(),
            hora: "25:00".into(),
            ..EventoForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.contains("titulo"));
        assert!(errors.contains("fecha"));
        assert!(errors.contains("hora"));

        let form = EventoForm {
            titulo: " Cata vertical ".into(),
            tipo: TipoEvento::Cata,
            fecha: "2025-10-04".into(),
            hora: "".into(),
            ubicacion: "Sala de barricas".into(),
            descripcion: " ".into(),
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.titulo, "Cata vertical");
        assert_eq!(payload.fecha_hora.format("%H:%M").to_string(), "00:00");
        assert_eq!(payload.descripcion, None);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["tipo"], "CATA");
        assert_eq!(json["fechaHora"], "2025-10-04T00:00:00");
    }

    #[test]
    fn test_upcoming_sorted_and_limited() {
        let all = vec![
            evento(1, "2025-10-20T10:00:00"),
            evento(2, "2025-09-01T10:00:00"),
            evento(3, "2025-10-05T10:00:00"),
            evento(4, "2025-11-01T10:00:00"),
        ];
        let from = NaiveDateTime::parse_from_str("2025-09-15T00:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();
        let ids: Vec<i64> = upcoming(&all, from, 2).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
