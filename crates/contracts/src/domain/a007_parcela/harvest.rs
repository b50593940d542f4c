//! Harvest-date estimate display.
//!
//! The estimate itself is computed by the backend; the UI only turns the
//! remaining day count into a readable bucket.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `GET /api/{slug}/parcelas/{id}/estimacion-vendimia`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimacionVendimia {
    #[serde(default)]
    pub fecha_estimada: Option<NaiveDate>,
    #[serde(default)]
    pub dias_restantes: Option<i64>,
    #[serde(default)]
    pub grado_actual: Option<f64>,
    #[serde(default)]
    pub grado_objetivo: Option<f64>,
    /// Backend explanation when no estimate is possible (e.g. no samples yet).
    #[serde(default)]
    pub mensaje: Option<String>,
}

impl EstimacionVendimia {
    pub fn bucket(&self) -> Option<HarvestBucket> {
        self.dias_restantes.map(HarvestBucket::from_days)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestBucket {
    Ready,
    Imminent,
    VeryNear,
    Monitoring,
    Distant,
}

impl HarvestBucket {
    /// ≤0 ready, 1–3 imminent, 4–10 very near, 11–20 monitoring, >20 distant.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 0 => HarvestBucket::Ready,
            1..=3 => HarvestBucket::Imminent,
            4..=10 => HarvestBucket::VeryNear,
            11..=20 => HarvestBucket::Monitoring,
            _ => HarvestBucket::Distant,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HarvestBucket::Ready => "Lista para vendimiar",
            HarvestBucket::Imminent => "Vendimia inminente",
            HarvestBucket::VeryNear => "Muy cerca",
            HarvestBucket::Monitoring => "En seguimiento",
            HarvestBucket::Distant => "Lejana",
        }
    }

    /// Severity colour, hottest when the grapes are ready.
    pub fn color(&self) -> &'static str {
        match self {
            HarvestBucket::Ready => "#c62828",
            HarvestBucket::Imminent => "#ef6c00",
            HarvestBucket::VeryNear => "#f9a825",
            HarvestBucket::Monitoring => "#1565c0",
            HarvestBucket::Distant => "#2e7d32",
        }
    }

    /// "hoy", "en 1 día", "en 12 días", "hace 3 días".
    pub fn describe_days(days: i64) -> String {
        match days {
            0 => "hoy".to_string(),
            1 => "en 1 día".to_string(),
            -1 => "hace 1 día".to_string(),
            d if d > 0 => format!("en {} días", d),
            d => format!("hace {} días", -d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(HarvestBucket::from_days(-5), HarvestBucket::Ready);
        assert_eq!(HarvestBucket::from_days(0), HarvestBucket::Ready);
        assert_eq!(HarvestBucket::from_days(1), HarvestBucket::Imminent);
        assert_eq!(HarvestBucket::from_days(3), HarvestBucket::Imminent);
        assert_eq!(HarvestBucket::from_days(4), HarvestBucket::VeryNear);
        assert_eq!(HarvestBucket::from_days(10), HarvestBucket::VeryNear);
        assert_eq!(HarvestBucket::from_days(11), HarvestBucket::Monitoring);
        assert_eq!(HarvestBucket::from_days(20), HarvestBucket::Monitoring);
        assert_eq!(HarvestBucket::from_days(21), HarvestBucket::Distant);
    }

    #[test]
    fn test_estimate_without_days_has_no_bucket() {
        let est: EstimacionVendimia =
            serde_json::from_str(r#"{"mensaje":"Sin muestreos suficientes"}"#).unwrap();
        assert_eq!(est.bucket(), None);

        let est: EstimacionVendimia =
            serde_json::from_str(r#"{"fechaEstimada":"2025-09-20","diasRestantes":5}"#).unwrap();
        assert_eq!(est.bucket(), Some(HarvestBucket::VeryNear));
    }

    #[test]
    fn test_describe_days() {
        assert_eq!(HarvestBucket::describe_days(0), "hoy");
        assert_eq!(HarvestBucket::describe_days(12), "en 12 días");
        assert_eq!(HarvestBucket::describe_days(-3), "hace 3 días");
    }
}
