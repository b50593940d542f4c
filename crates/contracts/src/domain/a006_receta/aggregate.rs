use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::shared::validation::{parse_optional_decimal, FieldErrors};

/// One bill-of-materials line: how much of a material one bottle consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineaReceta {
    pub material_id: i64,
    #[serde(default)]
    pub material_nombre: Option<String>,
    pub cantidad_por_botella: f64,
}

/// Bottling recipe of a wine, `/api/{slug}/productos/{id}/receta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecetaEmbotellado {
    #[serde(default)]
    pub producto_id: Option<i64>,
    #[serde(default)]
    pub lineas: Vec<LineaReceta>,
}

impl RecetaEmbotellado {
    /// Units of each material needed to bottle `botellas` bottles.
    pub fn requirements(&self, botellas: i64) -> Vec<(i64, f64)> {
        self.lineas
            .iter()
            .map(|l| (l.material_id, l.cantidad_por_botella * botellas as f64))
            .collect()
    }
}

/// PUT body: the recipe is replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecetaPayload {
    pub lineas: Vec<LineaRecetaPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineaRecetaPayload {
    pub material_id: i64,
    pub cantidad_por_botella: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineaRecetaForm {
    pub material_id: Option<i64>,
    pub cantidad_por_botella: String,
}

impl LineaRecetaForm {
    pub fn from_linea(l: &LineaReceta) -> Self {
        Self {
            material_id: Some(l.material_id),
            cantidad_por_botella: l.cantidad_por_botella.to_string(),
        }
    }
}

/// Validate the editor rows. An empty recipe is allowed (clears it).
pub fn validate_receta(lineas: &[LineaRecetaForm]) -> Result<RecetaPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut seen: HashSet<i64> = HashSet::new();
    let mut payload = Vec::with_capacity(lineas.len());

    for (i, linea) in lineas.iter().enumerate() {
        let n = i + 1;
        let Some(material_id) = linea.material_id else {
            errors.add("lineas", format!("Línea {}: selecciona un material", n));
            continue;
        };
        if !seen.insert(material_id) {
            errors.add("lineas", format!("Línea {}: material repetido", n));
            continue;
        }
        match parse_optional_decimal(&linea.cantidad_por_botella) {
            Ok(Some(q)) if q > 0.0 => payload.push(LineaRecetaPayload {
                material_id,
                cantidad_por_botella: q,
            }),
            _ => errors.add("lineas", format!("Línea {}: cantidad por botella mayor que 0", n)),
        }
    }

    errors.into_result(RecetaPayload { lineas: payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linea(material: Option<i64>, cantidad: &str) -> LineaRecetaForm {
        LineaRecetaForm {
            material_id: material,
            cantidad_por_botella: cantidad.to_string(),
        }
    }

    #[test]
    fn test_duplicate_material_rejected() {
        let rows = vec![linea(Some(1), "1"), linea(Some(1), "2")];
        let errors = validate_receta(&rows).unwrap_err();
        assert!(errors.get("lineas").unwrap().contains("repetido"));
    }

    #[test]
    fn test_quantity_must_be_positive() {
        assert!(validate_receta(&[linea(Some(1), "0")]).is_err());
        assert!(validate_receta(&[linea(None, "1")]).is_err());
        let payload = validate_receta(&[linea(Some(1), "1"), linea(Some(2), "0,5")]).unwrap();
        assert_eq!(payload.lineas[1].cantidad_por_botella, 0.5);
        assert!(validate_receta(&[]).unwrap().lineas.is_empty());
    }

    #[test]
    fn test_requirements() {
        let receta = RecetaEmbotellado {
            producto_id: Some(1),
            lineas: vec![
                LineaReceta {
                    material_id: 10,
                    material_nombre: None,
                    cantidad_por_botella: 1.0,
                },
                LineaReceta {
                    material_id: 11,
                    material_nombre: None,
                    cantidad_por_botella: 1.0 / 6.0,
                },
            ],
        };
        let needed = receta.requirements(600);
        assert_eq!(needed[0], (10, 600.0));
        assert!((needed[1].1 - 100.0).abs() < 1e-9);
    }
}
