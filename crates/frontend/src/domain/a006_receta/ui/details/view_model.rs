use contracts::domain::a004_producto::aggregate::{Material, Producto, Vino};
use contracts::domain::a006_receta::aggregate::{
    validate_receta, LineaReceta, LineaRecetaForm, RecetaEmbotellado,
};
use contracts::shared::validation::{parse_optional_decimal, submit_validated, FieldErrors, SubmitError, GENERAL_VALIDATION_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a004_producto::api as productos_api;
use crate::domain::a006_receta::api;
use crate::system::auth::context::SessionContext;

/// One row of the "what would a run of N bottles need" table.
#[derive(Debug, Clone, PartialEq)]
pub struct Necesidad {
    pub material_id: i64,
    pub nombre: String,
    pub necesario: f64,
    pub stock: Option<i64>,
}

impl Necesidad {
    pub fn falta(&self) -> bool {
        self.stock.is_some_and(|s| (s as f64) < self.necesario)
    }
}

/// Material needs of a bottling run checked against current stock.
pub fn necesidades(receta: &RecetaEmbotellado, botellas: i64, materiales: &[Material]) -> Vec<Necesidad> {
    receta
        .requirements(botellas)
        .into_iter()
        .map(|(material_id, necesario)| {
            let material = materiales.iter().find(|m| m.id == material_id);
            let nombre = material
                .map(|m| m.nombre.clone())
                .or_else(|| {
                    receta
                        .lineas
                        .iter()
                        .find(|l| l.material_id == material_id)
                        .and_then(|l| l.material_nombre.clone())
                })
                .unwrap_or_else(|| format!("Material {}", material_id));
            Necesidad {
                material_id,
                nombre,
                necesario,
                stock: material.map(|m| m.stock_unidades),
            }
        })
        .collect()
}

#[derive(Clone, Copy)]
pub struct RecetaVm {
    pub producto: RwSignal<String>,
    pub receta: RwSignal<Option<RecetaEmbotellado>>,
    pub lineas: RwSignal<Vec<LineaRecetaForm>>,

    pub vinos: RwSignal<Vec<Vino>>,
    pub materiales: RwSignal<Vec<Material>>,

    pub errors: RwSignal<FieldErrors>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl RecetaVm {
    pub fn new() -> Self {
        Self {
            producto: RwSignal::new(String::new()),
            receta: RwSignal::new(None),
            lineas: RwSignal::new(Vec::new()),
            vinos: RwSignal::new(Vec::new()),
            materiales: RwSignal::new(Vec::new()),
            errors: RwSignal::new(FieldErrors::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        }
    }

    pub fn producto_id(&self) -> Option<i64> {
        self.producto.get().parse().ok()
    }

    pub fn load_catalogs(&self, session: SessionContext) {
        let this = *self;
        spawn_local(async move {
            match session.call(|s| async move { productos_api::fetch_productos(&s).await }).await {
                Ok(list) => {
                    let mut vinos: Vec<Vino> = list.iter().filter_map(Producto::as_vino).cloned().collect();
                    vinos.sort_by(|a, b| a.nombre.cmp(&b.nombre));
                    let mut materiales: Vec<Material> = list
                        .iter()
                        .filter_map(Producto::as_material)
                        .filter(|m| m.activo)
                        .cloned()
                        .collect();
                    materiales.sort_by(|a, b| a.nombre.cmp(&b.nombre));
                    this.vinos.set(vinos);
                    this.materiales.set(materiales);
                }
                Err(e) => {
                    log::error!("productos for receta: {}", e);
                    this.error.set(Some(e.user_message("No se pudieron cargar los productos")));
                }
            }
        });
    }

    pub fn load(&self, session: SessionContext, producto_id: i64) {
        let this = *self;
        this.loading.set(true);
        this.errors.set(FieldErrors::new());
        this.success.set(None);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_receta(&s, producto_id).await }).await {
                Ok(receta) => {
                    this.lineas
                        .set(receta.lineas.iter().map(LineaRecetaForm::from_linea).collect());
                    this.receta.set(Some(receta));
                }
                Err(e) => {
                    log::error!("receta of {}: {}", producto_id, e);
                    this.error.set(Some(e.user_message("No se pudo cargar la receta")));
                }
            }
            this.loading.set(false);
        });
    }

    /// Recipe as it stands in the editor, for the needs table.
    pub fn current(&self) -> RecetaEmbotellado {
        let lineas = self.lineas.with(|rows| {
            rows.iter()
                .filter_map(|r| {
                    let material_id = r.material_id?;
                    let cantidad = parse_optional_decimal(&r.cantidad_por_botella).ok().flatten()?;
                    Some(LineaReceta {
                        material_id,
                        material_nombre: None,
                        cantidad_por_botella: cantidad,
                    })
                })
                .collect()
        });
        RecetaEmbotellado {
            producto_id: self.producto_id(),
            lineas,
        }
    }

    pub fn add_linea(&self) {
        self.lineas.update(|l| l.push(LineaRecetaForm::default()));
    }

    pub fn remove_linea(&self, index: usize) {
        self.lineas.update(|l| {
            if index < l.len() {
                l.remove(index);
            }
        });
    }

    pub fn update_linea(&self, index: usize, f: impl FnOnce(&mut LineaRecetaForm)) {
        self.lineas.update(|l| {
            if let Some(linea) = l.get_mut(index) {
                f(linea);
            }
        });
    }

    /// Replace the whole recipe.
    pub fn save(&self, session: SessionContext) {
        let this = *self;
        let Some(producto_id) = this.producto.get_untracked().parse::<i64>().ok() else {
            return;
        };
        this.error.set(None);
        this.success.set(None);
        this.errors.set(FieldErrors::new());
        let validated = this.lineas.with_untracked(|l| validate_receta(l));
        this.saving.set(true);
        spawn_local(async move {
            let result = submit_validated(validated, |payload| {
                session.call(move |s| async move { api::save_receta(&s, producto_id, &payload).await })
            })
            .await;
            match result {
                Ok(()) => {
                    log::info!("receta of {} saved", producto_id);
                    this.success.set(Some("Receta guardada".to_string()));
                }
                Err(SubmitError::Invalid(errors)) => {
                    this.errors.set(errors);
                    this.error.set(Some(GENERAL_VALIDATION_MESSAGE.to_string()));
                }
                Err(SubmitError::Rejected(e)) => {
                    log::warn!("receta rejected: {}", e);
                    this.error.set(Some(e.user_message("No se pudo guardar la receta")));
                }
            }
            this.saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_producto::aggregate::FamiliaMaterial;

    #[test]
    fn test_necesidades_against_stock() {
        let receta = RecetaEmbotellado {
            producto_id: Some(1),
            lineas: vec![
                LineaReceta { material_id: 10, material_nombre: None, cantidad_por_botella: 1.0 },
                LineaReceta { material_id: 99, material_nombre: Some("Sello".into()), cantidad_por_botella: 2.0 },
            ],
        };
        let materiales = vec![Material {
            id: 10,
            nombre: "Corcho".into(),
            descripcion: None,
            familia: FamiliaMaterial::Corcho,
            stock_unidades: 500,
            stock_minimo_unidades: 100,
            activo: true,
        }];
        let rows = necesidades(&receta, 600, &materiales);
        assert_eq!(rows[0].nombre, "Corcho");
        assert!(rows[0].falta());
        assert_eq!(rows[1].nombre, "Sello");
        assert_eq!(rows[1].necesario, 1200.0);
        assert!(!rows[1].falta());
    }
}
