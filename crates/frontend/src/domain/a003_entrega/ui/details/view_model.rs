use contracts::domain::a002_cliente::aggregate::{Cliente, TipoCliente};
use contracts::domain::a003_entrega::aggregate::{AccionEntrega, Entrega, EntregaForm, LineaForm};
use contracts::domain::a004_producto::aggregate::Vino;
use contracts::domain::a005_lote::aggregate::Lote;
use contracts::shared::validation::{
    parse_optional_decimal, submit_validated, FieldErrors, SubmitError, GENERAL_VALIDATION_MESSAGE,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_cliente::api as clientes_api;
use crate::domain::a003_entrega::api;
use crate::domain::a004_producto::api as productos_api;
use crate::domain::a005_lote::api as lotes_api;
use crate::domain::a005_lote::ui::list::active_wines;
use crate::shared::api_utils::ApiError;
use crate::shared::date_utils::today;
use crate::system::auth::context::SessionContext;

/// Bottles and amount of the lines being edited. Unparsable lines count as zero.
pub fn draft_totals(lineas: &[LineaForm], incluir_precios: bool) -> (i64, Option<f64>) {
    let mut botellas = 0;
    let mut importe = 0.0;
    for linea in lineas {
        let cantidad = linea.cantidad.trim().parse::<i64>().unwrap_or(0).max(0);
        botellas += cantidad;
        if let Ok(Some(precio)) = parse_optional_decimal(&linea.precio_unitario) {
            importe += precio * cantidad as f64;
        }
    }
    (botellas, incluir_precios.then_some(importe))
}

/// List price of a wine for the client's kind.
pub fn default_price(vino: &Vino, tipo: TipoCliente) -> Option<f64> {
    match tipo {
        TipoCliente::Empresa => vino.precio_profesional.or(vino.precio_particular),
        TipoCliente::Particular => vino.precio_particular.or(vino.precio_profesional),
    }
}

#[derive(Clone, Copy)]
pub struct EntregaDetailsVm {
    pub id: RwSignal<Option<i64>>,
    pub entrega: RwSignal<Option<Entrega>>,

    /// Client id as a select value.
    pub cliente: RwSignal<String>,
    pub fecha: RwSignal<String>,
    pub incluir_precios: RwSignal<bool>,
    pub observaciones: RwSignal<String>,
    pub lineas: RwSignal<Vec<LineaForm>>,

    pub clientes: RwSignal<Vec<Cliente>>,
    pub vinos: RwSignal<Vec<Vino>>,
    pub lotes: RwSignal<Vec<Lote>>,

    pub errors: RwSignal<FieldErrors>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl EntregaDetailsVm {
    pub fn new() -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            entrega: RwSignal::new(None),
            cliente: RwSignal::new(String::new()),
            fecha: RwSignal::new(String::new()),
            incluir_precios: RwSignal::new(false),
            observaciones: RwSignal::new(String::new()),
            lineas: RwSignal::new(Vec::new()),
            clientes: RwSignal::new(Vec::new()),
            vinos: RwSignal::new(Vec::new()),
            lotes: RwSignal::new(Vec::new()),
            errors: RwSignal::new(FieldErrors::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        };
        vm.apply(EntregaForm::new(today()));
        vm
    }

    pub fn form(&self) -> EntregaForm {
        EntregaForm {
            cliente_id: self.cliente.get_untracked().parse().ok(),
            fecha: self.fecha.get_untracked(),
            incluir_precios: self.incluir_precios.get_untracked(),
            observaciones: self.observaciones.get_untracked(),
            lineas: self.lineas.get_untracked(),
        }
    }

    fn apply(&self, form: EntregaForm) {
        self.cliente
            .set(form.cliente_id.map(|id| id.to_string()).unwrap_or_default());
        self.fecha.set(form.fecha);
        self.incluir_precios.set(form.incluir_precios);
        self.observaciones.set(form.observaciones);
        self.lineas.set(form.lineas);
    }

    /// Only drafts (and new deliveries) can be edited.
    pub fn is_editable(&self) -> bool {
        self.id.get().is_none()
            || self.entrega.with(|e| e.as_ref().is_some_and(|e| e.estado.is_editable()))
    }

    pub fn totals(&self) -> (i64, Option<f64>) {
        self.lineas
            .with(|l| draft_totals(l, self.incluir_precios.get()))
    }

    pub fn selected_cliente(&self) -> Option<Cliente> {
        let id = self.cliente.get_untracked().parse::<i64>().ok()?;
        self.clientes
            .with_untracked(|list| list.iter().find(|c| c.id == id).cloned())
    }

    /// Lots of a wine that still have bottles, plus the one already chosen.
    pub fn lotes_for(&self, producto_id: Option<i64>, chosen: Option<i64>) -> Vec<Lote> {
        let Some(producto_id) = producto_id else {
            return Vec::new();
        };
        self.lotes.with(|all| {
            all.iter()
                .filter(|l| l.producto_id == producto_id && (l.has_stock() || Some(l.id) == chosen))
                .cloned()
                .collect()
        })
    }

    pub fn add_linea(&self) {
        self.lineas.update(|l| l.push(LineaForm::default()));
    }

    pub fn remove_linea(&self, index: usize) {
        self.lineas.update(|l| {
            if index < l.len() {
                l.remove(index);
            }
        });
    }

    pub fn update_linea(&self, index: usize, f: impl FnOnce(&mut LineaForm)) {
        self.lineas.update(|l| {
            if let Some(linea) = l.get_mut(index) {
                f(linea);
            }
        });
    }

    /// Changing the wine drops the lot and prefills an empty price.
    pub fn set_producto(&self, index: usize, producto_id: Option<i64>) {
        let tipo = self
            .selected_cliente()
            .map(|c| c.tipo)
            .unwrap_or(TipoCliente::Particular);
        let price = producto_id.and_then(|id| {
            self.vinos.with_untracked(|vinos| {
                vinos.iter().find(|v| v.id == id).and_then(|v| default_price(v, tipo))
            })
        });
        self.update_linea(index, |linea| {
            linea.producto_id = producto_id;
            linea.lote_id = None;
            if linea.precio_unitario.trim().is_empty() {
                if let Some(p) = price {
                    linea.precio_unitario = format!("{:.2}", p);
                }
            }
        });
    }

    /// Clients, wines and lots for the selects.
    pub fn load_catalogs(&self, session: SessionContext) {
        let this = *self;
        spawn_local(async move {
            let (clientes, productos, lotes) = futures::join!(
                session.call(|s| async move { clientes_api::fetch_clientes(&s).await }),
                session.call(|s| async move { productos_api::fetch_productos(&s).await }),
                session.call(|s| async move { lotes_api::fetch_lotes(&s).await }),
            );
            match clientes {
                Ok(list) => this.clientes.set(list.into_iter().filter(|c| c.activo).collect()),
                Err(e) => log::warn!("clientes for entrega: {}", e),
            }
            match productos {
                Ok(list) => this.vinos.set(active_wines(&list)),
                Err(e) => log::warn!("vinos for entrega: {}", e),
            }
            match lotes {
                Ok(list) => this.lotes.set(list),
                Err(e) => log::warn!("lotes for entrega: {}", e),
            }
        });
    }

    pub fn load(&self, session: SessionContext, id: i64) {
        let this = *self;
        this.id.set(Some(id));
        this.loading.set(true);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_entrega(&s, id).await }).await {
                Ok(entrega) => {
                    this.apply(EntregaForm::from_entrega(&entrega));
                    this.entrega.set(Some(entrega));
                }
                Err(e) => {
                    log::error!("entrega {}: {}", id, e);
                    this.error.set(Some(e.user_message("No se pudo cargar la entrega")));
                }
            }
            this.loading.set(false);
        });
    }

    fn fail(&self, err: SubmitError<ApiError>, fallback: &str) {
        match err {
            SubmitError::Invalid(errors) => {
                self.errors.set(errors);
                self.error.set(Some(GENERAL_VALIDATION_MESSAGE.to_string()));
            }
            SubmitError::Rejected(e) => {
                log::warn!("entrega save rejected: {}", e);
                self.error.set(Some(e.user_message(fallback)));
            }
        }
    }

    /// POST a new draft or PUT the whole draft back.
    pub fn save(&self, session: SessionContext, on_saved: Callback<i64>) {
        let this = *self;
        this.error.set(None);
        this.success.set(None);
        this.errors.set(FieldErrors::new());
        let validated = this.form().validate();
        let id = this.id.get_untracked();
        this.saving.set(true);

        spawn_local(async move {
            match id {
                None => {
                    let result = submit_validated(validated, |payload| {
                        session.call(|s| async move { api::create_entrega(&s, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(created) => {
                            log::info!("entrega {} created", created.id);
                            on_saved.run(created.id);
                        }
                        Err(e) => this.fail(e, "No se pudo crear la entrega"),
                    }
                }
                Some(id) => {
                    let result = submit_validated(validated, |payload| {
                        session.call(move |s| async move { api::update_entrega(&s, id, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(()) => {
                            this.success.set(Some("Entrega guardada".to_string()));
                            this.load(session, id);
                        }
                        Err(e) => this.fail(e, "No se pudo guardar la entrega"),
                    }
                }
            }
            this.saving.set(false);
        });
    }

    /// Confirm, deliver or cancel. The backend decides; the page reloads either way.
    pub fn apply_action(&self, session: SessionContext, accion: AccionEntrega) {
        let this = *self;
        let Some(id) = this.id.get_untracked() else {
            return;
        };
        this.error.set(None);
        this.success.set(None);
        this.saving.set(true);
        spawn_local(async move {
            match session.call(|s| async move { api::apply_action(&s, id, accion).await }).await {
                Ok(()) => {
                    log::info!("entrega {} -> {}", id, accion.target().as_code());
                    this.success.set(Some(format!("Entrega {}", accion.target().label().to_lowercase())));
                }
                Err(e) => {
                    log::warn!("entrega {} action rejected: {}", id, e);
                    this.error.set(Some(e.user_message("No se pudo cambiar el estado de la entrega")));
                }
            }
            this.saving.set(false);
            this.load(session, id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linea(cantidad: &str, precio: &str) -> LineaForm {
        LineaForm {
            producto_id: Some(1),
            lote_id: None,
            cantidad: cantidad.into(),
            precio_unitario: precio.into(),
        }
    }

    #[test]
    fn test_draft_totals() {
        let lineas = vec![linea("12", "8,50"), linea("6", ""), linea("abc", "3")];
        assert_eq!(draft_totals(&lineas, true), (18, Some(102.0)));
        assert_eq!(draft_totals(&lineas, false), (18, None));
        assert_eq!(draft_totals(&[], true), (0, Some(0.0)));
    }

    #[test]
    fn test_default_price() {
        let vino = Vino {
            id: 1,
            nombre: "Roble".into(),
            descripcion: None,
            variedad: None,
            anada: None,
            precio_profesional: Some(6.0),
            precio_particular: Some(9.5),
            activo: true,
        };
        assert_eq!(default_price(&vino, TipoCliente::Empresa), Some(6.0));
        assert_eq!(default_price(&vino, TipoCliente::Particular), Some(9.5));

        let sin_particular = Vino {
            precio_particular: None,
            ..vino
        };
        assert_eq!(default_price(&sin_particular, TipoCliente::Particular), Some(6.0));
    }
}
