use contracts::domain::a004_producto::aggregate::{
    FamiliaMaterial, Producto, ProductoForm, TipoProducto,
};
use contracts::shared::validation::{submit_validated, FieldErrors, SubmitError, GENERAL_VALIDATION_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a004_producto::api;
use crate::shared::api_utils::ApiError;
use crate::system::auth::context::SessionContext;

#[derive(Clone, Copy)]
pub struct ProductoDetailsVm {
    pub id: RwSignal<Option<i64>>,
    pub producto: RwSignal<Option<Producto>>,

    /// `TipoProducto` code; fixed once the product exists.
    pub tipo: RwSignal<String>,
    pub nombre: RwSignal<String>,
    pub descripcion: RwSignal<String>,
    pub variedad: RwSignal<String>,
    pub anada: RwSignal<String>,
    pub precio_profesional: RwSignal<String>,
    pub precio_particular: RwSignal<String>,
    /// `FamiliaMaterial` code.
    pub familia: RwSignal<String>,
    pub stock_unidades: RwSignal<String>,
    pub stock_minimo_unidades: RwSignal<String>,
    pub activo: RwSignal<bool>,

    pub errors: RwSignal<FieldErrors>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl ProductoDetailsVm {
    pub fn new(tipo: TipoProducto) -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            producto: RwSignal::new(None),
            tipo: RwSignal::new(String::new()),
            nombre: RwSignal::new(String::new()),
            descripcion: RwSignal::new(String::new()),
            variedad: RwSignal::new(String::new()),
            anada: RwSignal::new(String::new()),
            precio_profesional: RwSignal::new(String::new()),
            precio_particular: RwSignal::new(String::new()),
            familia: RwSignal::new(String::new()),
            stock_unidades: RwSignal::new(String::new()),
            stock_minimo_unidades: RwSignal::new(String::new()),
            activo: RwSignal::new(true),
            errors: RwSignal::new(FieldErrors::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        };
        vm.apply(ProductoForm {
            tipo,
            ..ProductoForm::default()
        });
        vm
    }

    pub fn tipo(&self) -> TipoProducto {
        TipoProducto::from_code(&self.tipo.get()).unwrap_or_default()
    }

    pub fn form(&self) -> ProductoForm {
        ProductoForm {
            tipo: TipoProducto::from_code(&self.tipo.get_untracked()).unwrap_or_default(),
            nombre: self.nombre.get_untracked(),
            descripcion: self.descripcion.get_untracked(),
            variedad: self.variedad.get_untracked(),
            anada: self.anada.get_untracked(),
            precio_profesional: self.precio_profesional.get_untracked(),
            precio_particular: self.precio_particular.get_untracked(),
            familia: FamiliaMaterial::from_code(&self.familia.get_untracked()),
            stock_unidades: self.stock_unidades.get_untracked(),
            stock_minimo_unidades: self.stock_minimo_unidades.get_untracked(),
            activo: self.activo.get_untracked(),
        }
    }

    fn apply(&self, form: ProductoForm) {
        self.tipo.set(form.tipo.as_code().to_string());
        self.nombre.set(form.nombre);
        self.descripcion.set(form.descripcion);
        self.variedad.set(form.variedad);
        self.anada.set(form.anada);
        self.precio_profesional.set(form.precio_profesional);
        self.precio_particular.set(form.precio_particular);
        self.familia.set(form.familia.as_code().to_string());
        self.stock_unidades.set(form.stock_unidades);
        self.stock_minimo_unidades.set(form.stock_minimo_unidades);
        self.activo.set(form.activo);
    }

    pub fn load(&self, session: SessionContext, id: i64) {
        let this = *self;
        this.id.set(Some(id));
        this.loading.set(true);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_producto(&s, id).await }).await {
                Ok(producto) => {
                    this.apply(ProductoForm::from_producto(&producto));
                    this.producto.set(Some(producto));
                }
                Err(e) => {
                    log::error!("producto {}: {}", id, e);
                    this.error.set(Some(e.user_message("No se pudo cargar el producto")));
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
                log::warn!("producto save rejected: {}", e);
                self.error.set(Some(e.user_message(fallback)));
            }
        }
    }

    /// POST for new products, PUT of the whole variant otherwise.
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
                        session.call(|s| async move { api::create_producto(&s, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(created) => {
                            log::info!("producto {} created", created.id());
                            on_saved.run(created.id());
                        }
                        Err(e) => this.fail(e, "No se pudo crear el producto"),
                    }
                }
                Some(id) => {
                    let result = submit_validated(validated, |payload| {
                        session.call(move |s| async move { api::update_producto(&s, id, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(()) => {
                            this.success.set(Some("Producto guardado".to_string()));
                            on_saved.run(id);
                        }
                        Err(e) => this.fail(e, "No se pudo guardar el producto"),
                    }
                }
            }
            this.saving.set(false);
        });
    }

    pub fn set_activo(&self, session: SessionContext, activo: bool) {
        let this = *self;
        let Some(id) = this.id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match session.call(|s| async move { api::set_activo(&s, id, activo).await }).await {
                Ok(()) => {
                    this.activo.set(activo);
                    this.success.set(Some(
                        if activo { "Producto reactivado" } else { "Producto desactivado" }.to_string(),
                    ));
                }
                Err(e) => this.error.set(Some(e.user_message("No se pudo cambiar el estado"))),
            }
        });
    }
}
