use contracts::domain::a001_bodega::aggregate::{Bodega, BodegaForm};
use contracts::shared::validation::{FieldErrors, GENERAL_VALIDATION_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_bodega::api;
use crate::system::auth::context::SessionContext;

#[derive(Clone, Copy)]
pub struct BodegaDetailsVm {
    pub bodega: RwSignal<Option<Bodega>>,

    pub nombre: RwSignal<String>,
    pub cif: RwSignal<String>,
    pub direccion: RwSignal<String>,
    pub codigo_postal: RwSignal<String>,
    pub ciudad: RwSignal<String>,
    pub provincia: RwSignal<String>,
    pub pais: RwSignal<String>,
    pub telefono: RwSignal<String>,
    pub email: RwSignal<String>,

    pub errors: RwSignal<FieldErrors>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl BodegaDetailsVm {
    pub fn new() -> Self {
        Self {
            bodega: RwSignal::new(None),
            nombre: RwSignal::new(String::new()),
            cif: RwSignal::new(String::new()),
            direccion: RwSignal::new(String::new()),
            codigo_postal: RwSignal::new(String::new()),
            ciudad: RwSignal::new(String::new()),
            provincia: RwSignal::new(String::new()),
            pais: RwSignal::new(String::new()),
            telefono: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        }
    }

    pub fn form(&self) -> BodegaForm {
        BodegaForm {
            nombre: self.nombre.get_untracked(),
            cif: self.cif.get_untracked(),
            direccion: self.direccion.get_untracked(),
            codigo_postal: self.codigo_postal.get_untracked(),
            ciudad: self.ciudad.get_untracked(),
            provincia: self.provincia.get_untracked(),
            pais: self.pais.get_untracked(),
            telefono: self.telefono.get_untracked(),
            email: self.email.get_untracked(),
        }
    }

    fn apply(&self, form: BodegaForm) {
        self.nombre.set(form.nombre);
        self.cif.set(form.cif);
        self.direccion.set(form.direccion);
        self.codigo_postal.set(form.codigo_postal);
        self.ciudad.set(form.ciudad);
        self.provincia.set(form.provincia);
        self.pais.set(form.pais);
        self.telefono.set(form.telefono);
        self.email.set(form.email);
    }

    pub fn load(&self, session: SessionContext) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_bodega(&s).await }).await {
                Ok(bodega) => {
                    this.apply(BodegaForm::from_bodega(&bodega));
                    this.bodega.set(Some(bodega));
                }
                Err(e) => {
                    log::error!("bodega: {}", e);
                    this.error.set(Some(e.user_message("No se pudo cargar la bodega")));
                }
            }
            this.loading.set(false);
        });
    }

    /// PATCH the profile and mirror the new name into the stored user.
    pub fn save(&self, session: SessionContext) {
        let this = *self;
        this.success.set(None);
        let dto = match this.form().validate() {
            Ok(dto) => dto,
            Err(errors) => {
                this.errors.set(errors);
                this.error.set(Some(GENERAL_VALIDATION_MESSAGE.to_string()));
                return;
            }
        };
        this.errors.set(FieldErrors::new());
        this.error.set(None);
        this.saving.set(true);
        spawn_local(async move {
            let body = dto.clone();
            let result = session
                .call(|s| async move { api::update_bodega(&s, &body).await })
                .await;
            this.saving.set(false);
            match result {
                Ok(()) => {
                    session.update_user(|u| u.set_tenant_name(&dto.nombre));
                    this.bodega.update(|b| {
                        if let Some(b) = b {
                            b.nombre = dto.nombre.clone();
                        }
                    });
                    this.success.set(Some("Datos de la bodega guardados".to_string()));
                }
                Err(e) => this.error.set(Some(e.user_message("No se pudieron guardar los datos"))),
            }
        });
    }
}
