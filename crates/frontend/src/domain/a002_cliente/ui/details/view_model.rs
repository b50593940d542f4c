use contracts::domain::a002_cliente::aggregate::{Cliente, ClienteForm, TipoCliente};
use contracts::shared::validation::{submit_validated, FieldErrors, SubmitError, GENERAL_VALIDATION_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_cliente::api;
use crate::shared::api_utils::ApiError;
use crate::system::auth::context::SessionContext;

#[derive(Clone, Copy)]
pub struct ClienteDetailsVm {
    pub id: RwSignal<Option<i64>>,
    pub cliente: RwSignal<Option<Cliente>>,

    /// `TipoCliente` code for the select.
    pub tipo: RwSignal<String>,
    pub nombre: RwSignal<String>,
    pub nif: RwSignal<String>,
    pub email: RwSignal<String>,
    pub telefono: RwSignal<String>,
    pub direccion: RwSignal<String>,
    pub codigo_postal: RwSignal<String>,
    pub ciudad: RwSignal<String>,
    pub provincia: RwSignal<String>,
    pub notas: RwSignal<String>,
    pub activo: RwSignal<bool>,

    pub errors: RwSignal<FieldErrors>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl ClienteDetailsVm {
    pub fn new() -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            cliente: RwSignal::new(None),
            tipo: RwSignal::new(String::new()),
            nombre: RwSignal::new(String::new()),
            nif: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            telefono: RwSignal::new(String::new()),
            direccion: RwSignal::new(String::new()),
            codigo_postal: RwSignal::new(String::new()),
            ciudad: RwSignal::new(String::new()),
            provincia: RwSignal::new(String::new()),
            notas: RwSignal::new(String::new()),
            activo: RwSignal::new(true),
            errors: RwSignal::new(FieldErrors::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        };
        vm.apply(ClienteForm::default());
        vm
    }

    pub fn form(&self) -> ClienteForm {
        ClienteForm {
            tipo: TipoCliente::from_code(&self.tipo.get_untracked()),
            nombre: self.nombre.get_untracked(),
            nif: self.nif.get_untracked(),
            email: self.email.get_untracked(),
            telefono: self.telefono.get_untracked(),
            direccion: self.direccion.get_untracked(),
            codigo_postal: self.codigo_postal.get_untracked(),
            ciudad: self.ciudad.get_untracked(),
            provincia: self.provincia.get_untracked(),
            notas: self.notas.get_untracked(),
            activo: self.activo.get_untracked(),
        }
    }

    fn apply(&self, form: ClienteForm) {
        self.tipo.set(form.tipo.as_code().to_string());
        self.nombre.set(form.nombre);
        self.nif.set(form.nif);
        self.email.set(form.email);
        self.telefono.set(form.telefono);
        self.direccion.set(form.direccion);
        self.codigo_postal.set(form.codigo_postal);
        self.ciudad.set(form.ciudad);
        self.provincia.set(form.provincia);
        self.notas.set(form.notas);
        self.activo.set(form.activo);
    }

    pub fn load(&self, session: SessionContext, id: i64) {
        let this = *self;
        this.id.set(Some(id));
        this.loading.set(true);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_cliente(&s, id).await }).await {
                Ok(cliente) => {
                    this.apply(ClienteForm::from_cliente(&cliente));
                    this.cliente.set(Some(cliente));
                }
                Err(e) => {
                    log::error!("cliente {}: {}", id, e);
                    this.error.set(Some(e.user_message("No se pudo cargar el cliente")));
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
                log::warn!("cliente save rejected: {}", e);
                self.error.set(Some(e.user_message(fallback)));
            }
        }
    }

    /// Validate, then POST (new) or PATCH (existing). Nothing is sent when
    /// validation fails.
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
                        session.call(|s| async move { api::create_cliente(&s, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(created) => {
                            log::info!("cliente {} created", created.id);
                            on_saved.run(created.id);
                        }
                        Err(e) => this.fail(e, "No se pudo crear el cliente"),
                    }
                }
                Some(id) => {
                    let result = submit_validated(validated, |payload| {
                        session.call(move |s| async move { api::update_cliente(&s, id, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(()) => {
                            this.success.set(Some("Cliente guardado".to_string()));
                            on_saved.run(id);
                        }
                        Err(e) => this.fail(e, "No se pudo guardar el cliente"),
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
                    this.cliente.update(|c| {
                        if let Some(c) = c {
                            c.activo = activo;
                        }
                    });
                    this.success.set(Some(
                        if activo { "Cliente reactivado" } else { "Cliente dado de baja" }.to_string(),
                    ));
                }
                Err(e) => this.error.set(Some(e.user_message("No se pudo cambiar el estado"))),
            }
        });
    }

    pub fn delete(&self, session: SessionContext, on_deleted: Callback<()>) {
        let this = *self;
        let Some(id) = this.id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match session.call(|s| async move { api::delete_cliente(&s, id).await }).await {
                Ok(()) => on_deleted.run(()),
                Err(e) => this.error.set(Some(e.user_message(
                    "No se pudo eliminar el cliente. Si tiene entregas, dalo de baja.",
                ))),
            }
        });
    }
}
