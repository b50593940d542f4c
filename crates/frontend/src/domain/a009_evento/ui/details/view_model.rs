use chrono::NaiveDate;
use contracts::domain::a009_evento::aggregate::{Evento, EventoForm, TipoEvento};
use contracts::shared::validation::{submit_validated, FieldErrors, SubmitError, GENERAL_VALIDATION_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a009_evento::api;
use crate::shared::api_utils::ApiError;
use crate::system::auth::context::SessionContext;

#[derive(Clone, Copy)]
pub struct EventoDetailsVm {
    pub id: RwSignal<Option<i64>>,
    pub evento: RwSignal<Option<Evento>>,

    pub titulo: RwSignal<String>,
    /// `TipoEvento` code.
    pub tipo: RwSignal<String>,
    pub fecha: RwSignal<String>,
    pub hora: RwSignal<String>,
    pub ubicacion: RwSignal<String>,
    pub descripcion: RwSignal<String>,

    pub errors: RwSignal<FieldErrors>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl EventoDetailsVm {
    pub fn new(fecha: NaiveDate) -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            evento: RwSignal::new(None),
            titulo: RwSignal::new(String::new()),
            tipo: RwSignal::new(String::new()),
            fecha: RwSignal::new(String::new()),
            hora: RwSignal::new(String::new()),
            ubicacion: RwSignal::new(String::new()),
            descripcion: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        };
        vm.apply(EventoForm::new(fecha));
        vm
    }

    pub fn form(&self) -> EventoForm {
        EventoForm {
            titulo: self.titulo.get_untracked(),
            tipo: TipoEvento::from_code(&self.tipo.get_untracked()),
            fecha: self.fecha.get_untracked(),
            hora: self.hora.get_untracked(),
            ubicacion: self.ubicacion.get_untracked(),
            descripcion: self.descripcion.get_untracked(),
        }
    }

    fn apply(&self, form: EventoForm) {
        self.titulo.set(form.titulo);
        self.tipo.set(form.tipo.as_code().to_string());
        self.fecha.set(form.fecha);
        self.hora.set(form.hora);
        self.ubicacion.set(form.ubicacion);
        self.descripcion.set(form.descripcion);
    }

    pub fn load(&self, session: SessionContext, id: i64) {
        let this = *self;
        this.id.set(Some(id));
        this.loading.set(true);
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_evento(&s, id).await }).await {
                Ok(evento) => {
                    this.apply(EventoForm::from_evento(&evento));
                    this.evento.set(Some(evento));
                }
                Err(e) => {
                    log::error!("evento {}: {}", id, e);
                    this.error.set(Some(e.user_message("No se pudo cargar el evento")));
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
                log::warn!("evento save rejected: {}", e);
                self.error.set(Some(e.user_message(fallback)));
            }
        }
    }

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
                        session.call(|s| async move { api::create_evento(&s, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(created) => on_saved.run(created.id),
                        Err(e) => this.fail(e, "No se pudo crear el evento"),
                    }
                }
                Some(id) => {
                    let result = submit_validated(validated, |payload| {
                        session.call(move |s| async move { api::update_evento(&s, id, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(()) => {
                            this.success.set(Some("Evento guardado".to_string()));
                            on_saved.run(id);
                        }
                        Err(e) => this.fail(e, "No se pudo guardar el evento"),
                    }
                }
            }
            this.saving.set(false);
        });
    }

    pub fn delete(&self, session: SessionContext, on_deleted: Callback<()>) {
        let this = *self;
        let Some(id) = this.id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match session.call(|s| async move { api::delete_evento(&s, id).await }).await {
                Ok(()) => on_deleted.run(()),
                Err(e) => this.error.set(Some(e.user_message("No se pudo eliminar el evento"))),
            }
        });
    }
}
