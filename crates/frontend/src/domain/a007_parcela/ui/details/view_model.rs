use chrono::Datelike;
use contracts::domain::a007_parcela::aggregate::{Parcela, ParcelaForm};
use contracts::domain::a007_parcela::harvest::EstimacionVendimia;
use contracts::shared::validation::{submit_validated, FieldErrors, SubmitError, GENERAL_VALIDATION_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a007_parcela::api;
use crate::shared::api_utils::ApiError;
use crate::shared::date_utils::today;
use crate::system::auth::context::SessionContext;

#[derive(Clone, Copy)]
pub struct ParcelaDetailsVm {
    pub id: RwSignal<Option<i64>>,
    pub parcela: RwSignal<Option<Parcela>>,
    pub estimacion: RwSignal<Option<EstimacionVendimia>>,

    pub nombre: RwSignal<String>,
    pub superficie_ha: RwSignal<String>,
    pub altitud_m: RwSignal<String>,
    pub variedad: RwSignal<String>,
    pub municipio: RwSignal<String>,
    pub ano_plantacion: RwSignal<String>,
    pub notas: RwSignal<String>,

    pub errors: RwSignal<FieldErrors>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl ParcelaDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            parcela: RwSignal::new(None),
            estimacion: RwSignal::new(None),
            nombre: RwSignal::new(String::new()),
            superficie_ha: RwSignal::new(String::new()),
            altitud_m: RwSignal::new(String::new()),
            variedad: RwSignal::new(String::new()),
            municipio: RwSignal::new(String::new()),
            ano_plantacion: RwSignal::new(String::new()),
            notas: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        }
    }

    pub fn form(&self) -> ParcelaForm {
        ParcelaForm {
            nombre: self.nombre.get_untracked(),
            superficie_ha: self.superficie_ha.get_untracked(),
            altitud_m: self.altitud_m.get_untracked(),
            variedad: self.variedad.get_untracked(),
            municipio: self.municipio.get_untracked(),
            ano_plantacion: self.ano_plantacion.get_untracked(),
            notas: self.notas.get_untracked(),
        }
    }

    fn apply(&self, form: ParcelaForm) {
        self.nombre.set(form.nombre);
        self.superficie_ha.set(form.superficie_ha);
        self.altitud_m.set(form.altitud_m);
        self.variedad.set(form.variedad);
        self.municipio.set(form.municipio);
        self.ano_plantacion.set(form.ano_plantacion);
        self.notas.set(form.notas);
    }

    /// Plot and harvest estimate together; a missing estimate is not an error.
    pub fn load(&self, session: SessionContext, id: i64) {
        let this = *self;
        this.id.set(Some(id));
        this.loading.set(true);
        spawn_local(async move {
            let (parcela, estimacion) = futures::join!(
                session.call(|s| async move { api::fetch_parcela(&s, id).await }),
                session.call(|s| async move { api::fetch_estimacion(&s, id).await }),
            );
            match parcela {
                Ok(parcela) => {
                    this.apply(ParcelaForm::from_parcela(&parcela));
                    this.parcela.set(Some(parcela));
                }
                Err(e) => {
                    log::error!("parcela {}: {}", id, e);
                    this.error.set(Some(e.user_message("No se pudo cargar la parcela")));
                }
            }
            match estimacion {
                Ok(est) => this.estimacion.set(Some(est)),
                Err(e) => log::warn!("estimacion of parcela {}: {}", id, e),
            }
            this.loading.set(false);
        });
    }

    pub fn refresh_estimacion(&self, session: SessionContext) {
        let this = *self;
        let Some(id) = this.id.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match session.call(|s| async move { api::fetch_estimacion(&s, id).await }).await {
                Ok(est) => this.estimacion.set(Some(est)),
                Err(e) => log::warn!("estimacion of parcela {}: {}", id, e),
            }
        });
    }

    fn fail(&self, err: SubmitError<ApiError>, fallback: &str) {
        match err {
            SubmitError::Invalid(errors) => {
                self.errors.set(errors);
                self.error.set(Some(GENERAL_VALIDATION_MESSAGE.to_string()));
            }
            SubmitError::Rejected(e) => {
                log::warn!("parcela save rejected: {}", e);
                self.error.set(Some(e.user_message(fallback)));
            }
        }
    }

    pub fn save(&self, session: SessionContext, on_saved: Callback<i64>) {
        let this = *self;
        this.error.set(None);
        this.success.set(None);
        this.errors.set(FieldErrors::new());
        let validated = this.form().validate(today().year());
        let id = this.id.get_untracked();
        this.saving.set(true);

        spawn_local(async move {
            match id {
                None => {
                    let result = submit_validated(validated, |payload| {
                        session.call(|s| async move { api::create_parcela(&s, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(created) => {
                            log::info!("parcela {} created", created.id);
                            on_saved.run(created.id);
                        }
                        Err(e) => this.fail(e, "No se pudo crear la parcela"),
                    }
                }
                Some(id) => {
                    let result = submit_validated(validated, |payload| {
                        session.call(move |s| async move { api::update_parcela(&s, id, &payload).await })
                    })
                    .await;
                    match result {
                        Ok(()) => {
                            this.success.set(Some("Parcela guardada".to_string()));
                            this.load(session, id);
                        }
                        Err(e) => this.fail(e, "No se pudo guardar la parcela"),
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
            match session.call(|s| async move { api::delete_parcela(&s, id).await }).await {
                Ok(()) => on_deleted.run(()),
                Err(e) => this.error.set(Some(e.user_message("No se pudo eliminar la parcela"))),
            }
        });
    }
}
