use contracts::domain::a005_lote::aggregate::{Embotellado, EmbotelladoForm, Lote};
use contracts::shared::validation::{submit_validated, FieldErrors, SubmitError, GENERAL_VALIDATION_MESSAGE};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a005_lote::api;
use crate::shared::date_utils::today;
use crate::system::auth::context::SessionContext;

#[derive(Clone, Copy)]
pub struct LoteDetailsVm {
    pub id: RwSignal<Option<i64>>,
    pub lote: RwSignal<Option<Lote>>,
    pub embotellados: RwSignal<Vec<Embotellado>>,

    pub fecha: RwSignal<String>,
    pub botellas: RwSignal<String>,
    pub notas: RwSignal<String>,

    pub errors: RwSignal<FieldErrors>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl LoteDetailsVm {
    pub fn new() -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            lote: RwSignal::new(None),
            embotellados: RwSignal::new(Vec::new()),
            fecha: RwSignal::new(String::new()),
            botellas: RwSignal::new(String::new()),
            notas: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        };
        vm.reset_form();
        vm
    }

    fn reset_form(&self) {
        let form = EmbotelladoForm::new(today());
        self.fecha.set(form.fecha);
        self.botellas.set(form.botellas);
        self.notas.set(form.notas);
    }

    pub fn form(&self) -> EmbotelladoForm {
        EmbotelladoForm {
            fecha: self.fecha.get_untracked(),
            botellas: self.botellas.get_untracked(),
            notas: self.notas.get_untracked(),
        }
    }

    /// Lot and its bottling runs, newest first.
    pub fn load(&self, session: SessionContext, id: i64) {
        let this = *self;
        this.id.set(Some(id));
        this.loading.set(true);
        spawn_local(async move {
            let (lote, embotellados) = futures::join!(
                session.call(|s| async move { api::fetch_lote(&s, id).await }),
                session.call(|s| async move { api::fetch_embotellados(&s, id).await }),
            );
            match lote {
                Ok(lote) => this.lote.set(Some(lote)),
                Err(e) => {
                    log::error!("lote {}: {}", id, e);
                    this.error.set(Some(e.user_message("No se pudo cargar el lote")));
                }
            }
            match embotellados {
                Ok(mut list) => {
                    list.sort_by(|a, b| b.fecha.cmp(&a.fecha));
                    this.embotellados.set(list);
                }
                Err(e) => log::warn!("embotellados of lote {}: {}", id, e),
            }
            this.loading.set(false);
        });
    }

    pub fn add_embotellado(&self, session: SessionContext) {
        let this = *self;
        let Some(id) = this.id.get_untracked() else {
            return;
        };
        this.error.set(None);
        this.success.set(None);
        this.errors.set(FieldErrors::new());
        let validated = this.form().validate(today());
        this.saving.set(true);

        spawn_local(async move {
            let result = submit_validated(validated, |payload| {
                session.call(move |s| async move { api::create_embotellado(&s, id, &payload).await })
            })
            .await;
            match result {
                Ok(created) => {
                    this.success.set(Some(format!("Embotellado de {} botellas registrado", created.botellas)));
                    this.reset_form();
                    this.load(session, id);
                }
                Err(SubmitError::Invalid(errors)) => {
                    this.errors.set(errors);
                    this.error.set(Some(GENERAL_VALIDATION_MESSAGE.to_string()));
                }
                Err(SubmitError::Rejected(e)) => {
                    log::warn!("embotellado rejected: {}", e);
                    this.error.set(Some(e.user_message("No se pudo registrar el embotellado")));
                }
            }
            this.saving.set(false);
        });
    }
}
