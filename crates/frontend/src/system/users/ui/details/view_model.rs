//! User editor state.
//!
//! One `RwSignal` per form field for thaw two-way binding; `form()` snapshots
//! them into `UsuarioForm` for validation.

use contracts::shared::validation::{FieldErrors, GENERAL_VALIDATION_MESSAGE};
use contracts::system::account::password_problem;
use contracts::system::auth::Role;
use contracts::system::users::{is_self, ResetPasswordDto, Usuario, UsuarioForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::context::SessionContext;
use crate::system::users::api;

#[derive(Clone, Copy)]
pub struct UsuarioDetailsVm {
    pub id: RwSignal<Option<i64>>,
    pub original: RwSignal<Option<Usuario>>,

    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub password_confirm: RwSignal<String>,
    pub nombre: RwSignal<String>,
    pub email: RwSignal<String>,
    /// Role code, bound to the select.
    pub rol: RwSignal<String>,
    pub activo: RwSignal<bool>,

    pub temp_password: RwSignal<String>,

    pub errors: RwSignal<FieldErrors>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
}

impl UsuarioDetailsVm {
    pub fn new() -> Self {
        let vm = Self {
            id: RwSignal::new(None),
            original: RwSignal::new(None),
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            password_confirm: RwSignal::new(String::new()),
            nombre: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            rol: RwSignal::new(Role::Operario.as_code().to_string()),
            activo: RwSignal::new(true),
            temp_password: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
            success: RwSignal::new(None),
        };
        vm.apply(&UsuarioForm::new());
        vm
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    /// Editing one's own account: role and active flag are locked.
    pub fn is_self(&self, session: SessionContext) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || match (id.get(), session.session()) {
            (Some(target), Some(s)) => is_self(s.user_id(), target),
            _ => false,
        })
    }

    pub fn form(&self) -> UsuarioForm {
        UsuarioForm {
            username: self.username.get_untracked(),
            password: self.password.get_untracked(),
            password_confirm: self.password_confirm.get_untracked(),
            nombre: self.nombre.get_untracked(),
            email: self.email.get_untracked(),
            rol: Role::from_code(&self.rol.get_untracked()),
            activo: self.activo.get_untracked(),
        }
    }

    fn apply(&self, form: &UsuarioForm) {
        self.username.set(form.username.clone());
        self.password.set(form.password.clone());
        self.password_confirm.set(form.password_confirm.clone());
        self.nombre.set(form.nombre.clone());
        self.email.set(form.email.clone());
        self.rol.set(form.rol.as_code().to_string());
        self.activo.set(form.activo);
    }

    fn invalid(&self, errors: FieldErrors) {
        self.errors.set(errors);
        self.error.set(Some(GENERAL_VALIDATION_MESSAGE.to_string()));
    }

    pub fn load(&self, session: SessionContext, id: i64) {
        let this = *self;
        this.id.set(Some(id));
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            let result = session.call(|s| async move { api::fetch_usuario(&s, id).await }).await;
            match result {
                Ok(usuario) => {
                    this.apply(&UsuarioForm::from_usuario(&usuario));
                    this.original.set(Some(usuario));
                }
                Err(e) => {
                    log::error!("usuario {}: {}", id, e);
                    this.error.set(Some(e.user_message("No se pudo cargar el usuario")));
                }
            }
            this.loading.set(false);
        });
    }

    /// Create or update. `on_saved` receives the record id.
    pub fn save(&self, session: SessionContext, on_saved: Callback<i64>) {
        let this = *self;
        this.error.set(None);
        this.success.set(None);
        let form = this.form();

        match this.original.get_untracked() {
            None => {
                let dto = match form.validate_create() {
                    Ok(dto) => dto,
                    Err(errors) => return this.invalid(errors),
                };
                this.errors.set(FieldErrors::new());
                this.saving.set(true);
                spawn_local(async move {
                    let result = session.call(|s| async move { api::create_usuario(&s, &dto).await }).await;
                    this.saving.set(false);
                    match result {
                        Ok(created) => {
                            log::info!("usuario {} created", created.username);
                            on_saved.run(created.id);
                        }
                        Err(e) => this.error.set(Some(e.user_message("No se pudo crear el usuario"))),
                    }
                });
            }
            Some(original) => {
                let current = session.session_untracked().and_then(|s| s.user_id());
                let dto = match form.validate_update(&original, current) {
                    Ok(dto) => dto,
                    Err(errors) => return this.invalid(errors),
                };
                this.errors.set(FieldErrors::new());
                this.saving.set(true);
                let id = original.id;
                spawn_local(async move {
                    let result = session.call(|s| async move { api::update_usuario(&s, id, &dto).await }).await;
                    this.saving.set(false);
                    match result {
                        Ok(()) => {
                            this.success.set(Some("Usuario guardado".to_string()));
                            on_saved.run(id);
                        }
                        Err(e) => this.error.set(Some(e.user_message("No se pudo guardar el usuario"))),
                    }
                });
            }
        }
    }

    /// Admin sets a temporary password for another account.
    pub fn reset_password(&self, session: SessionContext) {
        let this = *self;
        let Some(id) = this.id.get_untracked() else {
            return;
        };
        let password = this.temp_password.get_untracked();
        if let Some(problem) = password_problem(&password) {
            let mut errors = FieldErrors::new();
            errors.add("temp_password", problem);
            this.errors.set(errors);
            return;
        }
        this.errors.set(FieldErrors::new());
        this.saving.set(true);
        spawn_local(async move {
            let dto = ResetPasswordDto { password };
            let result = session.call(|s| async move { api::reset_password(&s, id, &dto).await }).await;
            this.saving.set(false);
            match result {
                Ok(()) => {
                    this.temp_password.set(String::new());
                    this.success.set(Some(
                        "Contraseña restablecida. Se pedirá cambiarla en el próximo acceso.".to_string(),
                    ));
                }
                Err(e) => this.error.set(Some(e.user_message("No se pudo restablecer la contraseña"))),
            }
        });
    }
}
