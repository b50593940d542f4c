mod state;

use contracts::system::users::{is_self, Usuario};
use contracts::system::auth::Role;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use std::cmp::Ordering;
use thaw::*;

use crate::shared::components::form::{confirm, ErrorBanner, LoadingRow};
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_opt_text, filter_list, get_sort_indicator, sort_list, SearchInput, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::context::use_session;
use crate::system::auth::guard::RequireAdmin;
use crate::system::users::api;
use state::create_state;

impl Sortable for Usuario {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "nombre" => cmp_opt_text(self.nombre.as_deref(), other.nombre.as_deref()),
            "email" => cmp_opt_text(self.email.as_deref(), other.email.as_deref()),
            "rol" => self.rol.as_code().cmp(other.rol.as_code()),
            "activo" => other.activo.cmp(&self.activo),
            _ => self.username.to_lowercase().cmp(&other.username.to_lowercase()),
        }
    }
}

impl Searchable for Usuario {
    fn matches_filter(&self, filter: &str) -> bool {
        let q = filter.trim().to_lowercase();
        self.username.to_lowercase().contains(&q)
            || self.nombre.as_deref().unwrap_or("").to_lowercase().contains(&q)
            || self.email.as_deref().unwrap_or("").to_lowercase().contains(&q)
    }
}

#[component]
pub fn UsuariosListPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <UsuariosList />
        </RequireAdmin>
    }
}

#[component]
fn UsuariosList() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let state = create_state();
    let all_usuarios: RwSignal<Vec<Usuario>> = RwSignal::new(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let current_user_id = session.session_untracked().and_then(|s| s.user_id());

    let refresh_view = move || {
        let query = state.with_untracked(|s| s.search_query.clone());
        let mut data = filter_list(all_usuarios.get_untracked(), &query);
        state.update(|s| {
            sort_list(&mut data, &s.sort_field, s.sort_ascending);
            s.items = data;
        });
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = session.call(|s| async move { api::fetch_usuarios(&s).await }).await;
            match result {
                Ok(data) => {
                    log::debug!("loaded {} usuarios", data.len());
                    all_usuarios.set(data);
                    state.update(|s| s.is_loaded = true);
                    refresh_view();
                }
                Err(e) => {
                    log::error!("usuarios: {}", e);
                    set_error.set(Some(e.user_message("No se pudieron cargar los usuarios")));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    let on_search = Callback::new(move |q: String| {
        state.update(|s| s.search_query = q);
        refresh_view();
    });

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| {
                if s.sort_field == field {
                    s.sort_ascending = !s.sort_ascending;
                } else {
                    s.sort_field = field.to_string();
                    s.sort_ascending = true;
                }
            });
            refresh_view();
        }
    };

    let sort_mark = move |field: &'static str| {
        move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))
    };

    let delete_usuario = move |usuario: Usuario| {
        if is_self(current_user_id, usuario.id) {
            set_error.set(Some("No puedes eliminar tu propia cuenta".to_string()));
            return;
        }
        if !confirm(&format!("¿Eliminar el usuario {}?", usuario.username)) {
            return;
        }
        spawn_local(async move {
            let result = session.call(|s| async move { api::delete_usuario(&s, usuario.id).await }).await;
            match result {
                Ok(()) => {
                    log::info!("usuario {} deleted", usuario.id);
                    all_usuarios.update(|list| list.retain(|u| u.id != usuario.id));
                    refresh_view();
                }
                Err(e) => set_error.set(Some(e.user_message("No se pudo eliminar el usuario"))),
            }
        });
    };

    let nav_new = navigate.clone();

    view! {
        <PageFrame page_id="sys_usuarios--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Usuarios"</h1>
                    <Badge>{move || state.with(|s| s.items.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| nav_new("/usuarios/nuevo", Default::default())
                    >
                        {icon("plus")}
                        " Nuevo"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Cargando..." } else { " Actualizar" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <ErrorBanner message=error />

                <div class="filter-panel">
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.search_query.clone()))
                        on_change=on_search
                        placeholder="Usuario, nombre o email..."
                    />
                </div>

                <Show when=move || loading.get() && !state.with(|s| s.is_loaded)>
                    <LoadingRow />
                </Show>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=toggle_sort("username")>
                                        "Usuario" {sort_mark("username")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=toggle_sort("nombre")>
                                        "Nombre" {sort_mark("nombre")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=toggle_sort("email")>
                                        "Email" {sort_mark("email")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=toggle_sort("rol")>
                                        "Rol" {sort_mark("rol")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>
                                    <div class="table__sortable-header" on:click=toggle_sort("activo")>
                                        "Estado" {sort_mark("activo")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.get().items
                                key=|u| u.id
                                children=move |usuario| {
                                    let href = format!("/usuarios/{}", usuario.id);
                                    let own = is_self(current_user_id, usuario.id);
                                    let for_delete = usuario.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a href=href style="font-weight: 500;">{usuario.username.clone()}</a>
                                                    {own.then(|| view! { <span class="text-muted">" (tú)"</span> })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {usuario.nombre.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {usuario.email.clone().unwrap_or_default()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {match usuario.rol {
                                                        Role::Admin => view! { <span class="badge badge--warning">{Role::Admin.label()}</span> }.into_any(),
                                                        Role::Operario => view! { <span class="badge badge--neutral">{Role::Operario.label()}</span> }.into_any(),
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if usuario.activo {
                                                        view! { <span class="badge badge--success">"Activo"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--error">"Inactivo"</span> }.into_any()
                                                    }}
                                                    {usuario.debe_cambiar_password.then(|| view! {
                                                        <span class="badge badge--neutral" title="Debe cambiar la contraseña">{icon("key")}</span>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                {(!own).then(|| view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        size=ButtonSize::Small
                                                        on_click=move |_| delete_usuario(for_delete.clone())
                                                        attr:title="Eliminar"
                                                    >
                                                        {icon("delete")}
                                                    </Button>
                                                })}
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario(id: i64, username: &str, nombre: Option<&str>) -> Usuario {
        Usuario {
            id,
            username: username.into(),
            nombre: nombre.map(str::to_string),
            email: None,
            rol: Role::Operario,
            activo: true,
            debe_cambiar_password: false,
            ultimo_acceso: None,
        }
    }

    #[test]
    fn test_search_and_sort() {
        let list = vec![
            usuario(1, "pepe", Some("José Ruiz")),
            usuario(2, "ana", None),
            usuario(3, "Luis", Some("Luis Gil")),
        ];
        let found = filter_list(list.clone(), "ruiz");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        let mut sorted = list;
        sort_list(&mut sorted, "username", true);
        let names: Vec<_> = sorted.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["ana", "Luis", "pepe"]);

        sort_list(&mut sorted, "nombre", true);
        assert_eq!(sorted.last().map(|u| u.id), Some(2));
    }
}
