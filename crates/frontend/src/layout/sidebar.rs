//! Left navigation. The "Usuarios" entry only exists for administrators.

use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use leptos::prelude::*;
use leptos_router::components::A;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuItem {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub admin_only: bool,
}

const fn item(href: &'static str, label: &'static str, icon: &'static str) -> MenuItem {
    MenuItem {
        href,
        label,
        icon,
        admin_only: false,
    }
}

const MENU: [MenuItem; 11] = [
    item("/inicio", "Inicio", "home"),
    item("/clientes", "Clientes", "clients"),
    item("/entregas", "Entregas", "deliveries"),
    item("/productos", "Productos", "wine"),
    item("/lotes", "Lotes", "lots"),
    item("/recetas", "Recetas", "recipe"),
    item("/parcelas", "Parcelas", "vineyard"),
    item("/eventos", "Eventos", "calendar"),
    item("/bodega", "Bodega", "winery"),
    MenuItem {
        href: "/usuarios",
        label: "Usuarios",
        icon: "users",
        admin_only: true,
    },
    item("/cuenta", "Mi cuenta", "key"),
];

pub fn menu_items(is_admin: bool) -> Vec<MenuItem> {
    MENU.iter()
        .filter(|m| is_admin || !m.admin_only)
        .cloned()
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = use_session();

    view! {
        <nav class="app-sidebar__content">
            {move || menu_items(session.is_admin()).into_iter().map(|m| view! {
                <A href=m.href attr:class="app-sidebar__item">
                    <div class="app-sidebar__item-content">
                        {icon(m.icon)}
                        <span>{m.label}</span>
                    </div>
                </A>
            }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_link_is_admin_only() {
        let operario = menu_items(false);
        assert!(operario.iter().all(|m| m.href != "/usuarios"));
        let admin = menu_items(true);
        assert!(admin.iter().any(|m| m.href == "/usuarios"));
        assert_eq!(admin.len(), operario.len() + 1);
    }
}
