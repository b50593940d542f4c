use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Route, Routes};
use leptos_router::path;

use crate::dashboards::HomeDashboard;
use crate::domain::a001_bodega::ui::details::BodegaPage;
use crate::domain::a001_bodega::ui::registro::RegistroPage;
use crate::domain::a002_cliente::ui::details::ClienteDetailsPage;
use crate::domain::a002_cliente::ui::list::ClientesList;
use crate::domain::a003_entrega::ui::details::EntregaDetailsPage;
use crate::domain::a003_entrega::ui::list::EntregasList;
use crate::domain::a004_producto::ui::details::ProductoDetailsPage;
use crate::domain::a004_producto::ui::list::ProductosList;
use crate::domain::a005_lote::ui::details::LoteDetailsPage;
use crate::domain::a005_lote::ui::list::LotesList;
use crate::domain::a006_receta::ui::details::RecetasPage;
use crate::domain::a007_parcela::ui::details::ParcelaDetailsPage;
use crate::domain::a007_parcela::ui::list::ParcelasList;
use crate::domain::a009_evento::ui::details::EventoDetailsPage;
use crate::domain::a009_evento::ui::list::EventosList;
use crate::layout::Shell;
use crate::system::account::ui::password::PasswordPage;
use crate::system::account::ui::profile::ProfilePage;
use crate::system::auth::guard::{PublicOnly, RequireAuth};
use crate::system::pages::landing::LandingPage;
use crate::system::pages::login::LoginPage;
use crate::system::pages::not_found::NotFoundPage;
use crate::system::users::ui::details::UsuarioDetailsPage;
use crate::system::users::ui::list::UsuariosListPage;

#[component]
fn PublicArea() -> impl IntoView {
    view! {
        <PublicOnly>
            <Outlet />
        </PublicOnly>
    }
}

#[component]
fn PrivateArea() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <Outlet />
            </Shell>
        </RequireAuth>
    }
}

/// `nuevo`/`nueva` resolve through the `:id` routes; see `parse_route_id`.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <ParentRoute path=path!("") view=PublicArea>
                <Route path=path!("") view=LandingPage />
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("registro") view=RegistroPage />
            </ParentRoute>
            <ParentRoute path=path!("") view=PrivateArea>
                <Route path=path!("inicio") view=HomeDashboard />
                <Route path=path!("clientes") view=ClientesList />
                <Route path=path!("clientes/:id") view=ClienteDetailsPage />
                <Route path=path!("entregas") view=EntregasList />
                <Route path=path!("entregas/:id") view=EntregaDetailsPage />
                <Route path=path!("productos") view=ProductosList />
                <Route path=path!("productos/:id") view=ProductoDetailsPage />
                <Route path=path!("lotes") view=LotesList />
                <Route path=path!("lotes/:id") view=LoteDetailsPage />
                <Route path=path!("recetas") view=RecetasPage />
                <Route path=path!("parcelas") view=ParcelasList />
                <Route path=path!("parcelas/:id") view=ParcelaDetailsPage />
                <Route path=path!("eventos") view=EventosList />
                <Route path=path!("eventos/:id") view=EventoDetailsPage />
                <Route path=path!("usuarios") view=UsuariosListPage />
                <Route path=path!("usuarios/:id") view=UsuarioDetailsPage />
                <Route path=path!("cuenta") view=ProfilePage />
                <Route path=path!("cuenta/password") view=PasswordPage />
                <Route path=path!("bodega") view=BodegaPage />
            </ParentRoute>
        </Routes>
    }
}
