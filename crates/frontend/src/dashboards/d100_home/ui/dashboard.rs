use chrono::NaiveDateTime;
use contracts::domain::a002_cliente::aggregate::Cliente;
use contracts::domain::a003_entrega::aggregate::{Entrega, EntregaFilter, EstadoEntrega};
use contracts::domain::a004_producto::aggregate::{critical_materials, Material, Producto};
use contracts::domain::a009_evento::aggregate::{upcoming, Evento};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_cliente::api as clientes_api;
use crate::domain::a003_entrega::api as entregas_api;
use crate::domain::a004_producto::api as productos_api;
use crate::domain::a009_evento::api as eventos_api;
use crate::shared::components::form::{ErrorBanner, LoadingRow};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{CardStatus, StatCard};
use crate::shared::date_utils::{format_date, format_datetime, now};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::system::auth::context::use_session;

const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeSummary {
    pub clientes_activos: usize,
    pub criticos: Vec<Material>,
    pub proximos: Vec<Evento>,
    pub borradores: Vec<Entrega>,
}

impl HomeSummary {
    pub fn build(
        clientes: &[Cliente],
        productos: &[Producto],
        eventos: &[Evento],
        borradores: Vec<Entrega>,
        from: NaiveDateTime,
    ) -> Self {
        Self {
            clientes_activos: clientes.iter().filter(|c| c.activo).count(),
            criticos: critical_materials(productos).into_iter().cloned().collect(),
            proximos: upcoming(eventos, from, UPCOMING_LIMIT),
            borradores,
        }
    }
}

#[component]
pub fn HomeDashboard() -> impl IntoView {
    let session = use_session();
    let summary = RwSignal::new(None::<HomeSummary>);
    let error = RwSignal::new(None::<String>);

    spawn_local(async move {
        let borradores_filter = EntregaFilter {
            estado: Some(EstadoEntrega::Borrador),
            ..Default::default()
        };
        let (clientes, productos, eventos, borradores) = futures::join!(
            session.call(|s| async move { clientes_api::fetch_clientes(&s).await }),
            session.call(|s| async move { productos_api::fetch_productos(&s).await }),
            session.call(|s| async move { eventos_api::fetch_eventos(&s).await }),
            session.call(move |s| async move {
                entregas_api::fetch_entregas(&s, &borradores_filter).await
            }),
        );
        match (clientes, productos, eventos, borradores) {
            (Ok(clientes), Ok(productos), Ok(eventos), Ok(borradores)) => {
                summary.set(Some(HomeSummary::build(
                    &clientes,
                    &productos,
                    &eventos,
                    borradores,
                    now(),
                )));
            }
            (c, p, e, b) => {
                let err = [c.err(), p.err(), e.err(), b.err()].into_iter().flatten().next();
                if let Some(err) = err {
                    log::error!("home dashboard: {}", err);
                    error.set(Some(err.user_message("No se pudo cargar el resumen")));
                }
            }
        }
    });

    let count = move |f: fn(&HomeSummary) -> usize| {
        Signal::derive(move || summary.with(|s| s.as_ref().map(|s| f(s).to_string())))
    };
    let criticos_status = Signal::derive(move || {
        summary.with(|s| match s {
            Some(s) if !s.criticos.is_empty() => CardStatus::Bad,
            Some(_) => CardStatus::Good,
            None => CardStatus::Neutral,
        })
    });

    view! {
        <PageFrame page_id="d100_home--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title=format!("Inicio · {}", session.session().map(|s| s.tenant_name().to_string()).unwrap_or_default())>
                <a class="button button--primary" href="/entregas/nueva">"Nueva entrega"</a>
            </PageHeader>
            <div class="page__content">
                <ErrorBanner message=error />
                <Show when=move || summary.with(Option::is_none) && error.with(Option::is_none)>
                    <LoadingRow />
                </Show>

                <div class="stat-cards">
                    <StatCard
                        label="Clientes activos"
                        icon_name="clients"
                        value=count(|s| s.clientes_activos)
                        status=CardStatus::Neutral
                        href="/clientes"
                    />
                    <StatCard
                        label="Entregas en borrador"
                        icon_name="deliveries"
                        value=count(|s| s.borradores.len())
                        status=CardStatus::Neutral
                        href="/entregas"
                    />
                    <StatCard
                        label="Materiales en stock crítico"
                        icon_name="wine"
                        value=count(|s| s.criticos.len())
                        status=criticos_status
                        href="/productos"
                    />
                    <StatCard
                        label="Próximos eventos"
                        icon_name="calendar"
                        value=count(|s| s.proximos.len())
                        status=CardStatus::Neutral
                        href="/eventos"
                    />
                </div>

                {move || summary.get().map(|s| view! {
                    <div class="dashboard__grid">
                        <Card>
                            <h3>"Próximos eventos"</h3>
                            {if s.proximos.is_empty() {
                                view! { <p class="text-muted">"Sin eventos programados."</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="dashboard__list">
                                        {s.proximos.into_iter().map(|e| view! {
                                            <li>
                                                <a href=format!("/eventos/{}", e.id)>{e.titulo}</a>
                                                <span class="text-muted">{format!(" {}", format_datetime(e.fecha_hora))}</span>
                                            </li>
                                        }).collect_view()}
                                    </ul>
                                }.into_any()
                            }}
                        </Card>
                        <Card>
                            <h3>"Entregas en borrador"</h3>
                            {if s.borradores.is_empty() {
                                view! { <p class="text-muted">"No hay borradores pendientes."</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="dashboard__list">
                                        {s.borradores.into_iter().map(|e| view! {
                                            <li>
                                                <a href=format!("/entregas/{}", e.id)>
                                                    {e.numero.clone().unwrap_or_else(|| format!("#{}", e.id))}
                                                </a>
                                                <span class="text-muted">
                                                    {format!(" {} · {}", format_date(e.fecha), e.cliente_nombre.clone().unwrap_or_default())}
                                                </span>
                                            </li>
                                        }).collect_view()}
                                    </ul>
                                }.into_any()
                            }}
                        </Card>
                        <Card>
                            <h3>"Stock crítico"</h3>
                            {if s.criticos.is_empty() {
                                view! { <p class="text-muted">"Todos los materiales están por encima del mínimo."</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="dashboard__list">
                                        {s.criticos.into_iter().map(|m| view! {
                                            <li>
                                                <a href=format!("/productos/{}", m.id)>{m.nombre}</a>
                                                <span class="text-danger">
                                                    {format!(" {} / {}", m.stock_unidades, m.stock_minimo_unidades)}
                                                </span>
                                            </li>
                                        }).collect_view()}
                                    </ul>
                                }.into_any()
                            }}
                        </Card>
                    </div>
                })}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a004_producto::aggregate::FamiliaMaterial;
    use contracts::domain::a009_evento::aggregate::TipoEvento;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn evento(id: i64, fecha_hora: NaiveDateTime) -> Evento {
        Evento {
            id,
            titulo: format!("E{}", id),
            tipo: TipoEvento::default(),
            fecha_hora,
            ubicacion: None,
            descripcion: None,
        }
    }

    fn material(id: i64, stock: i64, minimo: i64) -> Producto {
        Producto::Material(Material {
            id,
            nombre: format!("M{}", id),
            descripcion: None,
            familia: FamiliaMaterial::default(),
            stock_unidades: stock,
            stock_minimo_unidades: minimo,
            activo: true,
        })
    }

    #[test]
    fn test_summary_keeps_future_events_and_critical_materials() {
        let eventos = vec![evento(1, at(1, 9)), evento(2, at(20, 9)), evento(3, at(15, 9))];
        let productos = vec![material(1, 10, 50), material(2, 100, 50)];
        let summary = HomeSummary::build(&[], &productos, &eventos, vec![], at(10, 0));
        assert_eq!(summary.clientes_activos, 0);
        assert_eq!(summary.proximos.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(summary.criticos.len(), 1);
        assert_eq!(summary.criticos[0].id, 1);
    }
}
