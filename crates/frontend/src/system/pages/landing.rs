use leptos::prelude::*;
use thaw::*;

use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_PUBLIC;

const FEATURES: [(&str, &str); 4] = [
    ("Clientes y albaranes", "Fichas de clientes, entregas en borrador, confirmadas y entregadas."),
    ("Bodega y embotellado", "Vinos, materiales con stock mínimo, lotes y recetas de embotellado."),
    ("Viñedo", "Parcelas, labores, tratamientos, muestreos y estimación de vendimia."),
    ("Agenda", "Catas, ferias y visitas en un calendario mensual."),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <PageFrame page_id="landing--public" category=PAGE_CAT_PUBLIC>
            <header class="landing__hero">
                <h1>"Vinops"</h1>
                <p>"La gestión diaria de tu bodega, del viñedo al albarán."</p>
                <Flex gap=FlexGap::Large>
                    <a class="button button--primary" href="/login">"Entrar"</a>
                    <a class="button button--secondary" href="/registro">"Registrar mi bodega"</a>
                </Flex>
            </header>
            <section class="landing__features">
                {FEATURES.iter().map(|(title, text)| view! {
                    <Card>
                        <h3>{*title}</h3>
                        <p>{*text}</p>
                    </Card>
                }).collect_view()}
            </section>
        </PageFrame>
    }
}
