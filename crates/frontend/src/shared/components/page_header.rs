use leptos::prelude::*;

use crate::shared::icons::icon;

/// Title bar of a page with an action slot on the right
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Parent list route, rendered as the first action.
    #[prop(optional)]
    back_href: Option<&'static str>,

    #[prop(optional, into)]
    back_label: MaybeProp<String>,

    /// Action buttons (pass an empty fragment if none)
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                <div class="page-header__text">
                    <h1 class="page-header__title">{title}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {back_href.map(|href| view! {
                    <a class="button button--secondary" href=href>
                        {icon("chevron-left")}
                        {move || back_label.get().map(|l| format!(" {}", l))}
                    </a>
                })}
                {children()}
            </div>
        </div>
    }
}
