//! Small building blocks shared by every edit form.

use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use thaw::*;

/// Red box above a form or table. Renders nothing while `message` is `None`.
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || message.get().map(|e| view! {
            <div class="warning-box" style="background: var(--color-error-50); border-color: var(--color-error-100);">
                <span class="warning-box__icon" style="color: var(--color-error);">"⚠"</span>
                <span class="warning-box__text" style="color: var(--color-error);">{e}</span>
            </div>
        })}
    }
}

#[component]
pub fn SuccessBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || message.get().map(|m| view! {
            <MessageBar intent=MessageBarIntent::Success>
                <div>{m}</div>
            </MessageBar>
        })}
    }
}

/// Label, input slot and the field's validation message.
#[component]
pub fn FormField(
    label: &'static str,
    /// Key used by the form's `validate` for this input.
    field: &'static str,
    errors: RwSignal<FieldErrors>,
    #[prop(optional)]
    required: bool,
    children: Children,
) -> impl IntoView {
    let message = move || errors.with(|e| e.get(field).map(str::to_string));
    view! {
        <div class="form__group" class:form__group--invalid=move || message().is_some()>
            <Label>{label}{required.then_some(" *")}</Label>
            {children()}
            {move || message().map(|m| view! { <div class="form__error">{m}</div> })}
        </div>
    }
}

#[component]
pub fn LoadingRow(#[prop(optional, into)] text: Option<String>) -> impl IntoView {
    let text = text.unwrap_or_else(|| "Cargando...".to_string());
    view! {
        <Flex align=FlexAlign::Center gap=FlexGap::Small>
            <Spinner />
            <span>{text}</span>
        </Flex>
    }
}

/// `window.confirm`, `false` when no window is available.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
