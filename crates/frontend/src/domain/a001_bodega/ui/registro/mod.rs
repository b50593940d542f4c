//! Public winery sign-up through the registration assistant.

use contracts::domain::a001_bodega::aggregate::{ChatMensaje, ChatRegistroRequest, ChatRol};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_bodega::api;
use crate::shared::components::form::ErrorBanner;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_PUBLIC;

const GREETING: &str = "¡Hola! Te ayudo a dar de alta tu bodega en Vinops. ¿Cómo se llama?";

/// Conversation to send: everything typed so far, greeting excluded.
pub fn outgoing_messages(history: &[ChatMensaje]) -> Vec<ChatMensaje> {
    history
        .iter()
        .skip_while(|m| m.rol == ChatRol::Assistant)
        .cloned()
        .collect()
}

#[component]
pub fn RegistroPage() -> impl IntoView {
    let messages = RwSignal::new(vec![ChatMensaje {
        rol: ChatRol::Assistant,
        contenido: GREETING.to_string(),
    }]);
    let draft = RwSignal::new(String::new());
    let sending = RwSignal::new(false);
    let completed = RwSignal::new(None::<Option<String>>);
    let error = RwSignal::new(None::<String>);

    let send = move || {
        let text = draft.get_untracked().trim().to_string();
        if text.is_empty() || sending.get_untracked() || completed.get_untracked().is_some() {
            return;
        }
        messages.update(|m| {
            m.push(ChatMensaje {
                rol: ChatRol::User,
                contenido: text,
            })
        });
        draft.set(String::new());
        error.set(None);
        sending.set(true);

        let request = ChatRegistroRequest {
            mensajes: messages.with_untracked(|m| outgoing_messages(m)),
        };
        spawn_local(async move {
            match api::chat_registro(&request).await {
                Ok(response) => {
                    messages.update(|m| {
                        m.push(ChatMensaje {
                            rol: ChatRol::Assistant,
                            contenido: response.respuesta,
                        })
                    });
                    if response.completado {
                        log::info!("winery registered: {:?}", response.bodega_slug);
                        completed.set(Some(response.bodega_slug));
                    }
                }
                Err(e) => {
                    log::warn!("registration chat: {}", e);
                    error.set(Some(e.user_message("El asistente no responde. Inténtalo de nuevo.")));
                }
            }
            sending.set(false);
        });
    };

    view! {
        <PageFrame page_id="a001_bodega_registro--public" category=PAGE_CAT_PUBLIC>
            <div class="chat">
                <h1>"Registra tu bodega"</h1>
                <div class="chat__messages">
                    <For
                        each=move || messages.get().into_iter().enumerate()
                        key=|(i, _)| *i
                        children=|(_, m)| {
                            let class = match m.rol {
                                ChatRol::User => "chat__bubble chat__bubble--user",
                                ChatRol::Assistant => "chat__bubble chat__bubble--assistant",
                            };
                            view! { <div class=class>{m.contenido}</div> }
                        }
                    />
                    <Show when=move || sending.get()>
                        <div class="chat__bubble chat__bubble--assistant"><Spinner size=SpinnerSize::Small /></div>
                    </Show>
                </div>

                <ErrorBanner message=error />

                {move || match completed.get() {
                    Some(slug) => view! {
                        <MessageBar intent=MessageBarIntent::Success>
                            <div>
                                "Bodega creada"
                                {slug.map(|s| format!(" ({})", s))}
                                ". Ya puedes "
                                <a href="/login">"iniciar sesión"</a>
                                "."
                            </div>
                        </MessageBar>
                    }
                    .into_any(),
                    None => view! {
                        <form
                            class="chat__input"
                            on:submit=move |ev: leptos::ev::SubmitEvent| {
                                ev.prevent_default();
                                send();
                            }
                        >
                            <Input value=draft placeholder="Escribe tu respuesta..." />
                            <button
                                type="submit"
                                class="button button--primary"
                                disabled=move || sending.get()
                            >
                                "Enviar"
                            </button>
                        </form>
                    }
                    .into_any(),
                }}

                <p class="text-muted">
                    "¿Ya tienes cuenta? "
                    <a href="/login">"Entrar"</a>
                </p>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(rol: ChatRol, text: &str) -> ChatMensaje {
        ChatMensaje {
            rol,
            contenido: text.into(),
        }
    }

    #[test]
    fn test_greeting_is_not_sent() {
        let history = vec![
            msg(ChatRol::Assistant, GREETING),
            msg(ChatRol::User, "Bodega Toro"),
            msg(ChatRol::Assistant, "¿En qué ciudad?"),
            msg(ChatRol::User, "Toro"),
        ];
        let out = outgoing_messages(&history);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].rol, ChatRol::User);
    }
}
