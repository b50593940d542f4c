use contracts::domain::a009_evento::aggregate::{Evento, EventoPayload};
use contracts::system::auth::Session;

use crate::shared::api_utils::{self, ApiError, Verb};

fn path(session: &Session, id: Option<i64>) -> String {
    match id {
        Some(id) => session.tenant_path(&format!("eventos/{}", id)),
        None => session.tenant_path("eventos"),
    }
}

pub async fn fetch_eventos(session: &Session) -> Result<Vec<Evento>, ApiError> {
    api_utils::get_json(session, &path(session, None)).await
}

pub async fn fetch_evento(session: &Session, id: i64) -> Result<Evento, ApiError> {
    api_utils::get_json(session, &path(session, Some(id))).await
}

pub async fn create_evento(session: &Session, payload: &EventoPayload) -> Result<Evento, ApiError> {
    api_utils::send_json(session, Verb::Post, &path(session, None), payload).await
}

pub async fn update_evento(session: &Session, id: i64, payload: &EventoPayload) -> Result<(), ApiError> {
    api_utils::send_json_no_content(session, Verb::Put, &path(session, Some(id)), payload).await
}

pub async fn delete_evento(session: &Session, id: i64) -> Result<(), ApiError> {
    api_utils::delete(session, &path(session, Some(id))).await
}
