use contracts::domain::a002_cliente::aggregate::{Cliente, ClienteActivoPatch, ClientePayload};
use contracts::system::auth::Session;

use crate::shared::api_utils::{self, ApiError, Verb};

fn path(session: &Session, id: Option<i64>) -> String {
    match id {
        Some(id) => session.tenant_path(&format!("clientes/{}", id)),
        None => session.tenant_path("clientes"),
    }
}

pub async fn fetch_clientes(session: &Session) -> Result<Vec<Cliente>, ApiError> {
    api_utils::get_json(session, &path(session, None)).await
}

pub async fn fetch_cliente(session: &Session, id: i64) -> Result<Cliente, ApiError> {
    api_utils::get_json(session, &path(session, Some(id))).await
}

pub async fn create_cliente(session: &Session, payload: &ClientePayload) -> Result<Cliente, ApiError> {
    api_utils::send_json(session, Verb::Post, &path(session, None), payload).await
}

pub async fn update_cliente(session: &Session, id: i64, payload: &ClientePayload) -> Result<(), ApiError> {
    api_utils::send_json_no_content(session, Verb::Patch, &path(session, Some(id)), payload).await
}

/// Soft (de)activation; the record stays referenced by past deliveries.
pub async fn set_activo(session: &Session, id: i64, activo: bool) -> Result<(), ApiError> {
    let body = ClienteActivoPatch { activo };
    api_utils::send_json_no_content(session, Verb::Patch, &path(session, Some(id)), &body).await
}

pub async fn delete_cliente(session: &Session, id: i64) -> Result<(), ApiError> {
    api_utils::delete(session, &path(session, Some(id))).await
}
