use contracts::domain::a005_lote::aggregate::{Embotellado, EmbotelladoPayload, Lote, LotePayload};
use contracts::system::auth::Session;

use crate::shared::api_utils::{self, ApiError, Verb};

fn path(session: &Session, id: Option<i64>) -> String {
    match id {
        Some(id) => session.tenant_path(&format!("lotes/{}", id)),
        None => session.tenant_path("lotes"),
    }
}

pub async fn fetch_lotes(session: &Session) -> Result<Vec<Lote>, ApiError> {
    api_utils::get_json(session, &path(session, None)).await
}

pub async fn fetch_lote(session: &Session, id: i64) -> Result<Lote, ApiError> {
    api_utils::get_json(session, &path(session, Some(id))).await
}

pub async fn create_lote(session: &Session, payload: &LotePayload) -> Result<Lote, ApiError> {
    api_utils::send_json(session, Verb::Post, &path(session, None), payload).await
}

/// Rejected by the backend while the lot has stock or history.
pub async fn delete_lote(session: &Session, id: i64) -> Result<(), ApiError> {
    api_utils::delete(session, &path(session, Some(id))).await
}

pub async fn fetch_embotellados(session: &Session, lote_id: i64) -> Result<Vec<Embotellado>, ApiError> {
    let path = session.tenant_path(&format!("lotes/{}/embotellados", lote_id));
    api_utils::get_json(session, &path).await
}

pub async fn create_embotellado(
    session: &Session,
    lote_id: i64,
    payload: &EmbotelladoPayload,
) -> Result<Embotellado, ApiError> {
    let path = session.tenant_path(&format!("lotes/{}/embotellados", lote_id));
    api_utils::send_json(session, Verb::Post, &path, payload).await
}
