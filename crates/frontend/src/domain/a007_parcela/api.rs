use contracts::domain::a007_parcela::aggregate::{Parcela, ParcelaPayload};
use contracts::domain::a007_parcela::harvest::EstimacionVendimia;
use contracts::domain::a007_parcela::registro::{RegistroPayload, RegistroVinedo};
use contracts::system::auth::Session;

use crate::shared::api_utils::{self, ApiError, Verb};

fn path(session: &Session, id: Option<i64>) -> String {
    match id {
        Some(id) => session.tenant_path(&format!("parcelas/{}", id)),
        None => session.tenant_path("parcelas"),
    }
}

pub async fn fetch_parcelas(session: &Session) -> Result<Vec<Parcela>, ApiError> {
    api_utils::get_json(session, &path(session, None)).await
}

pub async fn fetch_parcela(session: &Session, id: i64) -> Result<Parcela, ApiError> {
    api_utils::get_json(session, &path(session, Some(id))).await
}

pub async fn create_parcela(session: &Session, payload: &ParcelaPayload) -> Result<Parcela, ApiError> {
    api_utils::send_json(session, Verb::Post, &path(session, None), payload).await
}

pub async fn update_parcela(session: &Session, id: i64, payload: &ParcelaPayload) -> Result<(), ApiError> {
    api_utils::send_json_no_content(session, Verb::Put, &path(session, Some(id)), payload).await
}

pub async fn delete_parcela(session: &Session, id: i64) -> Result<(), ApiError> {
    api_utils::delete(session, &path(session, Some(id))).await
}

pub async fn fetch_registros(session: &Session, parcela_id: i64) -> Result<Vec<RegistroVinedo>, ApiError> {
    let path = session.tenant_path(&format!("parcelas/{}/registros", parcela_id));
    api_utils::get_json(session, &path).await
}

pub async fn create_registro(
    session: &Session,
    parcela_id: i64,
    payload: &RegistroPayload,
) -> Result<RegistroVinedo, ApiError> {
    let path = session.tenant_path(&format!("parcelas/{}/registros", parcela_id));
    api_utils::send_json(session, Verb::Post, &path, payload).await
}

pub async fn delete_registro(session: &Session, parcela_id: i64, registro_id: i64) -> Result<(), ApiError> {
    let path = session.tenant_path(&format!("parcelas/{}/registros/{}", parcela_id, registro_id));
    api_utils::delete(session, &path).await
}

/// Computed server-side from the plot's samples.
pub async fn fetch_estimacion(session: &Session, parcela_id: i64) -> Result<EstimacionVendimia, ApiError> {
    let path = session.tenant_path(&format!("parcelas/{}/estimacion-vendimia", parcela_id));
    api_utils::get_json(session, &path).await
}
