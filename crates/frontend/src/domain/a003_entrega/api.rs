use contracts::domain::a003_entrega::aggregate::{AccionEntrega, Entrega, EntregaFilter, EntregaPayload};
use contracts::system::auth::Session;

use crate::shared::api_utils::{self, ApiError, Verb};

/// `entregas` or `entregas?estado=..&clienteId=..` for a non-empty filter.
pub fn list_suffix(filter: &EntregaFilter) -> Result<String, ApiError> {
    let query = serde_qs::to_string(filter).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(if query.is_empty() {
        "entregas".to_string()
    } else {
        format!("entregas?{}", query)
    })
}

pub async fn fetch_entregas(session: &Session, filter: &EntregaFilter) -> Result<Vec<Entrega>, ApiError> {
    let path = session.tenant_path(&list_suffix(filter)?);
    api_utils::get_json(session, &path).await
}

pub async fn fetch_entrega(session: &Session, id: i64) -> Result<Entrega, ApiError> {
    api_utils::get_json(session, &session.tenant_path(&format!("entregas/{}", id))).await
}

pub async fn create_entrega(session: &Session, payload: &EntregaPayload) -> Result<Entrega, ApiError> {
    api_utils::send_json(session, Verb::Post, &session.tenant_path("entregas"), payload).await
}

/// Replace a draft, lines included.
pub async fn update_entrega(session: &Session, id: i64, payload: &EntregaPayload) -> Result<(), ApiError> {
    let path = session.tenant_path(&format!("entregas/{}", id));
    api_utils::send_json_no_content(session, Verb::Put, &path, payload).await
}

pub async fn apply_action(session: &Session, id: i64, accion: AccionEntrega) -> Result<(), ApiError> {
    let path = session.tenant_path(&format!("entregas/{}/{}", id, accion.path_segment()));
    api_utils::post_empty(session, &path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a003_entrega::aggregate::EstadoEntrega;

    #[test]
    fn test_list_suffix() {
        assert_eq!(list_suffix(&EntregaFilter::default()).unwrap(), "entregas");
        let filter = EntregaFilter {
            estado: Some(EstadoEntrega::Borrador),
            cliente_id: Some(4),
            desde: NaiveDate::from_ymd_opt(2025, 9, 1),
            hasta: None,
        };
        assert_eq!(
            list_suffix(&filter).unwrap(),
            "entregas?estado=BORRADOR&clienteId=4&desde=2025-09-01"
        );
    }
}
