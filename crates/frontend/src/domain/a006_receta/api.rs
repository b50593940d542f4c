use contracts::domain::a006_receta::aggregate::{RecetaEmbotellado, RecetaPayload};
use contracts::system::auth::Session;

use crate::shared::api_utils::{self, ApiError, Verb};

fn path(session: &Session, producto_id: i64) -> String {
    session.tenant_path(&format!("productos/{}/receta", producto_id))
}

/// A wine without a recipe yet comes back as an empty line list.
pub async fn fetch_receta(session: &Session, producto_id: i64) -> Result<RecetaEmbotellado, ApiError> {
    api_utils::get_json(session, &path(session, producto_id)).await
}

pub async fn save_receta(session: &Session, producto_id: i64, payload: &RecetaPayload) -> Result<(), ApiError> {
    api_utils::send_json_no_content(session, Verb::Put, &path(session, producto_id), payload).await
}
