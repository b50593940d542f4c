use contracts::domain::a004_producto::aggregate::{Producto, ProductoActivoPatch, ProductoPayload};
use contracts::system::auth::Session;

use crate::shared::api_utils::{self, ApiError, Verb};

fn path(session: &Session, id: Option<i64>) -> String {
    match id {
        Some(id) => session.tenant_path(&format!("productos/{}", id)),
        None => session.tenant_path("productos"),
    }
}

/// Wines and materials in one list; split on `Producto::tipo`.
pub async fn fetch_productos(session: &Session) -> Result<Vec<Producto>, ApiError> {
    api_utils::get_json(session, &path(session, None)).await
}

pub async fn fetch_producto(session: &Session, id: i64) -> Result<Producto, ApiError> {
    api_utils::get_json(session, &path(session, Some(id))).await
}

pub async fn create_producto(session: &Session, payload: &ProductoPayload) -> Result<Producto, ApiError> {
    api_utils::send_json(session, Verb::Post, &path(session, None), payload).await
}

pub async fn update_producto(session: &Session, id: i64, payload: &ProductoPayload) -> Result<(), ApiError> {
    api_utils::send_json_no_content(session, Verb::Put, &path(session, Some(id)), payload).await
}

pub async fn set_activo(session: &Session, id: i64, activo: bool) -> Result<(), ApiError> {
    let body = ProductoActivoPatch { activo };
    api_utils::send_json_no_content(session, Verb::Patch, &path(session, Some(id)), &body).await
}
