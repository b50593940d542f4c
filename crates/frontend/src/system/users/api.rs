use contracts::system::auth::Session;
use contracts::system::users::{CreateUsuarioDto, ResetPasswordDto, UpdateUsuarioDto, Usuario};

use crate::shared::api_utils::{self, ApiError, Verb};

fn path(session: &Session, id: Option<i64>) -> String {
    match id {
        Some(id) => session.tenant_path(&format!("usuarios/{}", id)),
        None => session.tenant_path("usuarios"),
    }
}

pub async fn fetch_usuarios(session: &Session) -> Result<Vec<Usuario>, ApiError> {
    api_utils::get_json(session, &path(session, None)).await
}

pub async fn fetch_usuario(session: &Session, id: i64) -> Result<Usuario, ApiError> {
    api_utils::get_json(session, &path(session, Some(id))).await
}

pub async fn create_usuario(session: &Session, dto: &CreateUsuarioDto) -> Result<Usuario, ApiError> {
    api_utils::send_json(session, Verb::Post, &path(session, None), dto).await
}

pub async fn update_usuario(session: &Session, id: i64, dto: &UpdateUsuarioDto) -> Result<(), ApiError> {
    api_utils::send_json_no_content(session, Verb::Patch, &path(session, Some(id)), dto).await
}

pub async fn delete_usuario(session: &Session, id: i64) -> Result<(), ApiError> {
    api_utils::delete(session, &path(session, Some(id))).await
}

/// Set a temporary password; the backend flags the account for a forced change.
pub async fn reset_password(session: &Session, id: i64, dto: &ResetPasswordDto) -> Result<(), ApiError> {
    let path = session.tenant_path(&format!("usuarios/{}/reset-password", id));
    api_utils::send_json_no_content(session, Verb::Post, &path, dto).await
}
