use contracts::system::account::{ChangePasswordDto, Perfil, UpdatePerfilDto};
use contracts::system::auth::Session;

use crate::shared::api_utils::{self, ApiError, Verb};

const ME: &str = "/api/account/me";

pub async fn fetch_perfil(session: &Session) -> Result<Perfil, ApiError> {
    api_utils::get_json(session, ME).await
}

pub async fn update_perfil(session: &Session, dto: &UpdatePerfilDto) -> Result<(), ApiError> {
    api_utils::send_json_no_content(session, Verb::Patch, ME, dto).await
}

pub async fn change_password(session: &Session, dto: &ChangePasswordDto) -> Result<(), ApiError> {
    api_utils::send_json_no_content(session, Verb::Post, "/api/account/password", dto).await
}
