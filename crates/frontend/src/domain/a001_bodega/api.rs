use contracts::domain::a001_bodega::aggregate::{
    Bodega, ChatRegistroRequest, ChatRegistroResponse, UpdateBodegaDto,
};
use contracts::system::auth::Session;

use crate::shared::api_utils::{self, ApiError, Verb};

fn path(session: &Session) -> String {
    format!("/api/bodegas/{}", session.slug)
}

/// Profile of the signed-in user's winery.
pub async fn fetch_bodega(session: &Session) -> Result<Bodega, ApiError> {
    api_utils::get_json(session, &path(session)).await
}

pub async fn update_bodega(session: &Session, dto: &UpdateBodegaDto) -> Result<(), ApiError> {
    api_utils::send_json_no_content(session, Verb::Patch, &path(session), dto).await
}

/// One turn of the public registration assistant.
pub async fn chat_registro(request: &ChatRegistroRequest) -> Result<ChatRegistroResponse, ApiError> {
    api_utils::post_public("/api/chat-registro-bodega", request).await
}
