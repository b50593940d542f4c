use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::api_utils::{post_public, ApiError};

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { username, password };
    post_public("/api/auth/login", &request).await
}
