//! Account handlers: signup and login.

use actix_web::{HttpResponse, web};
use yatube_core::Session;
use yatube_shared::dto::{AuthResponse, LoginRequest, SignupRequest};

use crate::middleware::error::AppResult;
use crate::render::author_response;
use crate::state::AppState;

/// POST /auth/signup/
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state.accounts.signup(&req.username, &req.password).await?;

    Ok(HttpResponse::Created().json(auth_response(session)))
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state.accounts.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(auth_response(session)))
}

fn auth_response(session: Session) -> AuthResponse {
    AuthResponse {
        access_token: session.access_token,
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in,
        user: author_response(session.user),
    }
}
