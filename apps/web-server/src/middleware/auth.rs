//! Authentication extractor.

use std::convert::Infallible;
use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use yatube_core::AuthContext;

use crate::state::AppState;

/// Authentication state of the current request.
///
/// Never rejects a request: a missing or unusable bearer token makes the
/// caller anonymous, and the page operations decide what a guest may see.
/// ```ignore
/// async fn create_form(Auth(auth): Auth, state: web::Data<AppState>) -> AppResult<HttpResponse> {
///     let outcome = state.post_service.create_form(&auth).await?;
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Auth(pub AuthContext);

impl FromRequest for Auth {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Auth(resolve(req))))
    }
}

fn resolve(req: &HttpRequest) -> AuthContext {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return AuthContext::anonymous();
    };

    let Some(token) = bearer_token(req) else {
        return AuthContext::anonymous();
    };

    match state.token_service.validate_token(token) {
        Ok(claims) => AuthContext::authenticated(claims.user_id, claims.username),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unusable bearer token");
            AuthContext::anonymous()
        }
    }
}

/// The token of an `Authorization: Bearer <token>` header.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
