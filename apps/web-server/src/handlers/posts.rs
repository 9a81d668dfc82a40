//! Post pages: listings, detail, and the create/edit forms.

use std::convert::Infallible;
use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, web};
use serde::Deserialize;
use yatube_core::forms::PostFormInput;

use crate::middleware::auth::Auth;
use crate::middleware::error::AppResult;
use crate::render;
use crate::state::AppState;

/// `?page=<n>` of the paginated listings. Kept raw, the paginator clamps it.
///
/// Never rejects a request: an undecodable query string means no page, and
/// when `page` is repeated the last value wins.
#[derive(Debug, Default)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    fn page(&self) -> Option<&str> {
        self.page.as_deref()
    }

    fn parse(query_string: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query_string)
            .map(web::Query::into_inner)
            .unwrap_or_default();

        Self {
            page: pairs
                .into_iter()
                .rev()
                .find(|(key, _)| key == "page")
                .map(|(_, value)| value),
        }
    }
}

impl FromRequest for PageQuery {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::parse(req.query_string())))
    }
}

/// Submitted post form.
#[derive(Debug, Deserialize)]
pub struct PostFormData {
    text: Option<String>,
    group: Option<String>,
}

impl From<PostFormData> for PostFormInput {
    fn from(data: PostFormData) -> Self {
        PostFormInput {
            text: data.text,
            group: data.group,
        }
    }
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: PageQuery,
) -> AppResult<HttpResponse> {
    let view = state.post_service.index(query.page()).await?;
    Ok(render::render(view))
}

/// GET /group/{slug}/
pub async fn group_list(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: PageQuery,
) -> AppResult<HttpResponse> {
    let view = state.post_service.group_posts(&slug, query.page()).await?;
    Ok(render::render(view))
}

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    username: web::Path<String>,
    query: PageQuery,
) -> AppResult<HttpResponse> {
    let view = state.post_service.profile(&username, query.page()).await?;
    Ok(render::render(view))
}

/// GET /posts/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    post_id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let view = state.post_service.post_detail(post_id.into_inner()).await?;
    Ok(render::render(view))
}

/// GET /create/
pub async fn create_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    Auth(auth): Auth,
) -> AppResult<HttpResponse> {
    let outcome = state.post_service.create_form(&auth).await?;
    Ok(render::respond(outcome, &req))
}

/// POST /create/
pub async fn create_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    Auth(auth): Auth,
    form: web::Form<PostFormData>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .post_service
        .create_post(&auth, form.into_inner().into())
        .await?;
    Ok(render::respond(outcome, &req))
}

/// GET /posts/{post_id}/edit/
pub async fn edit_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    Auth(auth): Auth,
    post_id: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .post_service
        .edit_form(&auth, post_id.into_inner())
        .await?;
    Ok(render::respond(outcome, &req))
}

/// POST /posts/{post_id}/edit/
pub async fn edit_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    Auth(auth): Auth,
    post_id: web::Path<i64>,
    form: web::Form<PostFormData>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .post_service
        .edit_post(&auth, post_id.into_inner(), form.into_inner().into())
        .await?;
    Ok(render::respond(outcome, &req))
}
