//! Turning page operation results into HTTP responses.
//!
//! A rendered page is the template identifier plus its context serialized
//! as JSON; the identifier is repeated in the `X-Template` header.

use actix_web::{HttpRequest, HttpResponse, http::header};
use yatube_core::domain::{Author, Group};
use yatube_core::forms::{FieldKind as CoreFieldKind, PostForm};
use yatube_core::views::{Listing, PostCard, Redirect};
use yatube_core::{Outcome, Page, View};
use yatube_shared::dto::{
    AuthorResponse, ChoiceResponse, FieldKind, FieldResponse, FormResponse, GroupResponse,
    PageResponse, PostResponse,
};
use yatube_shared::{PageContext, RenderedPage};

pub const TEMPLATE_HEADER: &str = "X-Template";

pub const LOGIN_PATH: &str = "/auth/login/";

/// 200 with the rendered page.
pub fn render(view: View) -> HttpResponse {
    let page = rendered_page(view);

    HttpResponse::Ok()
        .insert_header((TEMPLATE_HEADER, page.template.clone()))
        .json(page)
}

/// Render the view or send the client where the outcome points.
pub fn respond(outcome: Outcome, req: &HttpRequest) -> HttpResponse {
    match outcome {
        Outcome::Render(view) => render(view),
        Outcome::Redirect(to) => redirect(location(&to, req)),
    }
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Path a redirect points at. Login remembers where the caller was headed.
pub fn location(to: &Redirect, req: &HttpRequest) -> String {
    match to {
        Redirect::Login => format!("{LOGIN_PATH}?next={}", req.path()),
        Redirect::PostDetail(id) => format!("/posts/{id}/"),
        Redirect::Profile(username) => format!("/profile/{username}/"),
    }
}

pub fn rendered_page(view: View) -> RenderedPage {
    RenderedPage {
        template: view.template().to_string(),
        context: page_context(view),
    }
}

fn page_context(view: View) -> PageContext {
    match view {
        View::PostList { listing, page } => {
            let page_obj = page_response(page);
            let (group, author, post_count) = match listing {
                Listing::Index => (None, None, None),
                Listing::Group(group) => (Some(group_response(group)), None, None),
                Listing::Profile { author, post_count } => {
                    (None, Some(author_response(author)), Some(post_count))
                }
            };

            PageContext::PostList {
                page_obj,
                group,
                author,
                post_count,
            }
        }
        View::PostDetail {
            post,
            author_post_count,
        } => PageContext::PostDetail {
            post: post_response(post),
            author_post_count,
        },
        View::PostForm { form, editing } => PageContext::PostForm {
            form: form_response(&form),
            is_edit: editing.is_some(),
            post_id: editing,
        },
    }
}

fn page_response(page: Page<PostCard>) -> PageResponse<PostResponse> {
    PageResponse {
        number: page.number(),
        num_pages: page.num_pages(),
        count: page.count(),
        per_page: page.per_page(),
        has_next: page.has_next(),
        has_previous: page.has_previous(),
        next_page_number: page.next_page_number(),
        previous_page_number: page.previous_page_number(),
        start_index: page.start_index(),
        end_index: page.end_index(),
        object_list: page.into_items().into_iter().map(post_response).collect(),
    }
}

fn post_response(card: PostCard) -> PostResponse {
    PostResponse {
        id: card.post.id,
        text: card.post.text,
        author: author_response(card.author),
        group: card.group.map(group_response),
        created_at: card.post.created_at.to_rfc3339(),
    }
}

pub fn author_response(author: Author) -> AuthorResponse {
    AuthorResponse {
        id: author.id,
        username: author.username,
    }
}

fn group_response(group: Group) -> GroupResponse {
    GroupResponse {
        id: group.id,
        title: group.title,
        slug: group.slug,
        description: group.description,
    }
}

fn form_response(form: &PostForm) -> FormResponse {
    let fields = form
        .fields()
        .iter()
        .map(|field| {
            let (kind, choices) = match &field.kind {
                CoreFieldKind::Char => (FieldKind::Char, Vec::new()),
                CoreFieldKind::Choice { choices } => (
                    FieldKind::Choice,
                    choices
                        .iter()
                        .map(|c| ChoiceResponse {
                            value: c.value.clone(),
                            label: c.label.clone(),
                        })
                        .collect(),
                ),
            };

            FieldResponse {
                name: field.name.to_string(),
                kind,
                label: field.label.to_string(),
                help_text: field.help_text.to_string(),
                required: field.required,
                value: field.value.clone(),
                choices,
                errors: field.errors.clone(),
            }
        })
        .collect();

    FormResponse { fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Utc;
    use yatube_core::Paginator;
    use yatube_core::domain::Post;

    fn card(id: i64) -> PostCard {
        PostCard {
            post: Post {
                id,
                text: format!("post {id}"),
                author_id: 1,
                group_id: Some(2),
                created_at: Utc::now(),
            },
            author: Author {
                id: 1,
                username: "leo".into(),
            },
            group: Some(Group {
                id: 2,
                title: "Cats".into(),
                slug: "cats".into(),
                description: "All about cats".into(),
            }),
        }
    }

    #[test]
    fn test_profile_context() {
        let page = Paginator::default().page((1..=12).map(card).collect(), Some("2"));
        let view = View::PostList {
            listing: Listing::Profile {
                author: Author {
                    id: 1,
                    username: "leo".into(),
                },
                post_count: 12,
            },
            page,
        };

        let rendered = rendered_page(view);
        assert_eq!(rendered.template, "posts/profile.html");
        let PageContext::PostList {
            page_obj,
            group,
            author,
            post_count,
        } = rendered.context
        else {
            panic!("expected a post list context");
        };
        assert_eq!(page_obj.len(), 2);
        assert_eq!(page_obj.number, 2);
        assert_eq!(page_obj.previous_page_number, Some(1));
        assert_eq!(page_obj.object_list[0].id, 11);
        assert!(group.is_none());
        assert_eq!(author.map(|a| a.username), Some("leo".to_string()));
        assert_eq!(post_count, Some(12));
    }

    #[test]
    fn test_form_context_lists_group_choices() {
        let groups = [card(1).group.unwrap()];
        let view = View::PostForm {
            form: PostForm::blank(&groups),
            editing: Some(5),
        };

        let rendered = rendered_page(view);
        assert_eq!(rendered.template, "posts/create_post.html");
        let PageContext::PostForm {
            form,
            is_edit,
            post_id,
        } = rendered.context
        else {
            panic!("expected a form context");
        };
        assert!(is_edit);
        assert_eq!(post_id, Some(5));
        assert_eq!(form.field("text").unwrap().kind, FieldKind::Char);
        let group = form.field("group").unwrap();
        assert_eq!(group.kind, FieldKind::Choice);
        assert_eq!(group.choices[0].value, "2");
        assert_eq!(group.choices[0].label, "Cats");
    }

    #[test]
    fn test_redirect_locations() {
        let req = TestRequest::with_uri("/posts/4/edit/?x=1").to_http_request();

        assert_eq!(location(&Redirect::Login, &req), "/auth/login/?next=/posts/4/edit/");
        assert_eq!(location(&Redirect::PostDetail(4), &req), "/posts/4/");
        assert_eq!(
            location(&Redirect::Profile("leo".into()), &req),
            "/profile/leo/"
        );
    }
}
