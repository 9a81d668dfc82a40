//! Route-level behavior: status codes, redirects and templates.

mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use yatube_shared::ErrorResponse;

use common::{Seed, location, template};
use web_server::configure_app;

#[actix_rt::test]
async fn public_pages_are_available_to_guests() {
    let seed = Seed::new().await;
    let app = test::init_service(App::new().configure(configure_app(seed.state.clone()))).await;

    let cases = [
        ("/".to_string(), "posts/index.html"),
        (
            format!("/group/{}/", seed.group.slug),
            "posts/group_list.html",
        ),
        (
            format!("/profile/{}/", seed.author.username),
            "posts/profile.html",
        ),
        (format!("/posts/{}/", seed.post.id), "posts/post_detail.html"),
    ];

    for (uri, expected) in cases {
        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        assert_eq!(template(&resp), expected, "{uri}");
    }
}

#[actix_rt::test]
async fn templates_are_stable_across_requests() {
    let seed = Seed::new().await;
    let app = test::init_service(App::new().configure(configure_app(seed.state.clone()))).await;

    for _ in 0..3 {
        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(template(&resp), "posts/index.html");

        let page = common::rendered(resp).await;
        assert_eq!(page.template, "posts/index.html");
    }
}

#[actix_rt::test]
async fn create_page_requires_login() {
    let seed = Seed::new().await;
    let app = test::init_service(App::new().configure(configure_app(seed.state.clone()))).await;

    let req = test::TestRequest::get().uri("/create/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/auth/login/?next=/create/");

    let req = test::TestRequest::get()
        .uri("/create/")
        .insert_header(seed.bearer(&seed.author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(template(&resp), "posts/create_post.html");
}

#[actix_rt::test]
async fn edit_page_is_for_the_author_only() {
    let seed = Seed::new().await;
    let app = test::init_service(App::new().configure(configure_app(seed.state.clone()))).await;
    let uri = format!("/posts/{}/edit/", seed.post.id);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/auth/login/?next={uri}"));

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(seed.bearer(&seed.other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), format!("/posts/{}/", seed.post.id));

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(seed.bearer(&seed.author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(template(&resp), "posts/create_post.html");
}

#[actix_rt::test]
async fn unknown_page_is_not_found_for_everyone() {
    let seed = Seed::new().await;
    let app = test::init_service(App::new().configure(configure_app(seed.state.clone()))).await;

    let guest = test::TestRequest::get().uri("/unexisting_page/").to_request();
    let member = test::TestRequest::get()
        .uri("/unexisting_page/")
        .insert_header(seed.bearer(&seed.author))
        .to_request();

    for req in [guest, member] {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let problem: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(problem.status, 404);
        assert_eq!(problem.title, "Not Found");
    }
}

#[actix_rt::test]
async fn unknown_entities_are_not_found() {
    let seed = Seed::new().await;
    let app = test::init_service(App::new().configure(configure_app(seed.state.clone()))).await;

    for uri in [
        "/group/no_such_group/",
        "/profile/nobody/",
        "/posts/999/",
        "/posts/not-a-number/",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }

    // Guests are sent to login before the post is looked up.
    let req = test::TestRequest::get().uri("/posts/999/edit/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);

    let req = test::TestRequest::get()
        .uri("/posts/999/edit/")
        .insert_header(seed.bearer(&seed.author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn invalid_token_is_treated_as_guest() {
    let seed = Seed::new().await;
    let app = test::init_service(App::new().configure(configure_app(seed.state.clone()))).await;

    let req = test::TestRequest::get()
        .uri("/create/")
        .insert_header(("Authorization", "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_rt::test]
async fn health_check_responds() {
    let seed = Seed::new().await;
    let app = test::init_service(App::new().configure(configure_app(seed.state.clone()))).await;

    let req = test::TestRequest::get().uri("/health/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}
