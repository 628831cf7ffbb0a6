//! HTTP-level tests for the tag resources over stub repositories.

mod support;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::json;
use uuid::Uuid;

use backend::domain::TagKind;
use backend::server::api_scope;
use support::{StubApplicationRepository, StubTagRepository, empty_state, state_with, tag};

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .service(api_scope()),
        )
        .await
    };
}

#[actix_rt::test]
async fn every_tag_collection_is_mounted() {
    let app = init_app!(empty_state());

    for path in [
        "/api/v1/categories",
        "/api/v1/platforms",
        "/api/v1/accessibilities",
    ] {
        let response =
            test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["count"], 0);
    }
}

#[actix_rt::test]
async fn category_crud_round_trips() {
    let app = init_app!(empty_state());

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/categories")
            .set_json(json!({
                "slug": "culture",
                "name": {"fi": "Kulttuuri", "en": "Culture"}
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: serde_json::Value = test::read_body_json(created).await;
    let id = body["id"].as_str().expect("id present").to_owned();
    assert_eq!(body["slug"], "culture");
    assert_eq!(body["name"]["fi"], "Kulttuuri");
    assert_eq!(body["applications"], json!([]));

    let listed = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/categories").to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(listed).await;
    assert_eq!(body["count"], 1);

    let renamed = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/categories/{id}"))
            .set_json(json!({"slug": "culture", "name": {"en": "Culture & Arts"}}))
            .to_request(),
    )
    .await;
    assert_eq!(renamed.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(renamed).await;
    assert_eq!(body["name"]["en"], "Culture & Arts");
    assert!(body["name"]["fi"].is_null());

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/categories/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/categories/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn tag_detail_links_referencing_applications() {
    let application_id = Uuid::new_v4();
    let seeded = tag("screen-reader", "Screen reader", vec![application_id]);
    let id = seeded.id();
    let tags = StubTagRepository::with_tags(vec![(TagKind::Accessibility, seeded)]);
    let app = init_app!(state_with(StubApplicationRepository::default(), tags));

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/accessibilities/{id}"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(response).await;
    let applications = body["applications"].as_array().expect("applications array");
    assert_eq!(applications.len(), 1);
    let link = applications[0].as_str().expect("application link");
    assert!(link.ends_with(&format!("/api/v1/applications/{application_id}")));
}

#[actix_rt::test]
async fn tags_of_one_kind_do_not_leak_into_another() {
    let seeded = tag("android", "Android", vec![]);
    let tags = StubTagRepository::with_tags(vec![(TagKind::Platform, seeded)]);
    let app = init_app!(state_with(StubApplicationRepository::default(), tags));

    let platforms = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/platforms").to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(platforms).await;
    assert_eq!(body["count"], 1);

    let categories = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/categories").to_request(),
    )
    .await;
    let body: serde_json::Value = test::read_body_json(categories).await;
    assert_eq!(body["count"], 0);
}

#[actix_rt::test]
async fn malformed_window_is_rejected() {
    let app = init_app!(empty_state());

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/platforms?limit=0")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_rt::test]
async fn malformed_tag_slug_is_rejected() {
    let app = init_app!(empty_state());

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/platforms")
            .set_json(json!({"slug": "Not Valid"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
