#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};

use common::{FakeBackend, body_text, csrf_token, remember_cookie, start_backend, with_cookie};

#[actix_web::test]
async fn test_landing_offers_existing_or_new() {
    let backend = start_backend(FakeBackend::seeded()).await;
    let app = test_app!(backend.url);

    let resp = test::call_service(&app, TestRequest::get().uri("/attend/s1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains("Bible Study"));
    assert!(html.contains("/attend/s1?mode=existing"));
    assert!(html.contains("/attend/s1?mode=new"));

    backend.stop().await;
}

#[actix_web::test]
async fn test_malformed_session_id_is_404() {
    let backend = start_backend(FakeBackend::seeded()).await;
    let app = test_app!(backend.url);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/attend/s1%2F..").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    backend.stop().await;
}

#[actix_web::test]
async fn test_existing_search_matches_name_or_email() {
    let backend = start_backend(FakeBackend::seeded()).await;
    let app = test_app!(backend.url);

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/attend/s1?mode=existing&q=BOLA%40").to_request(),
    )
    .await;
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains("Bola Ade"));
    assert!(!html.contains("Ada Obi"));

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/attend/s1?mode=existing&q=&member=m1").to_request(),
    )
    .await;
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains(r#"action="/attend/s1/existing""#));
    assert!(html.contains(r#"name="member_id" value="m1""#));

    backend.stop().await;
}

#[actix_web::test]
async fn test_existing_member_check_in_sends_their_details() {
    let backend = start_backend(FakeBackend::seeded()).await;
    let app = test_app!(backend.url);
    let mut jar = None;

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/attend/s1?mode=existing&member=m2").to_request(),
    )
    .await;
    remember_cookie(&mut jar, &resp);
    let token = csrf_token(&body_text(test::read_body(resp).await));

    let req = with_cookie(TestRequest::post().uri("/attend/s1/existing"), &jar)
        .set_form([("csrf_token", token.as_str()), ("member_id", "m2")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains("Success!"));
    assert!(html.contains("Attendance recorded"));

    let posts = backend.posts_to("/api/scan");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["sessionId"], "s1");
    assert_eq!(posts[0]["name"], "Bola Ade");
    assert_eq!(posts[0]["email"], "bola@example.com");
    assert_eq!(posts[0]["phone"], "0802");

    backend.stop().await;
}

#[actix_web::test]
async fn test_new_member_requires_name_email_and_phone() {
    let backend = start_backend(FakeBackend::seeded()).await;
    let app = test_app!(backend.url);
    let mut jar = None;

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/attend/s1?mode=new").to_request(),
    )
    .await;
    remember_cookie(&mut jar, &resp);
    let token = csrf_token(&body_text(test::read_body(resp).await));

    let req = with_cookie(TestRequest::post().uri("/attend/s1/new"), &jar)
        .set_form([
            ("csrf_token", token.as_str()),
            ("name", "Emeka"),
            ("email", ""),
            ("phone", "0810"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains("Name, email, and phone required"));
    // Typed values survive the round trip.
    assert!(html.contains(r#"name="name" value="Emeka""#));
    assert!(html.contains(r#"name="phone" value="0810""#));
    assert!(backend.posts_to("/api/scan").is_empty());

    backend.stop().await;
}

#[actix_web::test]
async fn test_new_member_check_in_registers_them() {
    let backend = start_backend(FakeBackend::seeded()).await;
    let app = test_app!(backend.url);
    let mut jar = None;

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/attend/s1?mode=new").to_request(),
    )
    .await;
    remember_cookie(&mut jar, &resp);
    let token = csrf_token(&body_text(test::read_body(resp).await));

    let req = with_cookie(TestRequest::post().uri("/attend/s1/new"), &jar)
        .set_form([
            ("csrf_token", token.as_str()),
            ("name", "Emeka Nwosu"),
            ("email", "emeka@example.com"),
            ("phone", "0810"),
            ("address", ""),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains("Success!"));

    let posts = backend.posts_to("/api/scan");
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0],
        serde_json::json!({
            "name": "Emeka Nwosu",
            "email": "emeka@example.com",
            "phone": "0810",
            "sessionId": "s1",
        })
    );
    assert_eq!(backend.state.lock().unwrap().members.len(), 4);

    backend.stop().await;
}

#[actix_web::test]
async fn test_check_in_to_unknown_session_reports_failure() {
    let backend = start_backend(FakeBackend::seeded()).await;
    let app = test_app!(backend.url);
    let mut jar = None;

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/attend/gone?mode=new").to_request(),
    )
    .await;
    remember_cookie(&mut jar, &resp);
    let token = csrf_token(&body_text(test::read_body(resp).await));

    let req = with_cookie(TestRequest::post().uri("/attend/gone/new"), &jar)
        .set_form([
            ("csrf_token", token.as_str()),
            ("name", "Emeka"),
            ("email", "emeka@example.com"),
            ("phone", "0810"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains("Something went wrong"));
    assert!(html.contains("Session not found"));

    backend.stop().await;
}
