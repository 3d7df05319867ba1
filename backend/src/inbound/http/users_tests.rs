//! Tests for sign-in handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};

use crate::domain::UserRegistry;
use crate::domain::hash_password;
use crate::domain::ports::InMemoryDocumentStore;
use crate::inbound::http::test_utils::{location, session_cookie, test_app, test_state};

#[fixture]
fn registry() -> UserRegistry {
    let hash = hash_password("secret").expect("hash password");
    [("admin".to_owned(), hash)].into_iter().collect()
}

fn store() -> Arc<InMemoryDocumentStore> {
    Arc::new(InMemoryDocumentStore::default())
}

#[rstest]
#[actix_rt::test]
async fn sign_in_form_renders() {
    let app =
        actix_test::init_service(test_app(test_state(store(), UserRegistry::default()))).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/users/signin")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = actix_test::read_body(res).await;
    assert!(String::from_utf8_lossy(&body).contains(r#"name="password" type="password""#));
}

#[rstest]
#[actix_rt::test]
async fn successful_sign_in_welcomes_and_signs_out(registry: UserRegistry) {
    let app = actix_test::init_service(test_app(test_state(store(), registry))).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users/signin")
            .set_form([("username", "admin"), ("password", "secret")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/");

    let index = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/")
            .cookie(session_cookie(&res))
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&index);
    let body = String::from_utf8(actix_test::read_body(index).await.to_vec()).expect("utf-8");
    assert!(body.contains("Welcome!"));
    assert!(body.contains("Signed in as admin."));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users/signout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    let index = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/")
            .cookie(session_cookie(&res))
            .to_request(),
    )
    .await;
    let body = String::from_utf8(actix_test::read_body(index).await.to_vec()).expect("utf-8");
    assert!(body.contains("You have been signed out."));
    assert!(!body.contains("Signed in as"));
}

#[rstest]
#[case("admin", "wrong")]
#[case("ghost", "secret")]
#[case("admin", "")]
#[actix_rt::test]
async fn failed_sign_in_rerenders_with_username(
    registry: UserRegistry,
    #[case] username: &str,
    #[case] password: &str,
) {
    let app = actix_test::init_service(test_app(test_state(store(), registry))).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users/signin")
            .set_form([("username", username), ("password", password)])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = String::from_utf8(actix_test::read_body(res).await.to_vec()).expect("utf-8");
    assert!(body.contains("Invalid credentials"));
    assert!(body.contains(&format!(r#"value="{username}""#)));
}
