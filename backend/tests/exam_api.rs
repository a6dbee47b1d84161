//! End-to-end HTTP tests over the in-memory store and real security adapters.
//!
//! Each test builds the full application (trace middleware, `/api` routes,
//! services, Argon2 hashing and JWT signing) so the request/response contract
//! is exercised exactly as deployed, minus PostgreSQL.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use exam_backend::Trace;
use exam_backend::domain::ports::TokenIssuer;
use exam_backend::domain::{AccessToken, AccountService, TRACE_ID_HEADER, TestService};
use exam_backend::inbound::http::configure;
use exam_backend::inbound::http::state::HttpState;
use exam_backend::outbound::memory::MemoryStore;
use exam_backend::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer, TokenSecret};

const SECRET: &[u8] = b"an-integration-test-secret-of-sufficient-length";

#[fixture]
fn issuer() -> Arc<JwtTokenIssuer> {
    let secret = TokenSecret::from_bytes(SECRET).expect("secret long enough");
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    Arc::new(JwtTokenIssuer::new(
        &secret,
        chrono::Duration::minutes(15),
        clock,
    ))
}

fn http_state(issuer: Arc<JwtTokenIssuer>) -> web::Data<HttpState> {
    let store = Arc::new(MemoryStore::new());
    let auth = Arc::new(AccountService::new(
        store.clone(),
        Arc::new(Argon2PasswordHasher::new()),
        issuer,
    ));
    let tests = Arc::new(TestService::new(
        store.clone(),
        store,
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::new(auth, tests.clone(), tests))
}

/// Dispatch a request against an initialised app and decode the JSON reply.
macro_rules! send {
    ($app:expr, $request:expr $(,)?) => {{
        let response = test::call_service($app, $request.to_request()).await;
        into_parts(response).await
    }};
}

async fn into_parts(response: ServiceResponse) -> (StatusCode, Value) {
    let status = response.status();
    let body = test::read_body_json(response).await;
    (status, body)
}

fn sample_test() -> Value {
    json!({
        "title": "Algebra basics",
        "subject": "Maths",
        "duration": 30,
        "questions": [
            { "text": "1 + 1?", "options": ["1", "2", "3"], "correct_answer": 1 },
            { "text": "2 * 3?", "options": ["5", "6"], "correct_answer": 1 }
        ]
    })
}

#[rstest]
#[actix_web::test]
async fn signup_then_login_issues_verifiable_token(issuer: Arc<JwtTokenIssuer>) {
    let app = test::init_service(
        App::new()
            .app_data(http_state(issuer.clone()))
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    let credentials = json!({ "email": "ada@example.com", "password": "correct horse" });

    let (status, body) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(&credentials),
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["msg"], "User created successfully");

    let (status, body) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&credentials),
    );
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"]
        .as_str()
        .expect("access token string")
        .to_owned();

    let verified = issuer
        .verify(&AccessToken::new(token))
        .expect("token verifies");
    assert_eq!(verified.subject.as_str(), "ada@example.com");
}

#[rstest]
#[actix_web::test]
async fn duplicate_signup_and_bad_login_are_rejected(issuer: Arc<JwtTokenIssuer>) {
    let app = test::init_service(
        App::new()
            .app_data(http_state(issuer))
            .wrap(Trace)
            .configure(configure),
    )
    .await;
    let signup = |password: &str| {
        test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({ "email": "ada@example.com", "password": password }))
    };

    let (status, _) = send!(&app, signup("first"));
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send!(&app, signup("second"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "User already exists");

    let (status, body) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "ada@example.com", "password": "second" })),
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Invalid credentials");

    let (status, body) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "nobody@example.com", "password": "first" })),
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Invalid credentials");
}

#[rstest]
#[actix_web::test]
async fn created_test_is_listed_and_fetched_with_answers(issuer: Arc<JwtTokenIssuer>) {
    let app = test::init_service(
        App::new()
            .app_data(http_state(issuer))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let (status, body) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/test/create")
            .set_json(sample_test()),
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["msg"], "Test created successfully");
    let test_id = body["test_id"].as_str().expect("test id").to_owned();

    let (status, listing) = send!(&app, test::TestRequest::get().uri("/api/test/all"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        listing,
        json!([{
            "id": test_id,
            "title": "Algebra basics",
            "subject": "Maths",
            "duration": 30,
        }])
    );

    let (status, fetched) = send!(
        &app,
        test::TestRequest::get().uri(&format!("/api/test/{test_id}")),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Algebra basics");
    assert_eq!(fetched["questions"], sample_test()["questions"]);
}

#[rstest]
#[case::missing_title(json!({ "questions": [] }))]
#[case::missing_questions(json!({ "title": "T" }))]
#[actix_web::test]
async fn incomplete_test_is_rejected(issuer: Arc<JwtTokenIssuer>, #[case] body: Value) {
    let app =
        test::init_service(App::new().app_data(http_state(issuer)).configure(configure)).await;

    let (status, response) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/test/create")
            .set_json(body),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["msg"], "Invalid test data");
}

#[rstest]
#[case::malformed("not-a-uuid")]
#[case::unknown("7b0c2c3e-8d67-4f0a-9a53-0a4c1ee2a001")]
#[actix_web::test]
async fn unknown_test_is_not_found(issuer: Arc<JwtTokenIssuer>, #[case] test_id: &str) {
    let app = test::init_service(
        App::new()
            .app_data(http_state(issuer))
            .wrap(Trace)
            .configure(configure),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/test/{test_id}"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("trace id header")
        .to_owned();
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["msg"], "Test not found");
    assert_eq!(body["traceId"], header);
}

#[rstest]
#[actix_web::test]
async fn results_are_scoped_to_student_in_submission_order(issuer: Arc<JwtTokenIssuer>) {
    let app =
        test::init_service(App::new().app_data(http_state(issuer)).configure(configure)).await;
    let submit = |student: &str, answers: Value| {
        test::TestRequest::post()
            .uri("/api/test/submit")
            .set_json(json!({
                "test_id": "no-such-test",
                "student_id": student,
                "answers": answers,
            }))
    };

    for (student, answers) in [
        ("s-1", json!([1, 1])),
        ("s-2", json!([0, 0])),
        ("s-1", json!([2, 1])),
    ] {
        let (status, body) = send!(&app, submit(student, answers));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["msg"], "Test submitted successfully");
    }

    let (status, results) =
        send!(&app, test::TestRequest::get().uri("/api/test/results/s-1"));
    assert_eq!(status, StatusCode::OK);
    let answers: Vec<&Value> = results
        .as_array()
        .expect("results array")
        .iter()
        .map(|result| &result["answers"])
        .collect();
    assert_eq!(answers, [&json!([1, 1]), &json!([2, 1])]);
    assert!(
        results
            .as_array()
            .expect("results array")
            .iter()
            .all(|result| result["test_id"] == "no-such-test" && result["student_id"] == "s-1")
    );

    let (status, empty) =
        send!(&app, test::TestRequest::get().uri("/api/test/results/nobody"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!([]));
}

#[rstest]
#[actix_web::test]
async fn submission_without_answers_is_rejected(issuer: Arc<JwtTokenIssuer>) {
    let app =
        test::init_service(App::new().app_data(http_state(issuer)).configure(configure)).await;

    let (status, body) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/test/submit")
            .set_json(json!({ "test_id": "t", "student_id": "s" })),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Invalid submission data");
}

#[rstest]
#[actix_web::test]
async fn oversized_time_spent_is_rejected_and_not_stored(issuer: Arc<JwtTokenIssuer>) {
    let app =
        test::init_service(App::new().app_data(http_state(issuer)).configure(configure)).await;

    let (status, body) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/test/submit")
            .set_json(json!({
                "test_id": "t",
                "student_id": "s",
                "answers": [0],
                "time_spent": 3_000_000_000_u32,
            })),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Invalid submission data");
    assert_eq!(body["code"], "invalid_input");

    let (status, results) = send!(&app, test::TestRequest::get().uri("/api/test/results/s"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results, json!([]));
}

#[rstest]
#[actix_web::test]
async fn banner_is_served_at_root(issuer: Arc<JwtTokenIssuer>) {
    let app =
        test::init_service(App::new().app_data(http_state(issuer)).configure(configure)).await;

    let (status, body) = send!(&app, test::TestRequest::get().uri("/"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Online Examination Backend API" }));
}
