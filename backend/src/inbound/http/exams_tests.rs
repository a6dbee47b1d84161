//! Handler tests for test and result endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::ports::{MockAuthService, MockTestCommand, MockTestQuery};
use crate::domain::{Error, Question, ResultId, StudentId, Test, TestId, TestResult};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

#[fixture]
fn question() -> Question {
    Question {
        text: "Q1".to_owned(),
        options: vec!["A".to_owned(), "B".to_owned()],
        correct_answer: 0,
    }
}

async fn call(
    command: MockTestCommand,
    query: MockTestQuery,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let state = web::Data::new(HttpState::new(
        Arc::new(MockAuthService::new()),
        Arc::new(command),
        Arc::new(query),
    ));
    let app = actix_test::init_service(App::new().app_data(state).configure(configure)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn create_test_forwards_body_and_returns_id() {
    let id = TestId::random();
    let mut command = MockTestCommand::new();
    command
        .expect_create_test()
        .withf(|request| {
            request.title.as_deref() == Some("T")
                && request.duration == Some(30)
                && request
                    .questions
                    .as_ref()
                    .is_some_and(|questions| questions.len() == 1)
        })
        .return_once(move |_| Ok(id));

    let (status, body) = call(
        command,
        MockTestQuery::new(),
        actix_test::TestRequest::post().uri("/api/test/create").set_json(json!({
            "title": "T",
            "duration": 30,
            "questions": [{ "text": "Q1", "options": ["A", "B"], "correct_answer": 0 }],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "msg": "Test created successfully", "test_id": id.to_string() })
    );
}

#[rstest]
#[actix_web::test]
async fn create_test_validation_error_is_bad_request() {
    let mut command = MockTestCommand::new();
    command
        .expect_create_test()
        .return_once(|_| Err(Error::invalid_input("Invalid test data")));

    let (status, body) = call(
        command,
        MockTestQuery::new(),
        actix_test::TestRequest::post()
            .uri("/api/test/create")
            .set_json(json!({ "title": "T" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Invalid test data");
}

#[rstest]
#[actix_web::test]
async fn list_route_is_not_shadowed_by_test_id(question: Question) {
    let summary = Test::new(TestId::random(), "T".to_owned(), None, None, vec![question]).summary();
    let mut query = MockTestQuery::new();
    query.expect_get_test().times(0);
    query
        .expect_list_tests()
        .return_once(move || Ok(vec![summary]));

    let (status, body) = call(
        MockTestCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/test/all"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let entry = &body[0];
    assert_eq!(entry["title"], "T");
    assert!(entry.get("questions").is_none());
    assert!(entry.get("subject").is_none());
}

#[rstest]
#[actix_web::test]
async fn get_test_includes_answer_key(question: Question) {
    let id = TestId::random();
    let test = Test::new(id, "T".to_owned(), Some("Maths".to_owned()), None, vec![question]);
    let mut query = MockTestQuery::new();
    query
        .expect_get_test()
        .withf(move |raw| raw == id.to_string())
        .return_once(move |_| Ok(test));

    let (status, body) = call(
        MockTestCommand::new(),
        query,
        actix_test::TestRequest::get().uri(&format!("/api/test/{id}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id.to_string(),
            "title": "T",
            "subject": "Maths",
            "questions": [{ "text": "Q1", "options": ["A", "B"], "correct_answer": 0 }],
        })
    );
}

#[rstest]
#[actix_web::test]
async fn get_test_not_found() {
    let mut query = MockTestQuery::new();
    query
        .expect_get_test()
        .return_once(|_| Err(Error::not_found("Test not found")));

    let (status, body) = call(
        MockTestCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/test/not-a-uuid"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Test not found");
}

#[rstest]
#[actix_web::test]
async fn submit_test_treats_null_answers_as_absent() {
    let mut command = MockTestCommand::new();
    command
        .expect_submit_test()
        .withf(|request| request.answers.is_none() && request.test_id.as_deref() == Some("t"))
        .return_once(|_| Err(Error::invalid_input("Invalid submission data")));

    let (status, body) = call(
        command,
        MockTestQuery::new(),
        actix_test::TestRequest::post().uri("/api/test/submit").set_json(json!({
            "test_id": "t",
            "student_id": "s",
            "answers": null,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Invalid submission data");
}

#[rstest]
#[actix_web::test]
async fn submit_test_acknowledges() {
    let mut command = MockTestCommand::new();
    command
        .expect_submit_test()
        .withf(|request| request.score == Some(0.75) && request.time_spent == Some(300))
        .return_once(|_| Ok(ResultId::random()));

    let (status, body) = call(
        command,
        MockTestQuery::new(),
        actix_test::TestRequest::post().uri("/api/test/submit").set_json(json!({
            "test_id": "t",
            "student_id": "s",
            "answers": { "0": 1 },
            "score": 0.75,
            "time_spent": 300,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "msg": "Test submitted successfully" }));
}

#[rstest]
#[actix_web::test]
async fn get_results_serialises_each_result() {
    let submitted_at = Utc
        .with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let result = TestResult {
        id: ResultId::random(),
        test_id: "t".to_owned(),
        student_id: StudentId::new("s"),
        answers: json!([1, 0]),
        score: None,
        time_spent: Some(60),
        submitted_at,
    };
    let result_id = result.id;
    let mut query = MockTestQuery::new();
    query
        .expect_get_results()
        .withf(|student| student.as_str() == "s")
        .return_once(move |_| Ok(vec![result]));

    let (status, body) = call(
        MockTestCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/test/results/s"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": result_id.to_string(),
            "test_id": "t",
            "student_id": "s",
            "answers": [1, 0],
            "time_spent": 60,
            "submitted_at": "2026-05-01T12:00:00Z",
        }])
    );
}

#[rstest]
#[actix_web::test]
async fn store_outage_is_service_unavailable() {
    let mut query = MockTestQuery::new();
    query
        .expect_list_tests()
        .return_once(|| Err(Error::service_unavailable("test store unavailable")));

    let (status, body) = call(
        MockTestCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/test/all"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}
