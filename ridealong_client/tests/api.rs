use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing, Json, Router};
use pretty_assertions::assert_eq;
use ridealong_client::{
    Banner, ContactApi, ContactApiClient, ContactFormConfig, ContactFormController,
    ContactFormFields, FormState,
};
use ridealong_models::contact::{SubmissionResult, Violation};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

#[derive(Clone)]
struct Endpoint {
    status: StatusCode,
    response: Value,
    received: Arc<Mutex<Vec<Value>>>,
}

async fn contact(endpoint: State<Endpoint>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    endpoint.received.lock().unwrap().push(body);
    (endpoint.status, Json(endpoint.response.clone()))
}

async fn spawn(status: StatusCode, response: Value) -> (Url, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/api/contact", routing::post(contact))
        .with_state(Endpoint {
            status,
            response,
            received: Arc::clone(&received),
        });
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await });
    (format!("http://{addr}/").parse().unwrap(), received)
}

fn jane() -> ContactFormFields {
    ContactFormFields {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        subject: "Partnership enquiry".into(),
        message: "We would like to discuss a pilot.".into(),
    }
}

#[tokio::test]
async fn accepted() {
    let (url, received) = spawn(
        StatusCode::OK,
        json!({ "success": true, "message": "Your message has been sent successfully!" }),
    )
    .await;
    let sut = ContactApiClient::new(&url).unwrap();

    let result = sut.submit(&jane()).await.unwrap();

    assert_eq!(
        result,
        SubmissionResult::Accepted {
            message: "Your message has been sent successfully!".into()
        }
    );
    assert_eq!(
        *received.lock().unwrap(),
        [json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "subject": "Partnership enquiry",
            "message": "We would like to discuss a pilot.",
        })]
    );
}

#[tokio::test]
async fn validation_failed() {
    let (url, _) = spawn(
        StatusCode::BAD_REQUEST,
        json!({
            "success": false,
            "message": "Validation error",
            "errors": [{ "path": "email", "message": "Invalid email address" }],
        }),
    )
    .await;
    let sut = ContactApiClient::new(&url).unwrap();

    let result = sut.submit(&jane()).await.unwrap();

    assert_eq!(
        result,
        SubmissionResult::ValidationFailed {
            violations: vec![Violation::new("email", "Invalid email address")]
        }
    );
}

#[tokio::test]
async fn relay_failed() {
    let (url, _) = spawn(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "success": false, "message": "An error occurred." }),
    )
    .await;
    let sut = ContactApiClient::new(&url).unwrap();

    let result = sut.submit(&jane()).await.unwrap();

    assert_eq!(result, SubmissionResult::RelayFailed);
}

#[tokio::test]
async fn unreachable() {
    let sut = ContactApiClient::new(&"http://127.0.0.1:9/".parse().unwrap()).unwrap();

    let result = sut.submit(&jane()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn controller_round_trip() {
    let (url, received) = spawn(
        StatusCode::OK,
        json!({ "success": true, "message": "Your message has been sent successfully!" }),
    )
    .await;
    let sut = ContactFormController::new(
        ContactApiClient::new(&url).unwrap(),
        ContactFormConfig::default(),
    );
    sut.edit(|fields| *fields = jane());

    let banner = sut.submit().await.unwrap();

    assert!(matches!(banner, Banner::Success { .. }));
    assert_eq!(sut.state(), FormState::Resolved(banner));
    assert_eq!(sut.fields(), ContactFormFields::default());
    assert_eq!(received.lock().unwrap().len(), 1);
}
