mod harness;

use harness::server::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn a_complete_booking_is_created() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server
        .client()
        .post(server.url("/workTimes"))
        .json(&json!({
            "employee": 1,
            "date": "2014-07-01",
            "startTime": "09:00",
            "endTime": "17:30",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["employee"], 1);
    assert_eq!(body["date"], "2014-07-01");
    assert_eq!(body["startTime"], "09:00");
    assert_eq!(body["endTime"], "17:30");
}

#[tokio::test]
async fn binding_failures_come_back_keyed_by_field_name() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server
        .client()
        .post(server.url("/workTimes"))
        .json(&json!({
            "employee": "one",
            "date": "01.07.2014",
            "startTime": "09:00",
            "endTime": "17:30",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    let fields = body.as_object().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(body["employee"]["rejectedValue"], "one");
    assert_eq!(body["employee"]["message"], "must be an employee id");
    assert_eq!(body["date"]["message"], "must match yyyy-MM-dd");
    // Binding does not know the owning entity
    assert!(body["date"].get("entity").is_none());
}

#[tokio::test]
async fn a_missing_payload_reports_every_field() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server
        .client()
        .post(server.url("/workTimes"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["date", "employee", "endTime", "startTime"]);
}

#[tokio::test]
async fn a_booking_that_ends_before_it_starts_is_rejected() {
    let server = TestServer::start_default().await.unwrap();

    let resp = server
        .client()
        .post(server.url("/workTimes"))
        .json(&json!({
            "employee": 1,
            "date": "2014-07-01",
            "startTime": "17:30",
            "endTime": "09:00",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body.as_object().unwrap().len(), 1);
    assert_eq!(body["endTime"]["message"], "must be after startTime");
}
