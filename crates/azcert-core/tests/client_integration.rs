//! End-to-end behavior of `ServiceClient` against the scripted transport.

use std::sync::Arc;

use azcert_core::api::{HttpMethod, MockTransport, RequestBody};
use azcert_core::models::{CertificateDraft, EmailMessage, UploadFile};
use azcert_core::search::{CertificateStatus, CertificateView, group_by_name};
use azcert_core::{
    ClientConfig, Clock, ErrorKind, ManualClock, SearchMode, ServiceClient, TransportError,
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

struct Harness {
    client: ServiceClient<Arc<MockTransport>>,
    mock: Arc<MockTransport>,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let mock = Arc::new(MockTransport::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap(),
    ));
    let client = ServiceClient::with_clock(
        ClientConfig::new("https://azinternational-eg.test/api/"),
        mock.clone(),
        clock.clone(),
    );
    Harness { client, mock, clock }
}

fn roster() -> serde_json::Value {
    json!([
        { "srId": 1, "name": "Khaled", "s_N": "AZ-100", "method": 4, "type": 2,
          "startDate": "2024-01-01T00:00:00", "endDate": "2026-01-01T00:00:00",
          "country": "Egypt", "state": "Giza", "streetAddress": "Pyramids Rd" },
        { "srId": 2, "name": "Laila", "s_N": "AZ-101", "method": "3",
          "location": { "country": "UAE", "state": "Dubai", "streetAddress": "" },
          "endDate": "2024-12-31" },
        { "srId": 3, "name": "Khaled", "s_N": "AZ-102", "method": 9 }
    ])
}

#[tokio::test]
async fn write_invalidates_cached_reads() {
    let h = harness();
    h.mock.respond_json(200, &roster());
    h.mock.respond_json(200, &json!([{ "srId": 2, "name": "Laila", "s_N": "AZ-101" }]));
    h.mock.respond_json(200, &json!([{ "srId": 2, "name": "Laila", "s_N": "AZ-101" }]));
    h.mock.respond(200, "");
    h.mock.respond_json(200, &json!([]));

    assert_eq!(h.client.get_all().await.unwrap().len(), 3);
    assert_eq!(h.client.search_by_serial("AZ-101").await.len(), 1);
    assert_eq!(h.client.search_by_name("Laila").await.len(), 1);
    assert_eq!(h.client.cache().len(), 3);

    h.client.delete(2).await.unwrap();
    assert!(h.client.cache().is_empty());

    assert!(h.client.get_all().await.unwrap().is_empty());
    assert_eq!(h.mock.request_count(), 5);
}

#[tokio::test]
async fn upload_refreshes_every_cached_read() {
    let h = harness();
    h.mock.respond_json(200, &roster());
    h.mock.respond_json(200, &json!([{ "srId": 1, "name": "Khaled", "s_N": "AZ-100" }]));
    h.mock.respond(200, "Successfully uploaded 2 certificates");
    h.mock.respond_json(200, &roster());
    h.mock.respond_json(200, &json!([]));

    h.client.get_all().await.unwrap();
    h.client.search_by_name("Khaled").await;
    h.client
        .upload_excel(UploadFile::new("batch.xlsx", vec![0x50, 0x4b]))
        .await
        .unwrap();
    assert!(h.client.cache().is_empty());

    // Both reads go back to the network
    assert_eq!(h.client.get_all().await.unwrap().len(), 3);
    assert!(h.client.search_by_name("Khaled").await.is_empty());
    assert_eq!(h.mock.request_count(), 5);
}

#[tokio::test]
async fn cached_list_expires_after_five_minutes() {
    let h = harness();
    h.mock.respond_json(200, &roster());
    h.mock.respond_json(200, &roster());

    h.client.get_all().await.unwrap();
    h.clock.advance(Duration::minutes(5));
    h.client.get_all().await.unwrap();
    assert_eq!(h.mock.request_count(), 1);

    h.clock.advance(Duration::seconds(1));
    h.client.get_all().await.unwrap();
    assert_eq!(h.mock.request_count(), 2);
}

#[tokio::test]
async fn searches_fail_soft() {
    let h = harness();
    h.mock.respond(404, "Not Found");
    h.mock.respond(500, "Internal Server Error");
    h.mock.fail(TransportError::Network("connection refused".into()));

    assert!(h.client.search_by_name("nobody").await.is_empty());
    assert!(h.client.search_by_name("nobody").await.is_empty());
    assert!(h.client.search_by_serial("AZ-0").await.is_empty());
}

#[tokio::test]
async fn get_by_id_maps_statuses() {
    let h = harness();
    h.mock.respond(404, "");
    h.mock.respond(500, "");
    h.mock.respond(401, "");
    h.mock.respond(418, "");

    let not_found = h.client.get_by_id(77).await.unwrap_err();
    assert_eq!(not_found.kind(), ErrorKind::NotFound);
    assert_eq!(
        not_found.to_string(),
        "Certificate not found. It may have been deleted."
    );

    let server = h.client.get_by_id(77).await.unwrap_err();
    assert_eq!(server.kind(), ErrorKind::Server);
    assert!(server.message().contains("try again later"));

    assert_eq!(h.client.get_by_id(77).await.unwrap_err().kind(), ErrorKind::Permission);
    assert_eq!(h.client.get_by_id(77).await.unwrap_err().kind(), ErrorKind::Retryable);

    let request = h.mock.last_request().unwrap();
    assert_eq!(request.url, "https://azinternational-eg.test/api/Services/getById");
    assert_eq!(request.query_value("id"), Some("77"));
}

#[tokio::test]
async fn create_sends_coerced_payload() {
    let h = harness();
    h.mock.respond(200, "");

    let draft: CertificateDraft = serde_json::from_value(json!({
        "name": " Bob ",
        "s_N": " S1 ",
        "method": "2",
        "location": { "country": "EG" }
    }))
    .unwrap();
    let created = h.client.create(draft).await.unwrap();

    let request = h.mock.last_request().unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(
        request.json_body().unwrap(),
        json!({
            "name": "Bob",
            "s_N": "S1",
            "method": 2,
            "type": 1,
            "startDate": "2025-03-10T12:00:00.000Z",
            "endDate": "2025-03-10T12:00:00.000Z",
            "country": "EG",
            "state": "",
            "streetAddress": ""
        })
    );
    assert_eq!(created.name, "Bob");
    assert_eq!(created.location.country, "EG");
}

#[tokio::test]
async fn upload_accepts_plain_text_acknowledgement() {
    let h = harness();
    h.mock.respond(200, "File uploaded");

    let report = h
        .client
        .upload_excel(UploadFile::new("roster.xlsx", b"PK\x03\x04".to_vec()))
        .await
        .unwrap();

    assert_eq!(
        report.to_value(),
        json!({
            "success": true,
            "message": "File uploaded successfully",
            "addedCount": "multiple",
            "data": "File uploaded"
        })
    );
    let request = h.mock.last_request().unwrap();
    assert!(request.url.ends_with("/Services/UploadExcelFile"));
    assert!(matches!(request.body, RequestBody::Multipart(_)));
}

#[tokio::test]
async fn email_with_empty_body_succeeds() {
    let h = harness();
    h.mock.respond(200, "");

    let message = EmailMessage {
        user_name: "Nour".into(),
        user_email: "nour@example.com".into(),
        subject: "Inspection quote".into(),
        message: "Please call me back.".into(),
    };
    assert_eq!(h.client.send_email(&message).await.unwrap(), json!({ "success": true }));
    assert_eq!(
        h.mock.last_request().unwrap().json_body().unwrap()["userEmail"],
        "nour@example.com"
    );
}

#[tokio::test]
async fn verification_results_render() {
    let h = harness();
    h.mock.respond_json(200, &roster());

    let records = h.client.verify("Khaled", SearchMode::Name).await.unwrap();
    let now = h.clock.now();

    let views: Vec<CertificateView> = records
        .iter()
        .map(|r| CertificateView::from_record(r, now))
        .collect();
    assert_eq!(views[0].display_id, "CERT-1");
    assert_eq!(views[0].title, "Ultrasonic Testing");
    assert_eq!(views[0].location, "Pyramids Rd, Giza, Egypt");
    assert_eq!(views[0].status, CertificateStatus::Active);
    assert_eq!(views[1].location, "Dubai, UAE");
    assert_eq!(views[1].status, CertificateStatus::Expired);
    assert_eq!(views[2].title, "Unknown Method");
    // No end date on file
    assert_eq!(views[2].status, CertificateStatus::Expired);

    let groups = group_by_name(records);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].certificates.len(), 2);
}
