//! Integration tests for `BackendClient` using wiremock HTTP mocks.

use std::io::Write;
use std::time::Duration;

use serde_json::json;
use sme_client::{BackendClient, ClientConfig, ClientError};
use sme_core::validate::MAX_UPLOAD_BYTES;
use sme_core::{CoreError, EmailReportRequest, ScheduleFrequency, ScheduleRequest};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> BackendClient {
    BackendClient::new(&ClientConfig::for_base_url(base_url).with_retries(0, 0))
        .expect("client construction should not fail")
}

fn schedule_json(id: i64, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Weekly sales",
        "recipientEmail": "owner@example.com",
        "frequency": "WEEKLY",
        "active": active,
        "createdAt": "2025-01-01T08:00:00",
        "lastRunAt": null,
        "nextRunAt": "2025-01-08T09:00:00"
    })
}

#[tokio::test]
async fn upload_file_sends_multipart_and_parses_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/data/upload"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("Date,Revenue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "File uploaded",
            "sessionId": "sess-1",
            "fileName": "sales.csv",
            "fileSize": 42,
            "rowCount": 2,
            "columnCount": 2,
            "columnNames": ["Date", "Revenue"],
            "basicStatistics": {},
            "insights": [],
            "analysisType": "retail"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Date,Revenue\n2024-01-01,2400").unwrap();

    let client = test_client(&server.uri());
    let response = client.upload_file(file.path()).await.expect("upload should succeed");
    assert_eq!(response.session_id, "sess-1");
    assert_eq!(response.analysis_type, "retail");
    assert_eq!(response.column_names, vec!["Date", "Revenue"]);
}

#[tokio::test]
async fn upload_missing_file_is_io_error() {
    let client = test_client("http://127.0.0.1:9");
    let err = client
        .upload_file(std::path::Path::new("/definitely/not/here.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Io { .. }));
}

#[tokio::test]
async fn upload_rejection_surfaces_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/data/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "CSV file is empty or has no numeric columns"
        })))
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "hello").unwrap();

    let err = test_client(&server.uri())
        .upload_file(file.path())
        .await
        .unwrap_err();
    match err {
        ClientError::Api(message) => assert!(message.contains("numeric columns")),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_rejects_unsupported_extension_without_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/data/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(file, "Date,Revenue").unwrap();

    let err = test_client(&server.uri())
        .upload_file(file.path())
        .await
        .unwrap_err();
    assert!(
        matches!(err, ClientError::Validation(CoreError::Validation { field: "file", .. })),
        "got {err:?}"
    );
}

#[tokio::test]
async fn upload_rejects_files_over_50_mb_without_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/data/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.as_file().set_len(MAX_UPLOAD_BYTES + 1).unwrap();

    let err = test_client(&server.uri())
        .upload_file(file.path())
        .await
        .unwrap_err();
    match err {
        ClientError::Validation(CoreError::Validation { reason, .. }) => {
            assert!(reason.contains("50MB"), "{reason}");
        }
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn get_insights_returns_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/data/insights/sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "type": "trend",
                "title": "Revenue rising",
                "description": "Revenue grew 12%",
                "value": "12%",
                "category": "sales",
                "confidence": 0.8
            }
        ])))
        .mount(&server)
        .await;

    let insights = test_client(&server.uri()).get_insights("sess-1").await.unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].kind, "trend");
}

#[tokio::test]
async fn get_session_maps_404_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/data/session/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let session = test_client(&server.uri()).get_session("gone").await.unwrap();
    assert!(session.is_none());
}

#[tokio::test]
async fn health_is_false_on_server_error_or_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/data/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    assert!(!test_client(&server.uri()).health().await);
    assert!(!test_client("http://127.0.0.1:9").health().await);
}

#[tokio::test]
async fn health_accepts_plain_text_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/data/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Data Analysis Service is healthy"))
        .mount(&server)
        .await;
    assert!(test_client(&server.uri()).health().await);
}

#[tokio::test]
async fn list_schedules_passes_active_only_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schedules"))
        .and(query_param("activeOnly", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([schedule_json(1, true)])))
        .expect(1)
        .mount(&server)
        .await;

    let schedules = test_client(&server.uri()).list_schedules(true).await.unwrap();
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].frequency, ScheduleFrequency::Weekly);
    assert!(schedules[0].last_run_at.is_none());
}

#[tokio::test]
async fn get_schedule_404_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schedules/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(test_client(&server.uri()).get_schedule(99).await.unwrap().is_none());
}

#[tokio::test]
async fn create_schedule_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/schedules"))
        .and(body_json(json!({
            "name": "Weekly sales",
            "recipientEmail": "owner@example.com",
            "frequency": "WEEKLY",
            "active": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Schedule created successfully",
            "schedule": schedule_json(7, true)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ScheduleRequest::new("Weekly sales", "owner@example.com", ScheduleFrequency::Weekly);
    let schedule = test_client(&server.uri()).create_schedule(&request).await.unwrap();
    assert_eq!(schedule.id, 7);
    assert_eq!(schedule.recipient_email, "owner@example.com");
}

#[tokio::test]
async fn create_schedule_validates_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let request = ScheduleRequest::new("Weekly", "not-an-email", ScheduleFrequency::Daily);
    let err = test_client(&server.uri()).create_schedule(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn update_failure_envelope_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/schedules/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Schedule not found: 5"
        })))
        .mount(&server)
        .await;

    let request = ScheduleRequest::new("Monthly", "owner@example.com", ScheduleFrequency::Monthly);
    let err = test_client(&server.uri()).update_schedule(5, &request).await.unwrap_err();
    match err {
        ClientError::Api(message) => assert_eq!(message, "Schedule not found: 5"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn toggle_delete_and_execute_schedule() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/schedules/3/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Schedule paused",
            "schedule": schedule_json(3, false)
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/schedules/3/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Schedule executed successfully"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/schedules/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Schedule deleted successfully"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(!client.toggle_schedule(3).await.unwrap().active);
    let ack = client.execute_schedule(3).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Schedule executed successfully"));
    assert!(client.delete_schedule(3).await.unwrap().success);
}

#[tokio::test]
async fn send_report_email_posts_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reports/email"))
        .and(body_json(json!({
            "email": "owner@example.com",
            "reportData": "Summary",
            "reportType": "analysis"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Report successfully sent to owner@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = EmailReportRequest {
        email: "owner@example.com".to_owned(),
        report_data: "Summary".to_owned(),
        report_type: "analysis".to_owned(),
    };
    let ack = test_client(&server.uri()).send_report_email(&request).await.unwrap();
    assert!(ack.success);
}

#[tokio::test]
async fn bearer_token_is_sent_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schedules"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ClientConfig::for_base_url(&server.uri()).with_retries(0, 0);
    config.api_token = Some("tok-123".to_owned());
    let client = BackendClient::new(&config).unwrap();
    assert!(client.list_schedules(false).await.unwrap().is_empty());
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/schedules"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let client =
        BackendClient::new(&ClientConfig::for_base_url(&server.uri()).with_retries(2, 0)).unwrap();
    let err = client.list_schedules(false).await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus { status: 502, .. }));
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/data/insights/x"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).get_insights("x").await.unwrap_err();
    assert!(matches!(err, ClientError::Deserialize { .. }));
}

#[tokio::test]
async fn toggle_is_sent_once_even_when_the_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/schedules/7/toggle"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "schedule": schedule_json(7, false)}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut config = ClientConfig::for_base_url(&server.uri()).with_retries(2, 10);
    config.request_timeout = Duration::from_millis(100);
    let client = BackendClient::new(&config).unwrap();

    let err = client.toggle_schedule(7).await.unwrap_err();
    assert!(matches!(err, ClientError::Http(ref e) if e.is_timeout()), "got {err:?}");
}

#[tokio::test]
async fn report_email_is_not_repeated_after_a_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reports/email"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        BackendClient::new(&ClientConfig::for_base_url(&server.uri()).with_retries(2, 10)).unwrap();
    let request = EmailReportRequest {
        email: "owner@example.com".to_owned(),
        report_data: "Summary".to_owned(),
        report_type: "analysis".to_owned(),
    };
    let err = client.send_report_email(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus { status: 503, .. }));
}

#[tokio::test]
async fn create_and_execute_schedule_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/schedules"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/schedules/3/execute"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        BackendClient::new(&ClientConfig::for_base_url(&server.uri()).with_retries(2, 10)).unwrap();
    let request = ScheduleRequest::new("Weekly sales", "owner@example.com", ScheduleFrequency::Weekly);
    assert!(client.create_schedule(&request).await.is_err());
    assert!(client.execute_schedule(3).await.is_err());
}
