//! Service client tests against a mocked backend.

use calendme_core::{ColumnMapping, ColumnRole, Event, NewEvent, ServiceClient, ServiceError};
use calendme_core::time::parse_date;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn parse_natural_language_returns_event_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/parse_nl")
        .match_body(Matcher::Json(json!({"input": "Monday 10am Team Meeting for 2 hours"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "event": {
                    "title": "Team Meeting",
                    "date": "2025-01-06",
                    "startTime": "10:00",
                    "endTime": "12:00",
                    "duration": 120,
                    "reminder": 15
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ServiceClient::new(&server.url()).unwrap();
    let parsed = client
        .parse_natural_language("Monday 10am Team Meeting for 2 hours")
        .await
        .unwrap();

    assert_eq!(parsed.title, "Team Meeting");
    assert_eq!(parsed.date, parse_date("2025-01-06").unwrap());
    assert_eq!(parsed.start_time.to_string(), "10:00");
    assert_eq!(parsed.end_time.to_string(), "12:00");
    assert_eq!(parsed.reminder, Some(15));
    mock.assert_async().await;
}

#[tokio::test]
async fn parse_failure_surfaces_service_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/parse_nl")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "error": "Could not find a time"}"#)
        .create_async()
        .await;

    let client = ServiceClient::new(&server.url()).unwrap();
    let err = client.parse_natural_language("lunch").await.unwrap_err();
    match err {
        ServiceError::Rejected { status, message, .. } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Could not find a time");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_parse_body_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/parse_nl")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let client = ServiceClient::new(&server.url()).unwrap();
    let err = client.parse_natural_language("lunch").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidResponse { .. }));
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let client = ServiceClient::new("http://127.0.0.1:1").unwrap();
    let err = client.parse_natural_language("lunch").await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport { .. }));
}

#[tokio::test]
async fn parse_file_uploads_multipart_and_reads_rows() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_header("content-type", Matcher::Regex("multipart/form-data".into()))
        .match_body(Matcher::Regex("exams.csv".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "raw_rows": [
                    ["Course", "Title", "Date", "Time"],
                    ["CS101", "Midterm", "2025-01-10", "09:00"]
                ],
                "filename": "exams.csv"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ServiceClient::new(&server.url()).unwrap();
    let table = client
        .parse_file("exams.csv", b"Course,Title,Date,Time\n".to_vec())
        .await
        .unwrap();
    assert_eq!(table.filename, "exams.csv");
    assert_eq!(table.raw_rows.len(), 2);
    assert_eq!(table.raw_rows[1][0], "CS101");
    mock.assert_async().await;
}

#[tokio::test]
async fn parse_file_error_body_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/upload")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Unsupported file type"}"#)
        .create_async()
        .await;

    let client = ServiceClient::new(&server.url()).unwrap();
    let err = client.parse_file("notes.txt", b"hello".to_vec()).await.unwrap_err();
    match err {
        ServiceError::Rejected {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Unsupported file type");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn process_rows_sends_mapping_and_filters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/process")
        .match_body(Matcher::Json(json!({
            "raw_rows": [["CS101", "Midterm", "2025-01-10", "09:00"]],
            "mapping": {"course": 0, "title": 1, "date": 2, "time": 3},
            "filters": "CS"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"events": [{
                "course": "CS101", "title": "Midterm", "date": "2025-01-10",
                "time": "09:00", "location": ""
            }]})
            .to_string(),
        )
        .create_async()
        .await;

    let mapping = ColumnMapping::new()
        .with(ColumnRole::Course, 0)
        .with(ColumnRole::Title, 1)
        .with(ColumnRole::Date, 2)
        .with(ColumnRole::Time, 3);
    let rows = vec![vec![
        "CS101".to_string(),
        "Midterm".to_string(),
        "2025-01-10".to_string(),
        "09:00".to_string(),
    ]];

    let client = ServiceClient::new(&server.url()).unwrap();
    let processed = client.process_rows(&rows, &mapping, "CS").await.unwrap();
    assert_eq!(processed.len(), 1);
    assert_eq!(processed[0].display_title(), "CS101 - Midterm");
    mock.assert_async().await;
}

#[tokio::test]
async fn generate_ics_returns_raw_bytes() {
    let ics = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate_ics")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""title":"Math""#.into()),
            Matcher::Regex(r#""startTime":"09:00""#.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/calendar")
        .with_body(ics)
        .create_async()
        .await;

    let event = Event::new(NewEvent::new(
        "Math",
        parse_date("2024-01-10").unwrap(),
        "09:00".parse().unwrap(),
        "10:00".parse().unwrap(),
    ));
    let client = ServiceClient::new(&server.url()).unwrap();
    let bytes = client.generate_ics(&[event]).await.unwrap();
    assert_eq!(bytes, ics.as_bytes());
    mock.assert_async().await;
}

#[tokio::test]
async fn generate_ics_failure_uses_error_field() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/generate_ics")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Failed to generate ICS: boom"}"#)
        .create_async()
        .await;

    let client = ServiceClient::new(&server.url()).unwrap();
    let err = client.generate_ics(&[]).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Rejected { status: 500, ref message, .. } if message.contains("boom")
    ));
}
