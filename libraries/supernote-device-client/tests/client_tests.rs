//! Tests for the device client.
//!
//! These tests use mock servers standing in for the device's browse
//! server, so no real device is required.

use supernote_device_client::{DeviceClient, DeviceClientError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Render a fake browse page embedding the given `fileList` entries.
fn browse_page(file_list: &serde_json::Value) -> String {
    let payload = serde_json::json!({ "fileList": file_list });
    format!(
        "<html><body><script>\nconst json = '{}';\nrender(json);\n</script></body></html>",
        payload
    )
}

// =============================================================================
// Listing Tests
// =============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_list_root_directory() {
        let mock_server = MockServer::start().await;

        let page = browse_page(&serde_json::json!([
            {"name": "Note", "uri": "/Note", "isDirectory": true},
            {"name": "readme.txt", "uri": "/readme.txt", "size": 42, "date": "2024-01-02 10:00"}
        ]));

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new(mock_server.uri()).unwrap();
        let entries = client.list_directory("/").await.unwrap();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_directory);
        assert_eq!(entries[1].name, "readme.txt");
        assert_eq!(entries[1].size, 42);
        assert_eq!(entries[1].modified.as_deref(), Some("2024-01-02 10:00"));
    }

    #[tokio::test]
    async fn test_list_files_walks_nested_directories() {
        let mock_server = MockServer::start().await;

        let root = browse_page(&serde_json::json!([
            {"name": "Note", "uri": "/Note", "isDirectory": true},
            {"name": "top.txt", "uri": "/top.txt", "size": 1}
        ]));
        let note_dir = browse_page(&serde_json::json!([
            {"name": "Work", "uri": "/Note/Work", "isDirectory": true},
            {"name": "a.note", "uri": "/Note/a.note", "size": 10}
        ]));
        let work_dir = browse_page(&serde_json::json!([
            {"name": "b.note", "uri": "/Note/Work/b.note", "size": 20}
        ]));

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(root))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Note"))
            .respond_with(ResponseTemplate::new(200).set_body_string(note_dir))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Note/Work"))
            .respond_with(ResponseTemplate::new(200).set_body_string(work_dir))
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new(mock_server.uri()).unwrap();
        let files = client.list_files().await.unwrap();

        let uris: Vec<&str> = files.iter().map(|f| f.uri.as_str()).collect();
        assert_eq!(uris, vec!["/top.txt", "/Note/a.note", "/Note/Work/b.note"]);
        assert!(files.iter().all(|f| !f.is_directory));
    }

    #[tokio::test]
    async fn test_plain_page_is_protocol_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><body>login</body></html>"),
            )
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new(mock_server.uri()).unwrap();
        let result = client.list_directory("/").await;

        match result.unwrap_err() {
            DeviceClientError::Protocol(_) => {}
            e => panic!("Expected Protocol error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_server_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let client = DeviceClient::new(mock_server.uri()).unwrap();
        let result = client.list_directory("/").await;

        match result.unwrap_err() {
            DeviceClientError::DeviceError { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("Internal Server Error"));
            }
            e => panic!("Expected DeviceError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unreachable_device() {
        let client = DeviceClient::new("http://127.0.0.1:1").unwrap();
        let result = client.list_directory("/").await;

        let err = result.unwrap_err();
        assert!(err.is_transient(), "transport failure should be transient");
    }
}

// =============================================================================
// Download Tests
// =============================================================================

mod download {
    use super::*;

    #[tokio::test]
    async fn test_download_writes_file() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Note/a.note"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"note body".to_vec()))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.note");

        let client = DeviceClient::new(mock_server.uri()).unwrap();
        let mut reported: u64 = 0;
        client
            .download_file("/Note/a.note", &dest, |p| reported = p.bytes_received)
            .await
            .unwrap();

        let body = std::fs::read(&dest).unwrap();
        assert_eq!(body, b"note body");
        assert_eq!(reported, 9);
    }

    #[tokio::test]
    async fn test_download_creates_parent_directories() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Note/Work/b.note"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("Note").join("Work").join("b.note");

        let client = DeviceClient::new(mock_server.uri()).unwrap();
        client
            .download_file("/Note/Work/b.note", &dest, |_| {})
            .await
            .unwrap();

        assert!(dest.exists());
    }

    #[tokio::test]
    async fn test_download_missing_file() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/gone.note"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("gone.note");

        let client = DeviceClient::new(mock_server.uri()).unwrap();
        let result = client.download_file("/gone.note", &dest, |_| {}).await;

        match result.unwrap_err() {
            DeviceClientError::DeviceError { status, .. } => {
                assert_eq!(status, 404);
            }
            e => panic!("Expected DeviceError, got: {:?}", e),
        }
    }
}

// =============================================================================
// Error Type Tests
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_transience_classification() {
        assert!(DeviceClientError::DeviceUnreachable("timeout".into()).is_transient());
        assert!(DeviceClientError::DeviceError {
            status: 503,
            message: String::new()
        }
        .is_transient());

        assert!(!DeviceClientError::Protocol("bad page".into()).is_transient());
        assert!(!DeviceClientError::DeviceError {
            status: 404,
            message: String::new()
        }
        .is_transient());
        assert!(!DeviceClientError::InvalidUrl("no scheme".into()).is_transient());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeviceClientError>();
    }
}
