//! Tests for the reqwest transport against a mock server.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scribe_client::{ClientError, HttpNotesApi, NotesApi};

fn note_json(id: &str, title: &str, content: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": content,
        "createdAt": "2024-05-01T09:30:00.000Z"
    })
}

#[tokio::test]
async fn test_list_decodes_notes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            note_json("n1", "First", "one"),
            {
                "id": "n2",
                "title": "Second",
                "content": "two",
                "createdAt": "2024-05-01T09:30:00.000Z",
                "updatedAt": "2024-05-02T10:00:00.000Z"
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = HttpNotesApi::new(mock_server.uri()).unwrap();
    let notes = api.list().await.unwrap();

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, "n1");
    assert!(notes[0].updated_at.is_none());
    assert!(notes[1].updated_at.is_some());
}

#[tokio::test]
async fn test_create_posts_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/notes"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "title": "Hello", "content": "World" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(note_json("n1", "Hello", "World")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = HttpNotesApi::new(mock_server.uri()).unwrap();
    let note = api.create("Hello", "World").await.unwrap();
    assert_eq!(note.id, "n1");
    assert_eq!(note.title, "Hello");
}

#[tokio::test]
async fn test_update_puts_to_item_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/notes/n1"))
        .and(body_json(json!({ "title": "T", "content": "C" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(note_json("n1", "T", "C")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = HttpNotesApi::new(mock_server.uri()).unwrap();
    let note = api.update("n1", "T", "C").await.unwrap();
    assert_eq!(note.content, "C");
}

#[tokio::test]
async fn test_delete_unwraps_removed_note() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/notes/n1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Note deleted",
            "note": note_json("n1", "Gone", "bye")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = HttpNotesApi::new(mock_server.uri()).unwrap();
    let note = api.delete("n1").await.unwrap();
    assert_eq!(note.title, "Gone");
}

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/notes/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Note not found" })),
        )
        .mount(&mock_server)
        .await;

    let api = HttpNotesApi::new(mock_server.uri()).unwrap();
    let err = api.delete("missing").await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Note not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_json_body_uses_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let api = HttpNotesApi::new(mock_server.uri()).unwrap();
    match api.list().await.unwrap_err() {
        ClientError::Status { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpNotesApi::new(format!("http://{}", addr)).unwrap();
    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
