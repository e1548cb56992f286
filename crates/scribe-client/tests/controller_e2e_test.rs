//! Controller against a real scribe-api server on an ephemeral port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;

use scribe_api::{create_router, ApiConfig, AppState};
use scribe_client::{HttpNotesApi, NotesController, Notifier};
use scribe_db::Database;

#[derive(Clone, Default)]
struct SharedAlerts(Arc<Mutex<Vec<String>>>);

impl SharedAlerts {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl Notifier for SharedAlerts {
    fn alert(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

async fn spawn_server() -> (String, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = ApiConfig {
        notes_file: dir.path().join("notes.json"),
        public_dir: dir.path().join("public"),
        ..ApiConfig::default()
    };
    let db = Database::open(&config.notes_file);
    let router = create_router(AppState::new(db), &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), dir)
}

#[tokio::test]
async fn test_controller_round_trip() {
    let (base_url, _dir) = spawn_server().await;
    let alerts = SharedAlerts::default();
    let mut ctl = NotesController::new(HttpNotesApi::new(&base_url).unwrap(), alerts.clone());

    assert!(ctl.load().await);
    assert!(ctl.notes().is_empty());

    assert!(ctl.submit(" Shopping ", "milk").await);
    assert!(ctl.submit("Work", "Report").await);
    assert_eq!(ctl.notes()[0].title, "Work");
    assert_eq!(ctl.notes()[1].title, "Shopping");

    // A fresh controller sees what the first one stored.
    let mut other = NotesController::new(HttpNotesApi::new(&base_url).unwrap(), alerts.clone());
    assert!(other.load().await);
    assert_eq!(other.notes().len(), 2);

    other.set_search("MIL");
    let visible = other.visible_notes();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].title, "Shopping");

    // Keep the edit timestamp strictly after the second note's creation.
    tokio::time::sleep(Duration::from_millis(5)).await;
    let id = ctl.notes()[1].id.clone();
    ctl.select(&id);
    assert!(ctl.submit("Shopping", "milk, eggs").await);
    let edited = ctl.notes().iter().find(|n| n.id == id).unwrap();
    assert_eq!(edited.content, "milk, eggs");
    assert!(edited.updated_at.is_some());
    assert_eq!(ctl.visible_notes()[0].id, id);
    assert!(ctl.rows()[0].meta.starts_with("Updated: "));

    assert!(ctl.delete(&id).await);
    assert_eq!(ctl.notes().len(), 1);

    // The other controller's stale copy deletes cleanly through the 404 path.
    assert!(other.delete(&id).await);
    assert_eq!(other.notes().len(), 1);

    assert!(alerts.take().is_empty());
}

#[tokio::test]
async fn test_update_of_removed_note_alerts() {
    let (base_url, _dir) = spawn_server().await;
    let alerts = SharedAlerts::default();
    let mut ctl = NotesController::new(HttpNotesApi::new(&base_url).unwrap(), alerts.clone());
    let mut other = NotesController::new(HttpNotesApi::new(&base_url).unwrap(), alerts.clone());

    assert!(ctl.submit("Draft", "text").await);
    let id = ctl.notes()[0].id.clone();

    assert!(other.load().await);
    assert!(other.delete(&id).await);

    ctl.select(&id);
    assert!(!ctl.submit("Draft", "more text").await);
    assert_eq!(ctl.notes()[0].content, "text");
    assert_eq!(alerts.take(), vec!["Error updating note".to_string()]);
}
