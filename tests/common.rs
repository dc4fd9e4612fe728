use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use articpad::config::load_config_str;
use articpad::notify::RecordingNotifier;
use articpad::startup::build_client;
use articpad::state::ClientState;
use tempfile::TempDir;

/// A client wired against a mock backend, persisting to a file store in a
/// private temp directory.
pub struct TestClient {
    pub client: ClientState,
    pub notifier: Arc<RecordingNotifier>,
    store_path: PathBuf,
    _dir: TempDir,
}

impl TestClient {
    /// Keys currently in the persistent store.
    pub fn persisted(&self) -> BTreeMap<String, String> {
        read_entries(&self.store_path)
    }
}

fn read_entries(path: &PathBuf) -> BTreeMap<String, String> {
    match fs::read_to_string(path) {
        Ok(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(&raw).expect("store file is valid JSON")
        }
        _ => BTreeMap::new(),
    }
}

pub fn build_test_client(base_url: &str) -> TestClient {
    build_test_client_with(base_url, &[])
}

/// Like [`build_test_client`], with `seed` written to the persistent store
/// before the client starts.
pub fn build_test_client_with(base_url: &str, seed: &[(&str, &str)]) -> TestClient {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store_path = dir.path().join("session.json");
    if !seed.is_empty() {
        let entries: BTreeMap<&str, &str> = seed.iter().copied().collect();
        fs::write(&store_path, serde_json::to_vec(&entries).unwrap()).unwrap();
    }

    let yaml = format!(
        r#"
version: "1.0.0"
api:
  base_url: "{base_url}"
store:
  enabled: true
  type: file
  path: "{}"
logging:
  level: "debug"
  format: "json"
"#,
        store_path.display()
    );
    let config = load_config_str(&yaml).expect("test config should parse");

    let notifier = Arc::new(RecordingNotifier::new());
    let client = build_client(Arc::new(config), notifier.clone()).expect("client should build");

    TestClient {
        client,
        notifier,
        store_path,
        _dir: dir,
    }
}
