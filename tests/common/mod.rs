use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temp workspace with a `metadata/` and a `sessions/` directory
#[allow(dead_code)]
pub struct Workspace {
    pub root: TempDir,
    pub metadata_dir: PathBuf,
    pub sessions_dir: PathBuf,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("failed to create tempdir");
        let metadata_dir = root.path().join("metadata");
        let sessions_dir = root.path().join("sessions");
        fs::create_dir_all(&metadata_dir).expect("failed to create metadata dir");
        fs::create_dir_all(&sessions_dir).expect("failed to create sessions dir");
        Self {
            root,
            metadata_dir,
            sessions_dir,
        }
    }

    /// Write a record as `<session_id>.json`
    pub fn write_record(&self, record: Value) -> PathBuf {
        let id = record["session_id"]
            .as_str()
            .expect("record needs a session_id")
            .to_string();
        let path = self.metadata_dir.join(format!("{}.json", id));
        fs::write(&path, serde_json::to_string_pretty(&record).unwrap())
            .expect("failed to write record");
        path
    }

    /// Write raw text into the metadata directory
    pub fn write_raw(&self, name: &str, content: &str) -> PathBuf {
        let path = self.metadata_dir.join(name);
        fs::write(&path, content).expect("failed to write raw metadata");
        path
    }

    /// Write raw bytes into the metadata directory
    pub fn write_bytes(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.metadata_dir.join(name);
        fs::write(&path, content).expect("failed to write raw metadata");
        path
    }

    /// Write a transcript into the sessions directory
    pub fn write_body(&self, name: &str, content: &str) -> PathBuf {
        let path = self.sessions_dir.join(name);
        fs::write(&path, content).expect("failed to write session body");
        path
    }
}

#[allow(dead_code)]
pub fn record(id: &str, name: &str, timestamp: &str) -> Value {
    json!({
        "session_id": id,
        "session_name": name,
        "timestamp": timestamp,
    })
}
