//! Append-only JSONL transcript of a chat run.

use docchat_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Writes every [`ConversationEvent`] as one JSON object per line.
///
/// Records carry `type` and `timestamp` next to the payload fields; a
/// payload that is not an object is nested under `data`. Lines are flushed
/// as they are written, and an existing file is appended to.
pub struct JsonlConversationLogger {
    path: PathBuf,
    out: Mutex<BufWriter<File>>,
}

impl JsonlConversationLogger {
    /// Open the transcript at `path`, or `None` if it cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match open_append(path) {
            Ok(file) => Some(Self {
                path: path.to_path_buf(),
                out: Mutex::new(BufWriter::new(file)),
            }),
            Err(e) => {
                warn!("Conversation log {} unavailable: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn to_record(event: ConversationEvent, timestamp: String) -> Value {
    let mut record = match event.payload {
        Value::Object(fields) => fields,
        other => {
            let mut fields = Map::new();
            fields.insert("data".into(), other);
            fields
        }
    };
    record.insert("type".into(), Value::from(event.kind));
    record.insert("timestamp".into(), Value::from(timestamp));
    Value::Object(record)
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let Ok(line) = serde_json::to_string(&to_record(event, now)) else {
            return;
        };
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!("Failed to write conversation log {}: {}", self.path.display(), e);
        }
    }
}
