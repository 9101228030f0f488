//! Append-only JSONL writer for orchestration events.
//!
//! Every record is one line: the event payload's fields plus `type`, `seq`
//! (per-process counter) and `timestamp` (RFC 3339, UTC, milliseconds).

use chorus_application::{EventLogger, LogEvent};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct Sink {
    writer: BufWriter<File>,
    seq: u64,
}

/// Event logger appending one JSON object per line.
pub struct JsonlEventLogger {
    sink: Mutex<Sink>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            sink: Mutex::new(Sink {
                writer: BufWriter::new(file),
                seq: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: LogEvent, seq: u64) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("seq".to_string(), Value::from(seq));
        map.insert(
            "timestamp".to_string(),
            Value::from(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        Value::Object(map)
    }
}

impl EventLogger for JsonlEventLogger {
    fn log(&self, event: LogEvent) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };

        let record = Self::record(event, sink.seq);
        sink.seq += 1;

        if let Err(e) = write_line(&mut sink.writer, &record) {
            warn!("Could not write event to {}: {}", self.path.display(), e);
        }
    }
}

fn write_line(writer: &mut BufWriter<File>, record: &Value) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
