use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anchorgate_core::api as core_api;
use anyhow::Context;
use serde::Serialize;

#[derive(Serialize)]
struct AuditLine<'a> {
    ts: String,
    #[serde(flatten)]
    record: &'a core_api::AuditRecord,
}

/// Appends one JSON object per gated decision.
pub struct JsonlAuditSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlAuditSink {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create audit directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open audit log {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    fn write_line(&self, record: &core_api::AuditRecord) -> anyhow::Result<()> {
        let line = AuditLine {
            ts: chrono::Utc::now().to_rfc3339(),
            record,
        };
        let mut text = serde_json::to_string(&line).context("serialize audit record")?;
        text.push('\n');
        let mut file = self.file.lock().unwrap_or_else(|p| p.into_inner());
        file.write_all(text.as_bytes())
            .with_context(|| format!("append to {}", self.path.display()))?;
        Ok(())
    }
}

impl core_api::DecisionSink for JsonlAuditSink {
    fn record(&self, record: &core_api::AuditRecord) {
        if let Err(e) = self.write_line(record) {
            tracing::warn!(target: "anchorgate.audit", error = %format!("{e:#}"), "audit write failed");
        }
    }
}
