use anchorgate_core::api as core_api;

use crate::audit::JsonlAuditSink;
use crate::store::JsonFileStateStore;

pub fn build_store(cfg: &core_api::AppConfig) -> Box<dyn core_api::StateStore> {
    Box::new(JsonFileStateStore::new(cfg))
}

/// The JSONL sink when auditing is enabled, otherwise a no-op. An audit log
/// that cannot be opened degrades to the no-op sink.
pub fn build_audit(cfg: &core_api::AppConfig) -> Box<dyn core_api::DecisionSink> {
    if !cfg.audit.enabled {
        return Box::new(core_api::NoopSink);
    }
    let path = cfg.audit_path();
    match JsonlAuditSink::open(&path) {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            tracing::warn!(
                target: "anchorgate.audit",
                path = %path.display(),
                error = %format!("{e:#}"),
                "audit log unavailable, decisions will not be recorded"
            );
            Box::new(core_api::NoopSink)
        }
    }
}
