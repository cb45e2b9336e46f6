use crate::audit::AuditLog;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::info;

pub fn handle(cfg: &Config, limit: usize) -> AppResult<()> {
    let backend = store::open_backend(cfg)?;
    let audit = AuditLog::new(backend.as_ref());

    let entries = audit.recent(limit)?;
    if entries.is_empty() {
        info("Audit log is empty.");
        return Ok(());
    }

    for e in &entries {
        let record = e
            .record_id
            .map(|id| format!(" #{}", id))
            .unwrap_or_default();
        let detail = e.detail.as_deref().unwrap_or("");
        println!(
            "{}  {} ({})  {} {}{}  {}",
            e.timestamp, e.username, e.role, e.action, e.collection, record, detail
        );
    }
    Ok(())
}
