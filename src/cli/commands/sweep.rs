use crate::audit::AuditLog;
use crate::cli::commands::ask_confirmation;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{HourAssignment, Principal};
use crate::repo::{HoursLedger, RubroRepository, WorkerRepository};
use crate::store;
use crate::ui::messages::{info, success, warning};

fn print_orphans(label: &str, rows: &[HourAssignment]) {
    if rows.is_empty() {
        info(format!("No hour assignments {}.", label));
        return;
    }

    warning(format!("Found {} assignment(s) {}:", rows.len(), label));
    for h in rows {
        println!(
            "  ID {}: worker_id={}, rubro_id={}, {}h ({})",
            h.id, h.worker_id, h.rubro_id, h.hours, h.year
        );
    }
}

pub fn handle(cfg: &Config, who: &Principal, purge: bool, yes: bool) -> AppResult<()> {
    let backend = store::open_backend(cfg)?;
    let audit = AuditLog::new(backend.as_ref());
    let workers = WorkerRepository::new(backend.as_ref(), &audit);
    let rubros = RubroRepository::new(backend.as_ref(), &audit);
    let ledger = HoursLedger::new(backend.as_ref(), &workers, &rubros, &audit);

    let report = ledger.sweep(who, false)?;
    print_orphans("without a worker", &report.missing_worker);
    print_orphans("without a rubro", &report.missing_rubro);

    if report.is_clean() {
        success("No orphaned hour assignments. Store is clean.");
        return Ok(());
    }

    if !purge {
        info("Run with --purge to remove the orphaned rows.");
        return Ok(());
    }

    let prompt = format!(
        "Delete {} orphaned hour assignment(s)? This action is irreversible.",
        report.orphan_ids().len()
    );
    if !yes && !ask_confirmation(&prompt) {
        info("Operation cancelled.");
        return Ok(());
    }

    let purged = ledger.sweep(who, true)?;
    success(format!("Removed {} orphaned row(s).", purged.purged));
    Ok(())
}
