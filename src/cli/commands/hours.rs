use crate::audit::AuditLog;
use crate::cli::parser::HoursAction;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Principal;
use crate::repo::{HoursLedger, RubroRepository, WorkerRepository};
use crate::store;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(action: &HoursAction, cfg: &Config, who: &Principal) -> AppResult<()> {
    let backend = store::open_backend(cfg)?;
    let audit = AuditLog::new(backend.as_ref());
    let workers = WorkerRepository::new(backend.as_ref(), &audit);
    let rubros = RubroRepository::new(backend.as_ref(), &audit);
    let ledger = HoursLedger::new(backend.as_ref(), &workers, &rubros, &audit);

    match action {
        HoursAction::Assign {
            worker_id,
            rubro_id,
            hours,
            year,
        } => {
            let outcome = ledger.assign(who, *worker_id, *rubro_id, *hours, *year)?;
            match outcome.previous {
                Some(prev) => success(format!(
                    "Updated: worker {}, rubro {}, {}: {}h -> {}h",
                    worker_id, rubro_id, outcome.year, prev, hours
                )),
                None => success(format!(
                    "Assigned: worker {}, rubro {}, {}: {}h",
                    worker_id, rubro_id, outcome.year, hours
                )),
            }
        }

        HoursAction::Show { worker_id, year } => {
            let rows = ledger.hours_for_worker(*worker_id, *year)?;
            let total = ledger.total_hours(*worker_id, *year)?;

            if rows.is_empty() {
                info(format!("No hours assigned to worker {}.", worker_id));
                return Ok(());
            }

            let mut t = Table::new(vec![
                Column::left("Rubro", 20),
                Column::right("Hours", 8),
                Column::right("Year", 6),
            ]);
            for r in &rows {
                t.add_row(vec![
                    r.rubro.clone(),
                    format!("{}", r.hours),
                    r.year.to_string(),
                ]);
            }
            print!("{}", t.render());
            info(format!("Total: {}h", total));
        }

        HoursAction::Area { area, year } => {
            let rows = ledger.area_summary(area, *year)?;

            if rows.is_empty() {
                info(format!("No active workers in area '{}'.", area));
                return Ok(());
            }

            let mut t = Table::new(vec![
                Column::left("Worker", 24),
                Column::right("Total", 8),
                Column::right("Rubros", 7),
                Column::left("Area", 16),
            ]);
            for r in &rows {
                t.add_row(vec![
                    r.worker.clone(),
                    format!("{}", r.total_hours),
                    r.rubro_count.to_string(),
                    r.area.clone(),
                ]);
            }
            print!("{}", t.render());
        }

        HoursAction::Overlimit { limit, year } => {
            let over = ledger.workers_over_limit(*limit, *year)?;

            if over.is_empty() {
                info(format!("No workers over {}h.", limit));
                return Ok(());
            }

            let mut t = Table::new(vec![
                Column::left("Worker", 24),
                Column::right("Total", 8),
            ]);
            for (w, total) in &over {
                t.add_row(vec![w.name.clone(), format!("{}", total)]);
            }
            print!("{}", t.render());
        }
    }

    Ok(())
}
