use crate::audit::AuditLog;
use crate::cli::commands::ask_confirmation;
use crate::cli::parser::WorkerAction;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Principal, WorkerPatch, WorkerStatus};
use crate::repo::WorkerRepository;
use crate::store;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(action: &WorkerAction, cfg: &Config, who: &Principal) -> AppResult<()> {
    let backend = store::open_backend(cfg)?;
    let audit = AuditLog::new(backend.as_ref());
    let repo = WorkerRepository::new(backend.as_ref(), &audit);

    match action {
        WorkerAction::Add {
            name,
            email,
            phone,
            area,
            photo,
        } => {
            let id = repo.create(
                who,
                name,
                email,
                phone.clone(),
                area.clone(),
                photo.clone(),
            )?;
            success(format!("Worker created: ID {}, {}", id, name));
        }

        WorkerAction::List { area, inactive } => {
            let status = if *inactive {
                WorkerStatus::Inactive
            } else {
                WorkerStatus::Active
            };
            let workers = repo.list(area.as_deref(), status)?;

            if workers.is_empty() {
                info(format!("No {} workers found.", status.as_str()));
                return Ok(());
            }

            let mut t = Table::new(vec![
                Column::right("ID", 4),
                Column::left("Name", 24),
                Column::left("Email", 28),
                Column::left("Area", 16),
                Column::left("Phone", 14),
                Column::left("Status", 8),
            ]);
            for w in &workers {
                t.add_row(vec![
                    w.id.to_string(),
                    w.name.clone(),
                    w.email.clone(),
                    w.area.clone().unwrap_or_default(),
                    w.phone.clone().unwrap_or_default(),
                    w.status.as_str().to_string(),
                ]);
            }
            print!("{}", t.render());
        }

        WorkerAction::Update {
            id,
            name,
            email,
            phone,
            area,
            photo,
            status,
        } => {
            let status = match status {
                Some(s) => Some(
                    WorkerStatus::from_str(s).ok_or_else(|| AppError::InvalidStatus(s.clone()))?,
                ),
                None => None,
            };
            let patch = WorkerPatch {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                area: area.clone(),
                photo: photo.clone(),
                status,
            };
            if patch.is_empty() {
                info("Nothing to update.");
                return Ok(());
            }
            repo.update(who, *id, &patch)?;
            success(format!("Worker {} updated.", id));
        }

        WorkerAction::Del { id, hard, yes } => {
            if *hard {
                let prompt = format!(
                    "Permanently delete worker {} and ALL of their hour assignments? This action is irreversible.",
                    id
                );
                if !*yes && !ask_confirmation(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }

                let report = repo.hard_delete(who, *id)?;
                success(format!(
                    "Worker {} removed ({} hour assignment(s) cascaded).",
                    id, report.hours_removed
                ));
            } else {
                repo.deactivate(who, *id)?;
                success(format!("Worker {} deactivated.", id));
            }
        }
    }

    Ok(())
}
