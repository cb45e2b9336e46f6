use crate::audit::AuditLog;
use crate::cli::parser::RubroAction;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{Principal, RubroPatch};
use crate::repo::RubroRepository;
use crate::store;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(action: &RubroAction, cfg: &Config, who: &Principal) -> AppResult<()> {
    let backend = store::open_backend(cfg)?;
    let audit = AuditLog::new(backend.as_ref());
    let repo = RubroRepository::new(backend.as_ref(), &audit);

    match action {
        RubroAction::Add { name, desc } => {
            let id = repo.create(who, name, desc.clone())?;
            success(format!("Rubro created: ID {}, {}", id, name));
        }

        RubroAction::List { all } => {
            let rubros = repo.list(!all)?;

            if rubros.is_empty() {
                info("No rubros found.");
                return Ok(());
            }

            let mut t = Table::new(vec![
                Column::right("ID", 4),
                Column::left("Name", 20),
                Column::left("Description", 32),
                Column::left("Active", 6),
            ]);
            for r in &rubros {
                t.add_row(vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.description.clone().unwrap_or_default(),
                    if r.active { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", t.render());
        }

        RubroAction::Update {
            id,
            name,
            desc,
            active,
        } => {
            let patch = RubroPatch {
                name: name.clone(),
                description: desc.clone(),
                active: *active,
            };
            if patch.is_empty() {
                info("Nothing to update.");
                return Ok(());
            }
            repo.update(who, *id, &patch)?;
            success(format!("Rubro {} updated.", id));
        }

        RubroAction::Del { id } => {
            repo.deactivate(who, *id)?;
            success(format!(
                "Rubro {} deactivated (historical assignments keep referencing it).",
                id
            ));
        }
    }

    Ok(())
}
