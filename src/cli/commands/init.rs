use crate::audit::AuditLog;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{HourAssignment, Principal, Rubro, Worker};
use crate::repo::{HoursLedger, RubroRepository, WorkerRepository};
use crate::store::{self, COL_AUDIT, COL_HOURS, COL_RUBROS, COL_WORKERS, Collection};
use crate::ui::messages::{info, success, warning};

pub fn handle(cfg: &Config, who: &Principal, demo: bool, skip_config: bool) -> AppResult<()> {
    if !skip_config {
        cfg.save()?;
        success(format!("Config file: {:?}", Config::config_file()));
    }

    let backend = store::open_backend(cfg)?;

    // Loading initializes each collection if it is absent.
    Collection::<Worker>::new(backend.as_ref(), COL_WORKERS).load()?;
    Collection::<Rubro>::new(backend.as_ref(), COL_RUBROS).load()?;
    Collection::<HourAssignment>::new(backend.as_ref(), COL_HOURS).load()?;
    Collection::<crate::audit::AuditEntry>::new(backend.as_ref(), COL_AUDIT).load()?;

    success(format!(
        "Collections initialized ({} backend)",
        cfg.backend.as_str()
    ));

    if demo {
        let audit = AuditLog::new(backend.as_ref());
        let workers = WorkerRepository::new(backend.as_ref(), &audit);
        let rubros = RubroRepository::new(backend.as_ref(), &audit);
        let ledger = HoursLedger::new(backend.as_ref(), &workers, &rubros, &audit);

        if !workers.all()?.is_empty() {
            warning("Demo data skipped: workers already exist.");
            return Ok(());
        }

        let juan = workers.create(
            who,
            "Juan Pérez",
            "juan@empresa.com",
            Some("+51999111222".into()),
            Some("Ingeniería".into()),
            None,
        )?;
        let maria = workers.create(
            who,
            "María García",
            "maria@empresa.com",
            Some("+51999333444".into()),
            Some("Diseño".into()),
            None,
        )?;

        let desarrollo = rubros.create(who, "Desarrollo", Some("Desarrollo de software".into()))?;
        let diseno = rubros.create(who, "Diseño", Some("Diseño gráfico".into()))?;
        let consultoria = rubros.create(who, "Consultoría", Some("Consultoría técnica".into()))?;
        rubros.create(who, "Capacitación", Some("Capacitaciones".into()))?;

        ledger.assign(who, juan, desarrollo, 20.0, None)?;
        ledger.assign(who, juan, diseno, 10.0, None)?;
        ledger.assign(who, maria, desarrollo, 15.0, None)?;
        ledger.assign(who, maria, consultoria, 5.0, None)?;

        success("Demo data seeded: 2 workers, 4 rubros, 4 assignments.");
    } else {
        info("Run 'rubrohours init --demo' to seed sample data.");
    }

    Ok(())
}
