//! Rubro repository. Rubros only ever deactivate: ledger rows reference
//! them historically and must stay resolvable for reporting.

use crate::audit::AuditLog;
use crate::errors::{AppError, AppResult};
use crate::models::{Principal, Rubro, RubroPatch};
use crate::store::{COL_RUBROS, Collection, StoreBackend};

pub struct RubroRepository<'a> {
    backend: &'a dyn StoreBackend,
    audit: &'a AuditLog<'a>,
}

impl<'a> RubroRepository<'a> {
    pub fn new(backend: &'a dyn StoreBackend, audit: &'a AuditLog<'a>) -> Self {
        Self { backend, audit }
    }

    fn collection(&self) -> Collection<'a, Rubro> {
        Collection::new(self.backend, COL_RUBROS)
    }

    pub fn create(
        &self,
        who: &Principal,
        name: &str,
        description: Option<String>,
    ) -> AppResult<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::MissingField("name"));
        }

        let col = self.collection();
        let mut doc = col.load()?;

        if doc.records.iter().any(|r| r.name == name) {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        let id = doc.next_identifier();
        let rubro = Rubro::new(id, name.to_string(), description);
        let new_value = serde_json::to_value(&rubro).ok();
        doc.records.push(rubro);
        col.save(&doc)?;

        self.audit
            .record(who, "create", COL_RUBROS, Some(id), None, new_value, None);
        Ok(id)
    }

    /// Rubros ordered by name. `active_only` hides deactivated ones.
    pub fn list(&self, active_only: bool) -> AppResult<Vec<Rubro>> {
        let doc = self.collection().load()?;
        let mut rubros: Vec<Rubro> = doc
            .records
            .into_iter()
            .filter(|r| !active_only || r.active)
            .collect();
        rubros.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rubros)
    }

    /// Every rubro regardless of active flag, in insertion order.
    pub fn all(&self) -> AppResult<Vec<Rubro>> {
        Ok(self.collection().load()?.records)
    }

    pub fn get(&self, id: i64) -> AppResult<Option<Rubro>> {
        let doc = self.collection().load()?;
        Ok(doc.records.into_iter().find(|r| r.id == id))
    }

    pub fn update(&self, who: &Principal, id: i64, patch: &RubroPatch) -> AppResult<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(AppError::MissingField("name"));
            }
        }

        let col = self.collection();
        let mut doc = col.load()?;
        let rubro = doc
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound { kind: "rubro", id })?;

        let old_value = serde_json::to_value(&*rubro).ok();
        patch.apply_to(rubro);
        let new_value = serde_json::to_value(&*rubro).ok();
        col.save(&doc)?;

        self.audit.record(
            who,
            "update",
            COL_RUBROS,
            Some(id),
            old_value,
            new_value,
            None,
        );
        Ok(())
    }

    /// The only removal path: active → false. Ledger rows keep pointing
    /// at the rubro and are untouched.
    pub fn deactivate(&self, who: &Principal, id: i64) -> AppResult<()> {
        let col = self.collection();
        let mut doc = col.load()?;
        let rubro = doc
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound { kind: "rubro", id })?;

        if !rubro.active {
            return Ok(());
        }

        rubro.active = false;
        col.save(&doc)?;

        self.audit
            .record(who, "deactivate", COL_RUBROS, Some(id), None, None, None);
        Ok(())
    }
}
