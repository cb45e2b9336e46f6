//! Worker repository: CRUD over the `workers` collection.
//!
//! Email is unique across active AND inactive workers. Deleting is a soft
//! status flip by default; the hard path removes the worker's ledger rows
//! first and the worker second, so a retry after a crash in between still
//! converges.

use crate::audit::AuditLog;
use crate::errors::{AppError, AppResult};
use crate::models::{HourAssignment, Principal, Worker, WorkerPatch, WorkerStatus};
use crate::store::{COL_HOURS, COL_WORKERS, Collection, StoreBackend};

/// Row counts removed by a hard delete, for caller-side reporting.
#[derive(Debug, Clone, Copy)]
pub struct CascadeReport {
    pub workers_removed: usize,
    pub hours_removed: usize,
}

pub struct WorkerRepository<'a> {
    backend: &'a dyn StoreBackend,
    audit: &'a AuditLog<'a>,
}

impl<'a> WorkerRepository<'a> {
    pub fn new(backend: &'a dyn StoreBackend, audit: &'a AuditLog<'a>) -> Self {
        Self { backend, audit }
    }

    fn collection(&self) -> Collection<'a, Worker> {
        Collection::new(self.backend, COL_WORKERS)
    }

    /// Create a worker with status active. Fails if the email is already
    /// taken by any worker, active or inactive.
    pub fn create(
        &self,
        who: &Principal,
        name: &str,
        email: &str,
        phone: Option<String>,
        area: Option<String>,
        photo: Option<String>,
    ) -> AppResult<i64> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AppError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(AppError::MissingField("email"));
        }

        let col = self.collection();
        let mut doc = col.load()?;

        if doc.records.iter().any(|w| w.email == email) {
            return Err(AppError::DuplicateEmail(email.to_string()));
        }

        let id = doc.next_identifier();
        let worker = Worker::new(id, name.to_string(), email.to_string(), phone, area, photo);
        let new_value = serde_json::to_value(&worker).ok();
        doc.records.push(worker);
        col.save(&doc)?;

        self.audit
            .record(who, "create", COL_WORKERS, Some(id), None, new_value, None);
        Ok(id)
    }

    /// Workers matching `status`, optionally filtered by exact area,
    /// ordered by name. Empty results are valid, never an error.
    pub fn list(&self, area: Option<&str>, status: WorkerStatus) -> AppResult<Vec<Worker>> {
        let doc = self.collection().load()?;
        let mut workers: Vec<Worker> = doc
            .records
            .into_iter()
            .filter(|w| w.status == status)
            .filter(|w| match area {
                Some(a) => w.area.as_deref() == Some(a),
                None => true,
            })
            .collect();
        workers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(workers)
    }

    /// Every worker regardless of status, in insertion order.
    pub fn all(&self) -> AppResult<Vec<Worker>> {
        Ok(self.collection().load()?.records)
    }

    pub fn get(&self, id: i64) -> AppResult<Option<Worker>> {
        let doc = self.collection().load()?;
        Ok(doc.records.into_iter().find(|w| w.id == id))
    }

    /// Apply only the supplied fields. Updates to the same worker from
    /// two callers are last-writer-wins; there is no optimistic locking.
    pub fn update(&self, who: &Principal, id: i64, patch: &WorkerPatch) -> AppResult<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(AppError::MissingField("name"));
            }
        }
        if let Some(email) = &patch.email {
            if email.trim().is_empty() {
                return Err(AppError::MissingField("email"));
            }
        }

        let col = self.collection();
        let mut doc = col.load()?;
        let worker = doc
            .records
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(AppError::NotFound {
                kind: "worker",
                id,
            })?;

        let old_value = serde_json::to_value(&*worker).ok();
        patch.apply_to(worker);
        let new_value = serde_json::to_value(&*worker).ok();
        col.save(&doc)?;

        self.audit.record(
            who,
            "update",
            COL_WORKERS,
            Some(id),
            old_value,
            new_value,
            None,
        );
        Ok(())
    }

    /// Soft delete: status → inactive. Idempotent when already inactive.
    pub fn deactivate(&self, who: &Principal, id: i64) -> AppResult<()> {
        let col = self.collection();
        let mut doc = col.load()?;
        let worker = doc
            .records
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(AppError::NotFound {
                kind: "worker",
                id,
            })?;

        if worker.status == WorkerStatus::Inactive {
            return Ok(());
        }

        worker.status = WorkerStatus::Inactive;
        col.save(&doc)?;

        self.audit
            .record(who, "deactivate", COL_WORKERS, Some(id), None, None, None);
        Ok(())
    }

    /// Hard delete: permanently remove the worker and every ledger row
    /// referencing it. The two writes are sequential, not atomic; ledger
    /// rows go first so rerunning after a partial failure converges.
    pub fn hard_delete(&self, who: &Principal, id: i64) -> AppResult<CascadeReport> {
        let hours_col: Collection<HourAssignment> = Collection::new(self.backend, COL_HOURS);
        let mut hours_doc = hours_col.load()?;
        let before = hours_doc.records.len();
        hours_doc.records.retain(|h| h.worker_id != id);
        let hours_removed = before - hours_doc.records.len();
        if hours_removed > 0 {
            hours_col.save(&hours_doc)?;
        }

        let col = self.collection();
        let mut doc = col.load()?;
        let before = doc.records.len();
        doc.records.retain(|w| w.id != id);
        let workers_removed = before - doc.records.len();
        if workers_removed > 0 {
            col.save(&doc)?;
        }

        if workers_removed == 0 && hours_removed == 0 {
            return Err(AppError::NotFound {
                kind: "worker",
                id,
            });
        }

        self.audit.record(
            who,
            "hard_delete",
            COL_WORKERS,
            Some(id),
            None,
            None,
            Some(format!(
                "removed {} worker(s) and {} hour assignment(s)",
                workers_removed, hours_removed
            )),
        );
        Ok(CascadeReport {
            workers_removed,
            hours_removed,
        })
    }
}
