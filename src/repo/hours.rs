//! Hours ledger: hours per (worker, rubro, year).
//!
//! The triple is the uniqueness key. Assigning to an existing triple
//! overwrites the hours in place, latest call wins; no history of the
//! overwritten value is kept here (the audit log carries old/new).

use crate::audit::AuditLog;
use crate::errors::{AppError, AppResult};
use crate::models::{HourAssignment, Principal, Worker, WorkerStatus};
use crate::repo::{RubroRepository, WorkerRepository};
use crate::store::{COL_HOURS, Collection, StoreBackend};
use chrono::{Datelike, Local};
use serde_json::json;
use std::collections::{HashMap, HashSet};

/// One joined row of a worker's hours, rubro resolved to its name.
#[derive(Debug, Clone)]
pub struct RubroHours {
    pub rubro: String,
    pub hours: f64,
    pub year: i32,
}

/// One row of an area rollup.
#[derive(Debug, Clone)]
pub struct AreaSummaryRow {
    pub worker: String,
    pub total_hours: f64,
    pub rubro_count: usize,
    pub area: String,
}

/// Outcome of an upsert, for caller-side messages.
#[derive(Debug, Clone, Copy)]
pub struct Assigned {
    pub year: i32,
    /// Hours value that was overwritten, `None` on first assignment.
    pub previous: Option<f64>,
}

/// Result of the orphan integrity sweep.
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    pub missing_worker: Vec<HourAssignment>,
    pub missing_rubro: Vec<HourAssignment>,
    pub purged: usize,
}

impl SweepReport {
    /// Distinct orphaned rows; a row can be orphaned both ways.
    pub fn orphan_ids(&self) -> HashSet<i64> {
        self.missing_worker
            .iter()
            .chain(self.missing_rubro.iter())
            .map(|h| h.id)
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.missing_worker.is_empty() && self.missing_rubro.is_empty()
    }
}

pub struct HoursLedger<'a> {
    backend: &'a dyn StoreBackend,
    workers: &'a WorkerRepository<'a>,
    rubros: &'a RubroRepository<'a>,
    audit: &'a AuditLog<'a>,
}

pub fn current_year() -> i32 {
    Local::now().year()
}

impl<'a> HoursLedger<'a> {
    pub fn new(
        backend: &'a dyn StoreBackend,
        workers: &'a WorkerRepository<'a>,
        rubros: &'a RubroRepository<'a>,
        audit: &'a AuditLog<'a>,
    ) -> Self {
        Self {
            backend,
            workers,
            rubros,
            audit,
        }
    }

    fn collection(&self) -> Collection<'a, HourAssignment> {
        Collection::new(self.backend, COL_HOURS)
    }

    fn resolve_year(year: Option<i32>) -> AppResult<i32> {
        match year {
            Some(y) if y <= 0 => Err(AppError::InvalidYear(y)),
            Some(y) => Ok(y),
            None => Ok(current_year()),
        }
    }

    /// Upsert hours for (worker, rubro, year). References are not checked
    /// here; the sweep detects dangling rows after the fact.
    pub fn assign(
        &self,
        who: &Principal,
        worker_id: i64,
        rubro_id: i64,
        hours: f64,
        year: Option<i32>,
    ) -> AppResult<Assigned> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(AppError::InvalidHours(hours));
        }
        let year = Self::resolve_year(year)?;

        let col = self.collection();
        let mut doc = col.load()?;

        let existing = doc
            .records
            .iter()
            .position(|h| h.key() == (worker_id, rubro_id, year));

        let (record_id, previous) = match existing {
            Some(i) => {
                let previous = doc.records[i].hours;
                doc.records[i].hours = hours;
                (doc.records[i].id, Some(previous))
            }
            None => {
                let id = doc.next_identifier();
                doc.records.push(HourAssignment {
                    id,
                    worker_id,
                    rubro_id,
                    hours,
                    year,
                });
                (id, None)
            }
        };
        col.save(&doc)?;

        self.audit.record(
            who,
            "assign",
            COL_HOURS,
            Some(record_id),
            previous.map(|p| json!({ "hours": p })),
            Some(json!({ "worker_id": worker_id, "rubro_id": rubro_id, "hours": hours, "year": year })),
            None,
        );
        Ok(Assigned { year, previous })
    }

    /// A worker's hours for the year, joined against the rubro names and
    /// ordered by name. Rows whose rubro no longer resolves are orphans,
    /// not errors, and are silently excluded.
    pub fn hours_for_worker(&self, worker_id: i64, year: Option<i32>) -> AppResult<Vec<RubroHours>> {
        let year = Self::resolve_year(year)?;
        let doc = self.collection().load()?;

        let names: HashMap<i64, String> = self
            .rubros
            .all()?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();

        let mut rows: Vec<RubroHours> = doc
            .records
            .into_iter()
            .filter(|h| h.worker_id == worker_id && h.year == year)
            .filter_map(|h| {
                names.get(&h.rubro_id).map(|name| RubroHours {
                    rubro: name.clone(),
                    hours: h.hours,
                    year: h.year,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.rubro.cmp(&b.rubro));
        Ok(rows)
    }

    /// Sum of the worker's hours for the year, 0 when none exist.
    pub fn total_hours(&self, worker_id: i64, year: Option<i32>) -> AppResult<f64> {
        Ok(self
            .hours_for_worker(worker_id, year)?
            .iter()
            .map(|r| r.hours)
            .sum())
    }

    /// Per-worker rollup for an area. Workers with no assignments appear
    /// with zero totals.
    pub fn area_summary(&self, area: &str, year: Option<i32>) -> AppResult<Vec<AreaSummaryRow>> {
        let year = Self::resolve_year(year)?;
        let workers = self.workers.list(Some(area), WorkerStatus::Active)?;

        let mut rows = Vec::with_capacity(workers.len());
        for w in workers {
            let hours = self.hours_for_worker(w.id, Some(year))?;
            rows.push(AreaSummaryRow {
                worker: w.name,
                total_hours: hours.iter().map(|r| r.hours).sum(),
                rubro_count: hours.len(),
                area: area.to_string(),
            });
        }
        Ok(rows)
    }

    /// Active workers whose total for the year exceeds the limit, highest
    /// first. Plain synchronous query for scheduler-style callers.
    pub fn workers_over_limit(
        &self,
        limit: f64,
        year: Option<i32>,
    ) -> AppResult<Vec<(Worker, f64)>> {
        let year = Self::resolve_year(year)?;
        let mut over = Vec::new();
        for w in self.workers.list(None, WorkerStatus::Active)? {
            let total = self.total_hours(w.id, Some(year))?;
            if total > limit {
                over.push((w, total));
            }
        }
        over.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(over)
    }

    /// Operator-invoked integrity sweep: report every ledger row whose
    /// worker or rubro record no longer exists, optionally purging
    /// exactly those rows. Inactive workers and deactivated rubros still
    /// count as existing.
    pub fn sweep(&self, who: &Principal, purge: bool) -> AppResult<SweepReport> {
        let worker_ids: HashSet<i64> = self.workers.all()?.iter().map(|w| w.id).collect();
        let rubro_ids: HashSet<i64> = self.rubros.all()?.iter().map(|r| r.id).collect();

        let col = self.collection();
        let mut doc = col.load()?;

        let mut report = SweepReport::default();
        for h in &doc.records {
            if !worker_ids.contains(&h.worker_id) {
                report.missing_worker.push(h.clone());
            }
            if !rubro_ids.contains(&h.rubro_id) {
                report.missing_rubro.push(h.clone());
            }
        }

        if purge && !report.is_clean() {
            let orphans = report.orphan_ids();
            doc.records.retain(|h| !orphans.contains(&h.id));
            col.save(&doc)?;
            report.purged = orphans.len();

            self.audit.record(
                who,
                "purge_orphans",
                COL_HOURS,
                None,
                None,
                None,
                Some(format!(
                    "purged {} orphaned row(s): {} without worker, {} without rubro",
                    report.purged,
                    report.missing_worker.len(),
                    report.missing_rubro.len()
                )),
            );
        }
        Ok(report)
    }
}
