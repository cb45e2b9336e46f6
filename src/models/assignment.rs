use serde::{Deserialize, Serialize};

/// One row of the hours ledger: hours assigned to a worker for a rubro
/// in a given year. At most one row exists per (worker, rubro, year);
/// re-assigning the same triple overwrites `hours` in place.
///
/// References are not enforced at insert time; the orphan sweep catches
/// rows whose worker or rubro has since disappeared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourAssignment {
    pub id: i64,
    pub worker_id: i64,
    pub rubro_id: i64,
    pub hours: f64,
    pub year: i32,
}

impl HourAssignment {
    pub fn key(&self) -> (i64, i64, i32) {
        (self.worker_id, self.rubro_id, self.year)
    }
}
