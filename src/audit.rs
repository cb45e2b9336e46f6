//! Audit trail: every mutating repository call records who did what.
//!
//! Recording is fire-and-forget. A failed audit write is reported as a
//! warning and must never abort the data operation that triggered it.

use crate::errors::AppResult;
use crate::models::Principal;
use crate::store::{COL_AUDIT, Collection, StoreBackend};
use crate::ui::messages::warning;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: String,
    pub username: String,
    pub role: String,
    pub action: String,
    pub collection: String,
    pub record_id: Option<i64>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub detail: Option<String>,
}

pub struct AuditLog<'a> {
    backend: &'a dyn StoreBackend,
}

impl<'a> AuditLog<'a> {
    pub fn new(backend: &'a dyn StoreBackend) -> Self {
        Self { backend }
    }

    fn collection(&self) -> Collection<'a, AuditEntry> {
        Collection::new(self.backend, COL_AUDIT)
    }

    /// Record one action. Failures are downgraded to a warning.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &self,
        who: &Principal,
        action: &str,
        collection: &str,
        record_id: Option<i64>,
        old_value: Option<Value>,
        new_value: Option<Value>,
        detail: Option<String>,
    ) {
        if let Err(e) = self.try_record(
            who, action, collection, record_id, old_value, new_value, detail,
        ) {
            warning(format!("audit entry not recorded: {}", e));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn try_record(
        &self,
        who: &Principal,
        action: &str,
        collection: &str,
        record_id: Option<i64>,
        old_value: Option<Value>,
        new_value: Option<Value>,
        detail: Option<String>,
    ) -> AppResult<()> {
        let col = self.collection();
        let mut doc = col.load()?;

        let id = doc.next_identifier();
        doc.records.push(AuditEntry {
            id,
            timestamp: Local::now().to_rfc3339(),
            username: who.username.clone(),
            role: who.role.as_str().to_string(),
            action: action.to_string(),
            collection: collection.to_string(),
            record_id,
            old_value,
            new_value,
            detail,
        });

        col.save(&doc)
    }

    /// Most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> AppResult<Vec<AuditEntry>> {
        let doc = self.collection().load()?;
        let mut entries = doc.records;
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        entries.truncate(limit);
        Ok(entries)
    }
}
