use serde::{Deserialize, Serialize};

/// Hour category ("rubro"). Rubros are never hard-deleted: ledger rows
/// reference them historically, so removal only flips `active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubro {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

impl Rubro {
    pub fn new(id: i64, name: String, description: Option<String>) -> Self {
        Self {
            id,
            name,
            description,
            active: true,
        }
    }
}

/// Partial update for a rubro.
#[derive(Debug, Clone, Default)]
pub struct RubroPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl RubroPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.active.is_none()
    }

    pub fn apply_to(&self, rubro: &mut Rubro) {
        if let Some(name) = &self.name {
            rubro.name = name.clone();
        }
        if let Some(description) = &self.description {
            rubro.description = Some(description.clone());
        }
        if let Some(active) = self.active {
            rubro.active = active;
        }
    }
}
