use serde::{Deserialize, Serialize};

/// Worker lifecycle status. Soft delete is a transition to `Inactive`;
/// the record itself stays in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    Active,
    Inactive,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Active => "active",
            WorkerStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(WorkerStatus::Active),
            "inactive" => Some(WorkerStatus::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub area: Option<String>,
    /// Opaque photo reference (e.g. base64 payload), stored as-is.
    pub photo: Option<String>,
    pub status: WorkerStatus,
}

impl Worker {
    pub fn new(
        id: i64,
        name: String,
        email: String,
        phone: Option<String>,
        area: Option<String>,
        photo: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            area,
            photo,
            status: WorkerStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == WorkerStatus::Active
    }
}

/// Partial update: only fields set to `Some` are applied.
#[derive(Debug, Clone, Default)]
pub struct WorkerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub area: Option<String>,
    pub photo: Option<String>,
    pub status: Option<WorkerStatus>,
}

impl WorkerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.area.is_none()
            && self.photo.is_none()
            && self.status.is_none()
    }

    pub fn apply_to(&self, worker: &mut Worker) {
        if let Some(name) = &self.name {
            worker.name = name.clone();
        }
        if let Some(email) = &self.email {
            worker.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            worker.phone = Some(phone.clone());
        }
        if let Some(area) = &self.area {
            worker.area = Some(area.clone());
        }
        if let Some(photo) = &self.photo {
            worker.photo = Some(photo.clone());
        }
        if let Some(status) = self.status {
            worker.status = status;
        }
    }
}
