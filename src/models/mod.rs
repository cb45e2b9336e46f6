pub mod assignment;
pub mod principal;
pub mod rubro;
pub mod worker;

pub use assignment::HourAssignment;
pub use principal::{Principal, Role};
pub use rubro::{Rubro, RubroPatch};
pub use worker::{Worker, WorkerPatch, WorkerStatus};
