//! Domain repositories. Validation and invariants live here; every call
//! is a full load → mutate → save cycle against the record store, with
//! no state shared across calls.

pub mod hours;
pub mod rubros;
pub mod workers;

pub use hours::HoursLedger;
pub use rubros::RubroRepository;
pub use workers::WorkerRepository;
