//! Deterministic aggregation of the wagering ledger's event log into
//! queryable entities: caves, rounds, players, per-round records, daily
//! buckets, and the protocol-wide totals.

pub mod ens;
pub mod ledger;
pub mod oracle;
pub mod pipeline;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;


mod error;

mod layer;

mod math;

mod state;

pub use error::IntegrityError;
pub use layer::Layer;
pub use pipeline::{apply_event, execute_log, ExecutionResult};
pub use state::{Adb, Memory, State};
