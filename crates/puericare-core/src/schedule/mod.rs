//! Age, cadence, and alert computations.
//!
//! Everything here is pure: functions take a patient snapshot and the
//! relevant date and return derived values without touching shared state.
//! The session applies the results by whole-collection replacement.

mod age;
mod alerts;
mod cadence;

pub use age::*;
pub use alerts::*;
pub use cadence::*;
