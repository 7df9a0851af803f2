mod core;
mod messages;
mod worker;

pub use core::UpdateEngine;
pub use messages::{UpdateJob, UpdateOutcome};
pub use worker::UpdateWorkerPool;
