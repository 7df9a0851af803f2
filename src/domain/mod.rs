// Domain types and value objects
mod bounds;
mod evidence;
mod zone;

// Re-export commonly used types
pub use bounds::Bounds;
pub use evidence::{Evidence, EvidenceKind};
pub use zone::{ProbabilityZone, ZoneGeometry, ZoneProperties};
