mod feature_collection;
mod grid;

pub use feature_collection::{CollectionMetadata, FeatureCollection, ZoneDocument};
pub use grid::ProbabilityGrid;
