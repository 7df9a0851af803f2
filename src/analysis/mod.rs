// Analysis stages of the evidence update pipeline
pub(crate) mod likelihood;
pub(crate) mod posterior;
pub(crate) mod prior_grid;
pub mod zone_extraction;

pub use zone_extraction::{ContourExtractor, MarchingSquares, RectangularFallback};

pub(crate) use {
    likelihood::build_likelihood_grid,
    posterior::{PosteriorOutcome, combine},
    prior_grid::build_prior_grid,
    zone_extraction::extract_zones,
};
