mod geo_utils;
mod maths_utils;

pub(crate) use geo_utils::{planar_distance, ring_centroid};
pub(crate) use maths_utils::{linspace, mean_and_stddev};
