//! Configuration module for the zone refiner.

pub mod constants;
