pub mod aggregator;
pub mod correlation;
pub mod grid_generator;
pub mod occurrence_store;
pub mod ocean_service;
pub mod sampler;
