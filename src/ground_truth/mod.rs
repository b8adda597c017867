pub mod assignment;
pub mod generator;

pub use assignment::{Assignment, GroundTruthRecord, MarkerId, MarkerState};
pub use generator::generate;
