pub mod tracker;

pub use tracker::{VisibilityInterval, VisibilityTracker};
