/// Weighting for the three scored components, in percentage points.
/// The defaults sum to 100 and are the fixed experiment constants.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    /// Leak / no-leak judgment against the independently recorded truth.
    pub weight_external: f64,

    /// "Any marker flagged" judgment against the derived truth.
    pub weight_derived: f64,

    /// Per-marker recall; awarded all-or-nothing.
    pub weight_markers: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            weight_external: 33.4,
            weight_derived: 33.3,
            weight_markers: 33.3,
        }
    }
}
