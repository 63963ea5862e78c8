//! Worst-case score aggregation.
//!
//! The three layers score independently; the final risk is the maximum of
//! the three, clamped to [0.0, 1.0]. Agreement between layers is not
//! required: one confident signal is sufficient to escalate.

/// Normalized scores from the three independent layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerScores {
    /// Pattern layer score in [0.0, 1.0].
    pub pattern: f64,
    /// Semantic layer score in [0.0, 1.0].
    pub semantic: f64,
    /// Policy layer score, 0.0 or 1.0.
    pub policy: f64,
}

/// Combines the layer scores into the final risk value.
///
/// Pure, deterministic and commutative in its three inputs. Monotonic:
/// raising any single layer's score never lowers the result.
pub fn aggregate(scores: LayerScores) -> f64 {
    scores
        .pattern
        .max(scores.semantic)
        .max(scores.policy)
        .min(1.0)
}
