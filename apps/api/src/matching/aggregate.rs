//! Folds the four sub-scores into the final 0-100 score and its category
//! band.

use serde::{Deserialize, Serialize};

/// Relative importance of each dimension. Must be non-negative and sum to
/// 1.0 (within [`WEIGHT_SUM_TOLERANCE`]); validated at startup so a final
/// score can never leave [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub semantic: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl Default for MatchWeights {
    fn default() -> Self {
        MatchWeights {
            semantic: 0.40,
            skills: 0.30,
            experience: 0.15,
            education: 0.15,
        }
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.semantic + self.skills + self.experience + self.education
    }

    pub fn is_valid(&self) -> bool {
        self.semantic >= 0.0
            && self.skills >= 0.0
            && self.experience >= 0.0
            && self.education >= 0.0
            && (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Redistributes the semantic weight across the remaining dimensions,
    /// proportionally, so they again sum to 1.0. `None` when semantic
    /// carries the entire weight and nothing remains to scale up.
    pub fn without_semantic(&self) -> Option<MatchWeights> {
        let remaining = self.skills + self.experience + self.education;
        if remaining <= 0.0 {
            return None;
        }
        let scale = 1.0 / remaining;
        Some(MatchWeights {
            semantic: 0.0,
            skills: self.skills * scale,
            experience: self.experience * scale,
            education: self.education * scale,
        })
    }
}

/// Per-dimension scores in [0, 1]. `semantic: None` marks a degraded match
/// where the embedding backend failed and its weight was redistributed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubScores {
    pub semantic: Option<f64>,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

/// Final weighted score on the 0-100 scale.
///
/// Callers pass the weights actually in effect: on a degraded match that is
/// the redistributed set, whose semantic weight is zero, so the absent
/// sub-score contributes nothing either way.
pub fn aggregate(scores: &SubScores, weights: &MatchWeights) -> f64 {
    let weighted = scores.semantic.unwrap_or(0.0) * weights.semantic
        + scores.skills * weights.skills
        + scores.experience * weights.experience
        + scores.education * weights.education;
    (weighted * 100.0).clamp(0.0, 100.0)
}

/// Category bands over the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchCategory {
    pub fn label(self) -> &'static str {
        match self {
            MatchCategory::Excellent => "excellent",
            MatchCategory::Good => "good",
            MatchCategory::Fair => "fair",
            MatchCategory::Poor => "poor",
        }
    }
}

/// Lower bounds for each band above Poor. Must strictly descend; validated
/// at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        CategoryThresholds {
            excellent: 85.0,
            good: 70.0,
            fair: 50.0,
        }
    }
}

impl CategoryThresholds {
    pub fn is_monotonic(&self) -> bool {
        self.excellent > self.good && self.good > self.fair
    }
}

/// Band lookup. Boundaries belong to the higher band: exactly 85.0 is
/// Excellent under the defaults.
pub fn categorize(final_score: f64, thresholds: &CategoryThresholds) -> MatchCategory {
    if final_score >= thresholds.excellent {
        MatchCategory::Excellent
    } else if final_score >= thresholds.good {
        MatchCategory::Good
    } else if final_score >= thresholds.fair {
        MatchCategory::Fair
    } else {
        MatchCategory::Poor
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn full_marks() -> SubScores {
        SubScores {
            semantic: Some(1.0),
            skills: 1.0,
            experience: 1.0,
            education: 1.0,
        }
    }

    #[test]
    fn test_default_weights_are_valid() {
        assert!(MatchWeights::default().is_valid());
        assert!((MatchWeights::default().sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_weight_sums_rejected() {
        let mut weights = MatchWeights::default();
        weights.semantic = 0.5;
        assert!(!weights.is_valid());

        let negative = MatchWeights {
            semantic: -0.1,
            skills: 0.5,
            experience: 0.3,
            education: 0.3,
        };
        assert!(!negative.is_valid());
    }

    #[test]
    fn test_aggregate_full_marks_is_100() {
        let score = aggregate(&full_marks(), &MatchWeights::default());
        assert!((score - 100.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_aggregate_zero_marks_is_0() {
        let scores = SubScores {
            semantic: Some(0.0),
            skills: 0.0,
            experience: 0.0,
            education: 0.0,
        };
        assert_eq!(aggregate(&scores, &MatchWeights::default()), 0.0);
    }

    #[test]
    fn test_aggregate_weighted_mix() {
        // 0.4*0.8 + 0.3*(2/3) + 0.15*0.6 + 0.15*1.0 = 0.76 → 76.0
        let scores = SubScores {
            semantic: Some(0.8),
            skills: 2.0 / 3.0,
            experience: 0.6,
            education: 1.0,
        };
        let score = aggregate(&scores, &MatchWeights::default());
        assert!((score - 76.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_aggregate_linear_in_each_dimension() {
        // Moving one sub-score by delta moves the total by exactly
        // 100 * weight * delta, for every dimension.
        let weights = MatchWeights::default();
        let base = SubScores {
            semantic: Some(0.5),
            skills: 0.5,
            experience: 0.5,
            education: 0.5,
        };
        let before = aggregate(&base, &weights);
        let delta = 0.25;

        let perturbed = [
            (
                SubScores {
                    semantic: Some(0.5 + delta),
                    ..base
                },
                weights.semantic,
            ),
            (
                SubScores {
                    skills: 0.5 + delta,
                    ..base
                },
                weights.skills,
            ),
            (
                SubScores {
                    experience: 0.5 + delta,
                    ..base
                },
                weights.experience,
            ),
            (
                SubScores {
                    education: 0.5 + delta,
                    ..base
                },
                weights.education,
            ),
        ];

        for (scores, weight) in perturbed {
            let after = aggregate(&scores, &weights);
            let expected = 100.0 * weight * delta;
            assert!(
                (after - before - expected).abs() < 1e-9,
                "weight {weight}: moved by {}, expected {expected}",
                after - before
            );
        }
    }

    #[test]
    fn test_without_semantic_redistributes_proportionally() {
        let weights = MatchWeights::default().without_semantic().expect("redistributed");
        assert_eq!(weights.semantic, 0.0);
        assert!((weights.skills - 0.5).abs() < 1e-9);
        assert!((weights.experience - 0.25).abs() < 1e-9);
        assert!((weights.education - 0.25).abs() < 1e-9);
        assert!((weights.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_without_semantic_when_semantic_is_everything() {
        let weights = MatchWeights {
            semantic: 1.0,
            skills: 0.0,
            experience: 0.0,
            education: 0.0,
        };
        assert!(weights.without_semantic().is_none());
    }

    #[test]
    fn test_category_boundaries_belong_to_higher_band() {
        let thresholds = CategoryThresholds::default();
        assert_eq!(categorize(85.0, &thresholds), MatchCategory::Excellent);
        assert_eq!(categorize(84.999, &thresholds), MatchCategory::Good);
        assert_eq!(categorize(70.0, &thresholds), MatchCategory::Good);
        assert_eq!(categorize(69.999, &thresholds), MatchCategory::Fair);
        assert_eq!(categorize(50.0, &thresholds), MatchCategory::Fair);
        assert_eq!(categorize(49.999, &thresholds), MatchCategory::Poor);
        assert_eq!(categorize(0.0, &thresholds), MatchCategory::Poor);
        assert_eq!(categorize(100.0, &thresholds), MatchCategory::Excellent);
    }

    #[test]
    fn test_threshold_monotonicity_check() {
        assert!(CategoryThresholds::default().is_monotonic());
        let inverted = CategoryThresholds {
            excellent: 50.0,
            good: 70.0,
            fair: 85.0,
        };
        assert!(!inverted.is_monotonic());
    }
}
