use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::Evaluation;

/// Overall verdict derived from the average score.
///
/// Lower bounds are inclusive: `[0,4)` Needs Work, `[4,6)` Fair,
/// `[6,8)` Good, `[8,10]` Excellent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTier {
    NeedsWork,
    Fair,
    Good,
    Excellent,
}

impl PerformanceTier {
    pub fn from_average(average: f64) -> Self {
        if average >= 8.0 {
            PerformanceTier::Excellent
        } else if average >= 6.0 {
            PerformanceTier::Good
        } else if average >= 4.0 {
            PerformanceTier::Fair
        } else {
            PerformanceTier::NeedsWork
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::NeedsWork => write!(f, "Needs Work"),
            PerformanceTier::Fair => write!(f, "Fair"),
            PerformanceTier::Good => write!(f, "Good"),
            PerformanceTier::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Per-answer band. Uses 5/7 cut-offs, not the tier cut-offs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    /// `score >= 7`
    Strong,
    /// `5 <= score < 7`
    Average,
    /// `score < 5`
    Weak,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score >= 7.0 {
            ScoreBand::Strong
        } else if score >= 5.0 {
            ScoreBand::Average
        } else {
            ScoreBand::Weak
        }
    }
}

/// Aggregate statistics over a finished (or partial) list of evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: usize,
    /// Mean score rounded to one decimal; 0 when there is nothing to average.
    pub average_score: f64,
    pub tier: PerformanceTier,
    pub strong: usize,
    pub average: usize,
    pub weak: usize,
}

/// Mean score rounded to one decimal place, or 0 for an empty list.
pub fn average_score(evaluations: &[Evaluation]) -> f64 {
    if evaluations.is_empty() {
        return 0.0;
    }
    let total: f64 = evaluations.iter().map(|e| e.score).sum();
    round_to_tenth(total / evaluations.len() as f64)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute the summary shown on the results screen. Recomputed on every call.
pub fn summarize(evaluations: &[Evaluation]) -> ScoreSummary {
    let average_score = average_score(evaluations);
    let mut summary = ScoreSummary {
        total: evaluations.len(),
        average_score,
        // Tier is taken from the rounded average, as displayed.
        tier: PerformanceTier::from_average(average_score),
        strong: 0,
        average: 0,
        weak: 0,
    };
    for evaluation in evaluations {
        match ScoreBand::of(evaluation.score) {
            ScoreBand::Strong => summary.strong += 1,
            ScoreBand::Average => summary.average += 1,
            ScoreBand::Weak => summary.weak += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evals(scores: &[f64]) -> Vec<Evaluation> {
        scores
            .iter()
            .map(|&score| Evaluation {
                score,
                strengths: vec![],
                weaknesses: vec![],
                improved_answer: String::new(),
            })
            .collect()
    }

    #[test]
    fn mixed_scores_summary() {
        let summary = summarize(&evals(&[8.0, 6.0, 3.0]));
        assert_eq!(summary.total, 3);
        assert_eq!(summary.average_score, 5.7);
        assert_eq!(summary.tier, PerformanceTier::Fair);
        assert_eq!(summary.strong, 1);
        assert_eq!(summary.average, 1);
        assert_eq!(summary.weak, 1);
    }

    #[test]
    fn empty_list_is_zero_and_needs_work() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.tier, PerformanceTier::NeedsWork);
        assert_eq!(summary.strong + summary.average + summary.weak, 0);
    }

    #[test]
    fn tier_boundaries_are_inclusive_below() {
        assert_eq!(summarize(&evals(&[4.0])).tier, PerformanceTier::Fair);
        assert_eq!(summarize(&evals(&[6.0])).tier, PerformanceTier::Good);
        assert_eq!(summarize(&evals(&[8.0])).tier, PerformanceTier::Excellent);

        assert_eq!(PerformanceTier::from_average(3.9), PerformanceTier::NeedsWork);
        assert_eq!(PerformanceTier::from_average(5.9), PerformanceTier::Fair);
        assert_eq!(PerformanceTier::from_average(7.9), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_average(10.0), PerformanceTier::Excellent);
    }

    #[test]
    fn tier_uses_rounded_average() {
        // 5.966.. rounds to 6.0 before the tier is chosen.
        let summary = summarize(&evals(&[6.0, 6.0, 5.9]));
        assert_eq!(summary.average_score, 6.0);
        assert_eq!(summary.tier, PerformanceTier::Good);
    }

    #[test]
    fn count_bands_differ_from_tier_bands() {
        assert_eq!(ScoreBand::of(7.0), ScoreBand::Strong);
        assert_eq!(ScoreBand::of(6.9), ScoreBand::Average);
        assert_eq!(ScoreBand::of(5.0), ScoreBand::Average);
        assert_eq!(ScoreBand::of(4.9), ScoreBand::Weak);

        // 4 is "Fair" as a tier but still a weak answer.
        let summary = summarize(&evals(&[4.0]));
        assert_eq!(summary.tier, PerformanceTier::Fair);
        assert_eq!(summary.weak, 1);
    }

    #[test]
    fn failed_evaluations_count_as_zero() {
        let mut list = evals(&[9.0]);
        list.push(Evaluation::failed());
        let summary = summarize(&list);
        assert_eq!(summary.average_score, 4.5);
        assert_eq!(summary.tier, PerformanceTier::Fair);
        assert_eq!(summary.strong, 1);
        assert_eq!(summary.weak, 1);
    }

    #[test]
    fn tier_display() {
        assert_eq!(PerformanceTier::NeedsWork.to_string(), "Needs Work");
        assert_eq!(PerformanceTier::Fair.to_string(), "Fair");
        assert_eq!(PerformanceTier::Good.to_string(), "Good");
        assert_eq!(PerformanceTier::Excellent.to_string(), "Excellent");
    }
}
