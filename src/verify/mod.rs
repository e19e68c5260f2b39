//! Tolerant verification of match results against accepted answers.
//!
//! A produced outcome passes if it is close enough to any accepted
//! ground-truth box, where "close enough" is a lenient OR of a flat pixel
//! bound and a ratio bound on each of width, height, and the two center
//! coordinates. An accepted answer set may also contain `NotFound`, making
//! "no detection" an acceptable outcome (the ambiguous case).

use crate::geom::{BoundingBox, MatchOutcome};

/// Tolerance bounds for fuzzy box equivalence.
///
/// The defaults are part of the stable contract with recorded fixtures and
/// exist to absorb the heuristic matcher's imprecision.
#[derive(Clone, Copy, Debug)]
pub struct Tolerance {
    /// Maximum relative width/height deviation, as a fraction of the
    /// accepted box's extent.
    pub size_ratio: f32,
    /// Maximum absolute width/height deviation in pixels.
    pub size_flat: f32,
    /// Maximum relative center deviation, as a fraction of the accepted
    /// box's extent on the corresponding axis.
    pub pos_ratio: f32,
    /// Maximum absolute center deviation in pixels.
    pub pos_flat: f32,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            size_ratio: 0.125,
            size_flat: 15.0,
            pos_ratio: 0.125,
            pos_flat: 15.0,
        }
    }
}

/// Categorical reason a verification failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailReason {
    /// The result was `NotFound` but only real boxes were acceptable.
    FalseNegative,
    /// A box was produced but the only acceptable outcome was no detection.
    FalsePositive,
    /// Width deviated beyond both the flat and ratio bounds.
    IncorrectWidth,
    /// Height deviated beyond both the flat and ratio bounds.
    IncorrectHeight,
    /// Horizontal center deviated beyond both the flat and ratio bounds.
    IncorrectX,
    /// Vertical center deviated beyond both the flat and ratio bounds.
    IncorrectY,
}

impl std::fmt::Display for FailReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::FalseNegative => "false-negative",
            Self::FalsePositive => "false-positive",
            Self::IncorrectWidth => "incorrect-width",
            Self::IncorrectHeight => "incorrect-height",
            Self::IncorrectX => "incorrect-x",
            Self::IncorrectY => "incorrect-y",
        };
        f.write_str(label)
    }
}

/// Verification verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The result matches an accepted answer.
    Pass,
    /// No accepted answer matched.
    Fail(FailReason),
}

impl Verdict {
    /// Returns true for a passing verdict.
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Which failing candidate's reason is surfaced when nothing matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailureReport {
    /// Report the reason from the last candidate checked, in list order.
    /// Default, for compatibility with recorded fixtures.
    #[default]
    LastCandidate,
    /// Report the reason from the candidate with the smallest total
    /// normalized deviation.
    BestCandidate,
}

/// Tolerant comparator for match results.
#[derive(Clone, Copy, Debug, Default)]
pub struct Verifier {
    tolerance: Tolerance,
    failure_report: FailureReport,
}

impl Verifier {
    /// Creates a verifier with the contract tolerances and last-candidate
    /// failure reporting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tolerance bounds.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replaces the failure attribution mode.
    pub fn with_failure_report(mut self, failure_report: FailureReport) -> Self {
        self.failure_report = failure_report;
        self
    }

    /// Checks a result against an ordered accepted answer set.
    ///
    /// `NotFound` entries in `accepted` mark "no detection" as acceptable and
    /// are skipped before any tolerance arithmetic, so they never act as a
    /// ratio denominator.
    pub fn verify(&self, result: MatchOutcome, accepted: &[MatchOutcome]) -> Verdict {
        let bbox = match result {
            MatchOutcome::NotFound => {
                return if accepted.iter().any(|answer| !answer.is_found()) {
                    Verdict::Pass
                } else {
                    Verdict::Fail(FailReason::FalseNegative)
                };
            }
            MatchOutcome::Found(bbox) => bbox,
        };

        let mut failures: Vec<(FailReason, f32)> = Vec::new();
        for candidate in accepted.iter().filter_map(|answer| answer.bounding_box()) {
            let check = check_candidate(bbox, candidate, &self.tolerance);
            match check.reason {
                None => return Verdict::Pass,
                Some(reason) => failures.push((reason, check.error)),
            }
        }

        // No real boxes in the accepted set: the only acceptable outcome was
        // no detection.
        if failures.is_empty() {
            return Verdict::Fail(FailReason::FalsePositive);
        }

        let reason = match self.failure_report {
            FailureReport::LastCandidate => {
                failures.last().expect("at least one failing candidate").0
            }
            FailureReport::BestCandidate => {
                failures
                    .iter()
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .expect("at least one failing candidate")
                    .0
            }
        };
        Verdict::Fail(reason)
    }
}

/// Checks a result with the default verifier.
pub fn verify(result: MatchOutcome, accepted: &[MatchOutcome]) -> Verdict {
    Verifier::new().verify(result, accepted)
}

struct CandidateCheck {
    /// First failing check in width, height, x, y order; `None` on success.
    reason: Option<FailReason>,
    /// Total normalized deviation, used for best-candidate attribution.
    error: f32,
}

fn check_candidate(result: BoundingBox, expected: BoundingBox, tol: &Tolerance) -> CandidateCheck {
    let expected_w = expected.w as f32;
    let expected_h = expected.h as f32;

    let dw = (result.w as f32 - expected_w).abs();
    let dh = (result.h as f32 - expected_h).abs();
    let dx = (result.center_x() - expected.center_x()).abs();
    let dy = (result.center_y() - expected.center_y()).abs();

    // Each check passes if either the flat bound or the ratio bound holds.
    let width_fails = dw > tol.size_flat && dw / expected_w > tol.size_ratio;
    let height_fails = dh > tol.size_flat && dh / expected_h > tol.size_ratio;
    let x_fails = dx > tol.pos_flat && dx / expected_w > tol.pos_ratio;
    let y_fails = dy > tol.pos_flat && dy / expected_h > tol.pos_ratio;

    let reason = if width_fails {
        Some(FailReason::IncorrectWidth)
    } else if height_fails {
        Some(FailReason::IncorrectHeight)
    } else if x_fails {
        Some(FailReason::IncorrectX)
    } else if y_fails {
        Some(FailReason::IncorrectY)
    } else {
        None
    };

    CandidateCheck {
        reason,
        error: dw / expected_w + dh / expected_h + dx / expected_w + dy / expected_h,
    }
}

#[cfg(test)]
mod tests {
    use super::{check_candidate, FailReason, Tolerance};
    use crate::geom::BoundingBox;

    #[test]
    fn flat_bound_alone_is_enough() {
        let tol = Tolerance::default();
        let expected = BoundingBox::new(0, 0, 40, 40);
        // 10 px width error is 25% of a 40 px box, but within the flat bound.
        let result = BoundingBox::new(0, 0, 50, 40);
        let check = check_candidate(result, expected, &tol);
        assert_eq!(check.reason, None);
    }

    #[test]
    fn width_failure_is_reported_first() {
        let tol = Tolerance::default();
        let expected = BoundingBox::new(0, 0, 40, 40);
        // 16 px width error fails both bounds; the center stays within the
        // flat bound, so width is the first failing check.
        let result = BoundingBox::new(0, 0, 56, 40);
        let check = check_candidate(result, expected, &tol);
        assert_eq!(check.reason, Some(FailReason::IncorrectWidth));
    }

    #[test]
    fn ratio_bound_alone_is_enough() {
        let tol = Tolerance::default();
        let expected = BoundingBox::new(0, 0, 400, 400);
        // 20 px width error exceeds the flat bound but is only 5% of 400.
        let result = BoundingBox::new(0, 0, 420, 400);
        let check = check_candidate(result, expected, &tol);
        assert_eq!(check.reason, None);
    }
}
