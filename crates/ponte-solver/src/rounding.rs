//! MIP solution rounding.

use crate::options::StoredOptions;
use crate::status::SolveStatus;

/// Rounding option bits (`mip:round`).
pub const ROUND_ASSIGN: i64 = 1;
pub const ROUND_MODIFY_STATUS: i64 = 2;
pub const ROUND_MODIFY_MESSAGE: i64 = 4;

/// Outcome of one rounding scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundingReport {
    /// Integer variables whose value deviated from integrality.
    pub count: usize,
    /// Largest absolute deviation observed.
    pub max_error: f64,
}

impl RoundingReport {
    pub fn any(&self) -> bool {
        self.count > 0
    }
}

/// Scan the solution for noninteger values of integer variables.
///
/// Counts every nonzero deviation and tracks the maximum; values are
/// overwritten with their nearest integer only when `assign` is set.
/// Idempotent on already-integral solutions.
pub fn round_solution(solution: &mut [f64], integrality: &[bool], assign: bool) -> RoundingReport {
    let mut count = 0usize;
    let mut max_error = 0.0f64;
    let n = integrality.len().min(solution.len());
    for j in 0..n {
        if !integrality[j] {
            continue;
        }
        let rounded = solution[j].round();
        let deviation = (solution[j] - rounded).abs();
        if deviation != 0.0 {
            count += 1;
            if max_error < deviation {
                max_error = deviation;
            }
            if assign {
                solution[j] = rounded;
            }
        }
    }
    RoundingReport { count, max_error }
}

/// Downgrade the status after rounding, distinguishing assigned-and-
/// rounded from would-have-rounded. Only applies when a status has been
/// determined.
pub fn modify_status_after_rounding(status: SolveStatus, assigned: bool) -> SolveStatus {
    if !status.is_assigned() {
        return status;
    }
    if assigned {
        SolveStatus::SolvedRounded
    } else {
        SolveStatus::SolvedWouldRound
    }
}

/// Human-readable rounding summary appended to the outgoing message.
pub fn rounding_summary(report: RoundingReport, assigned: bool) -> String {
    let plural = if report.count > 1 { "s" } else { "" };
    format!(
        "\n{} integer variable{} {}rounded to integer{}; maxerr = {:.16}",
        report.count,
        plural,
        if assigned { "" } else { "would be " },
        plural,
        report.max_error
    )
}

/// Apply the full rounding policy from the stored options: scan, then
/// optionally modify status and message. Returns the possibly-downgraded
/// status.
pub fn apply_rounding(
    solution: &mut [f64],
    integrality: &[bool],
    stored: &StoredOptions,
    status: SolveStatus,
    message: &mut String,
) -> SolveStatus {
    let assign = stored.round & ROUND_ASSIGN != 0;
    let report = round_solution(solution, integrality, assign);
    if !report.any() || report.max_error <= stored.round_reptol {
        return status;
    }
    let mut out = status;
    if stored.round & ROUND_MODIFY_STATUS != 0 && status.is_assigned() {
        out = modify_status_after_rounding(status, assign);
    }
    if stored.round & ROUND_MODIFY_MESSAGE != 0 {
        message.push_str(&rounding_summary(report, assign));
    }
    out
}
