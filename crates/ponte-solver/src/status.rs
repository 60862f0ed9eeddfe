//! The canonical solve status taxonomy.
//!
//! Statuses are totally ordered so that range tests replace per-status
//! branching: the infeasible/unbounded family is a contiguous run, and
//! the two rounding codes sit between `Solved` and that run, exactly as
//! in the classical numeric code space.

/// Canonical outcome of a solve, ordered by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolveStatus {
    /// Optimal solution, or feasible for a satisfaction problem.
    Solved,
    /// Solved, then noninteger integer variables were rounded.
    SolvedRounded,
    /// Solved; rounding was requested for reporting only.
    SolvedWouldRound,
    /// Problem is infeasible.
    Infeasible,
    /// Could not distinguish infeasible from unbounded.
    InfeasibleOrUnbounded,
    /// Problem is unbounded.
    Unbounded,
    /// Solver stopped with an indeterminate outcome (limit reached with
    /// a feasible point, numerical trouble, ...).
    Uncertain,
    /// Cooperative cancellation was observed.
    Interrupted,
    /// The solve failed outright.
    Failure,
    /// Sentinel: no status assigned yet.
    NotChecked,
}

impl SolveStatus {
    /// True once `classify_status` has run.
    pub fn is_assigned(self) -> bool {
        self != SolveStatus::NotChecked
    }

    /// Optimal solution or feasible solution of a satisfaction problem.
    pub fn is_problem_solved(self) -> bool {
        debug_assert!(self.is_assigned());
        self == SolveStatus::Solved
    }

    /// Anywhere in the contiguous infeasible..unbounded range.
    pub fn is_problem_inf_or_unb(self) -> bool {
        debug_assert!(self.is_assigned());
        SolveStatus::Infeasible <= self && self <= SolveStatus::Unbounded
    }

    /// Lower half of the range: infeasible, possibly unbounded too.
    pub fn is_problem_infeasible(self) -> bool {
        debug_assert!(self.is_assigned());
        SolveStatus::Infeasible <= self && self < SolveStatus::Unbounded
    }

    /// Upper half of the range: unbounded, possibly infeasible too.
    pub fn is_problem_unbounded(self) -> bool {
        debug_assert!(self.is_assigned());
        SolveStatus::Infeasible < self && self <= SolveStatus::Unbounded
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Solved => "solved",
            SolveStatus::SolvedRounded => "solved_rounded",
            SolveStatus::SolvedWouldRound => "solved_would_round",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::InfeasibleOrUnbounded => "infeasible_or_unbounded",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::Uncertain => "uncertain",
            SolveStatus::Interrupted => "interrupted",
            SolveStatus::Failure => "failure",
            SolveStatus::NotChecked => "not_checked",
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::SolveStatus;

    const INF_UNB_RANGE: [SolveStatus; 3] = [
        SolveStatus::Infeasible,
        SolveStatus::InfeasibleOrUnbounded,
        SolveStatus::Unbounded,
    ];

    #[test]
    fn test_solved_is_exclusive_with_inf_or_unb() {
        assert!(SolveStatus::Solved.is_problem_solved());
        assert!(!SolveStatus::Solved.is_problem_inf_or_unb());
        for status in INF_UNB_RANGE {
            assert!(status.is_problem_inf_or_unb(), "{status}");
            assert!(!status.is_problem_solved(), "{status}");
        }
    }

    #[test]
    fn test_range_subdivision_at_midpoint() {
        assert!(SolveStatus::Infeasible.is_problem_infeasible());
        assert!(!SolveStatus::Infeasible.is_problem_unbounded());
        assert!(SolveStatus::InfeasibleOrUnbounded.is_problem_infeasible());
        assert!(SolveStatus::InfeasibleOrUnbounded.is_problem_unbounded());
        assert!(!SolveStatus::Unbounded.is_problem_infeasible());
        assert!(SolveStatus::Unbounded.is_problem_unbounded());
    }

    #[test]
    fn test_statuses_outside_range() {
        for status in [
            SolveStatus::Uncertain,
            SolveStatus::Interrupted,
            SolveStatus::Failure,
        ] {
            assert!(!status.is_problem_inf_or_unb(), "{status}");
            assert!(!status.is_problem_solved(), "{status}");
        }
    }

    #[test]
    fn test_rounding_codes_sit_between_solved_and_infeasible() {
        assert!(SolveStatus::Solved < SolveStatus::SolvedRounded);
        assert!(SolveStatus::SolvedRounded < SolveStatus::SolvedWouldRound);
        assert!(SolveStatus::SolvedWouldRound < SolveStatus::Infeasible);
        assert!(!SolveStatus::SolvedRounded.is_problem_solved());
        assert!(!SolveStatus::SolvedRounded.is_problem_inf_or_unb());
    }

    #[test]
    fn test_total_order_matches_taxonomy() {
        assert!(SolveStatus::Unbounded < SolveStatus::Uncertain);
        assert!(SolveStatus::Uncertain < SolveStatus::Interrupted);
        assert!(SolveStatus::Interrupted < SolveStatus::Failure);
        assert!(SolveStatus::Failure < SolveStatus::NotChecked);
    }

    #[test]
    fn test_not_checked_is_unassigned() {
        assert!(!SolveStatus::NotChecked.is_assigned());
        assert!(SolveStatus::Solved.is_assigned());
    }
}
