//! Per-backend constraint acceptance declarations.

use std::collections::HashMap;

use ponte_model::ConstraintKind;

/// Level of acceptance of a constraint kind by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AcceptanceLevel {
    NotAccepted,
    AcceptedButNotRecommended,
    Recommended,
}

/// Static capability table of one backend: constraint kind -> acceptance
/// level, resolved once at backend construction. Every kind not
/// explicitly set is `NotAccepted`.
#[derive(Debug, Clone, Default)]
pub struct ConstraintCapabilities {
    levels: HashMap<ConstraintKind, AcceptanceLevel>,
}

impl ConstraintCapabilities {
    /// Empty table: nothing accepted.
    pub fn new() -> Self {
        Self::default()
    }

    /// The usual baseline: plain linear rows are recommended, defining
    /// rows are lowered to linear first.
    pub fn standard() -> Self {
        Self::new().accept(ConstraintKind::Linear, AcceptanceLevel::Recommended)
    }

    /// Declare an acceptance level for a kind.
    pub fn accept(mut self, kind: ConstraintKind, level: AcceptanceLevel) -> Self {
        self.levels.insert(kind, level);
        self
    }

    pub fn acceptance(&self, kind: ConstraintKind) -> AcceptanceLevel {
        self.levels
            .get(&kind)
            .copied()
            .unwrap_or(AcceptanceLevel::NotAccepted)
    }

    pub fn is_accepted(&self, kind: ConstraintKind) -> bool {
        self.acceptance(kind) != AcceptanceLevel::NotAccepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_accepted() {
        let caps = ConstraintCapabilities::new();
        assert_eq!(
            caps.acceptance(ConstraintKind::Quadratic),
            AcceptanceLevel::NotAccepted
        );
        assert!(!caps.is_accepted(ConstraintKind::Linear));
    }

    #[test]
    fn test_standard_recommends_linear_only() {
        let caps = ConstraintCapabilities::standard();
        assert_eq!(
            caps.acceptance(ConstraintKind::Linear),
            AcceptanceLevel::Recommended
        );
        assert_eq!(
            caps.acceptance(ConstraintKind::LinearDefining),
            AcceptanceLevel::NotAccepted
        );
    }

    #[test]
    fn test_accept_overrides_per_kind() {
        let caps = ConstraintCapabilities::standard()
            .accept(
                ConstraintKind::Indicator,
                AcceptanceLevel::AcceptedButNotRecommended,
            )
            .accept(
                ConstraintKind::Custom("AbsConstraint"),
                AcceptanceLevel::Recommended,
            );
        assert!(caps.is_accepted(ConstraintKind::Indicator));
        assert!(caps.is_accepted(ConstraintKind::Custom("AbsConstraint")));
        assert!(!caps.is_accepted(ConstraintKind::Custom("MaxConstraint")));
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(AcceptanceLevel::NotAccepted < AcceptanceLevel::AcceptedButNotRecommended);
        assert!(AcceptanceLevel::AcceptedButNotRecommended < AcceptanceLevel::Recommended);
    }
}
