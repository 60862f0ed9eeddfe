//! Usage context propagated to result variables of decompositions.

/// How a derived result variable is used by the constraints that
/// reference it.
///
/// Simplification passes exploit this: a result used only positively
/// (e.g. only on the smaller side of inequalities) may need just one
/// defining direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    /// No usage recorded yet.
    #[default]
    Unknown,
    /// Used only in positive (relaxable-from-above) positions.
    Positive,
    /// Used only in negative positions.
    Negative,
    /// Used both ways; both defining directions are required.
    Mixed,
}

impl Context {
    /// Merge a newly observed usage into the accumulated context.
    pub fn combine(self, other: Context) -> Context {
        match (self, other) {
            (Context::Unknown, c) | (c, Context::Unknown) => c,
            (a, b) if a == b => a,
            _ => Context::Mixed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Context::Unknown => "unknown",
            Context::Positive => "positive",
            Context::Negative => "negative",
            Context::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
