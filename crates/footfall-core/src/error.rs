use thiserror::Error;

/// Rejected leg-layout configuration.
///
/// Layout problems are caught once, at construction; nothing in the tick loop returns an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("leg layout has no legs")]
    Empty,

    #[error("hip offset for leg {leg} is not finite")]
    NonFiniteHipOffset { leg: usize },

    #[error("gait group {group} is empty")]
    EmptyGroup { group: usize },

    #[error("gait group {group} names leg {leg}, but the layout has {count} legs")]
    LegOutOfRange {
        group: usize,
        leg: usize,
        count: usize,
    },

    #[error("leg {leg} appears in more than one gait group")]
    LegInMultipleGroups { leg: usize },

    #[error("leg {leg} is not assigned to any gait group")]
    LegWithoutGroup { leg: usize },
}

/// Failure to map controller output onto a skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("joint table names {actual} feet, but the controller drives {expected} legs")]
    JointCountMismatch { expected: usize, actual: usize },
}
