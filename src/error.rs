use thiserror::Error;

/// Every failure the grammar, turtle and walker can report.
///
/// All of these are contract violations by the caller (bad symbol tables,
/// unbalanced push/pop, nonsensical counts). None of them are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LSystemError {
    #[error("no action bound for symbol {symbol:?} at index {index}")]
    UnboundSymbol { symbol: char, index: usize },

    #[error("cannot pop the last turtle state")]
    EmptyStack,

    #[error("state stack exceeded its maximum depth of {max}")]
    StackOverflow { max: usize },

    #[error("iteration count must be non-negative, got {0}")]
    InvalidIterationCount(i64),

    #[error("requested {requested} iterations, ceiling is {max}")]
    IterationLimit { requested: i64, max: u32 },

    #[error("expansion reached {length} symbols at iteration {iteration}, ceiling is {max}")]
    LengthLimit {
        length: usize,
        max: usize,
        iteration: u32,
    },

    #[error("path walk needs at least one step")]
    InvalidStepCount,

    #[error("cannot walk a curve with an unbounded domain")]
    UnboundedDomain,

    #[error("a polyline curve needs at least two points, got {points}")]
    DegeneratePath { points: usize },
}
