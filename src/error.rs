use thiserror::Error;

/// Errors raised while building or driving a reduction.
///
/// Every variant is fatal to the `transduce` call that raised it. Early
/// termination through [`Reduced`](crate::Reduced) is not an error and never
/// surfaces here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A terminal reducer was configured with both a combining function and a
    /// named operation, or with neither.
    #[error("invalid reducer configuration: {0}")]
    Configuration(String),

    /// A named operation is not supported by the accumulator it was applied to.
    ///
    /// Raised lazily, on the first `step` that needs the operation.
    #[error("operation `{op}` is not supported by a {target} accumulator")]
    UnknownOperation {
        /// Name of the operation as configured.
        op: String,
        /// Kind of accumulator the operation was applied to.
        target: &'static str,
    },

    /// A named arithmetic operation overflowed the accumulator's integer type.
    #[error("operation `{op}` overflowed a {target} accumulator")]
    Overflow {
        /// Name of the operation.
        op: String,
        /// Kind of accumulator that overflowed.
        target: &'static str,
    },

    /// The drive loop was handed something that is neither an ordered
    /// sequence nor a character sequence.
    #[error("cannot iterate a {kind} source")]
    UnsupportedSourceKind {
        /// Kind of value that was offered as a source.
        kind: &'static str,
    },
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn unknown_operation(op: impl ToString, target: &'static str) -> Self {
        Error::UnknownOperation {
            op: op.to_string(),
            target,
        }
    }

    pub(crate) fn overflow(op: impl ToString, target: &'static str) -> Self {
        Error::Overflow {
            op: op.to_string(),
            target,
        }
    }
}
