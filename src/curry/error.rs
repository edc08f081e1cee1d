//! Contract-violation errors for the curry engine.

use std::error::Error as StdError;
use std::fmt;

/// A violation of the curry engine's argument-vector contract.
///
/// Invocation failures inside the wrapped function are never represented
/// here - those propagate as whatever the function itself produces. This
/// type covers only the two vector shapes the engine refuses to guess
/// about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurryError {
    /// A fixed-arity resolver was given a vector with the wrong number of
    /// placeholders. Resolvers accept exactly one.
    PlaceholderCount {
        /// How many placeholders the vector actually contained.
        found: usize,
    },
    /// More concrete arguments were supplied than the arity, and the
    /// function's result was a plain value rather than another curried
    /// function, leaving the surplus with nothing to apply to.
    NotCallable {
        /// How many surplus arguments were left over.
        surplus: usize,
    },
}

impl fmt::Display for CurryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurryError::PlaceholderCount { found } => write!(
                f,
                "resolver expects exactly one placeholder, found {}",
                found
            ),
            CurryError::NotCallable { surplus } => write!(
                f,
                "cannot apply {} surplus argument(s) to a plain value",
                surplus
            ),
        }
    }
}

impl StdError for CurryError {}
