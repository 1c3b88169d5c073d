use std::error::Error as StdError;
use std::fmt::Debug;

use thiserror::Error;

use crate::outcome::Variant;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An outcome accessor was called on the other variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected a {expected} outcome, found a {found}")]
pub struct WrongVariantError {
    /// Variant the accessor requires.
    pub expected: Variant,
    /// Variant the outcome actually holds.
    pub found: Variant,
}

impl WrongVariantError {
    pub(crate) const fn new(expected: Variant, found: Variant) -> Self {
        Self { expected, found }
    }
}

/// Defects that escape a transaction instead of becoming a failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransactionError {
    /// No step with this name is registered.
    #[error("unknown step '{name}'")]
    UnknownStep {
        /// Name that was looked up.
        name: String,
    },

    /// The step was called with an argument of the wrong type.
    #[error("step '{step}' takes `{expected}` but was called with `{found}`")]
    InputMismatch {
        step: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The step produced a value the caller did not ask for.
    #[error("step '{step}' produces `{produced}` but the caller expected `{expected}`")]
    OutputMismatch {
        step: String,
        produced: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    WrongVariant(#[from] WrongVariantError),

    /// The wrapping hook returned without running the transaction body.
    #[error("transaction hook returned without running the transaction body")]
    BodyNotRun,

    /// The block raised an error of its own.
    #[error("transaction body raised an error")]
    Body(#[source] BoxError),
}

/// Why an orchestrated block stopped before reaching its end.
///
/// Blocks propagate this with `?`. The orchestrator turns [`Interrupt::Halt`]
/// into [`Outcome::Failure`](crate::Outcome::Failure) and hands every
/// [`Interrupt::Error`] back to its caller untouched.
#[derive(Debug)]
pub enum Interrupt<E> {
    /// A step failed; the transaction resolves to this failure.
    Halt(E),
    /// A defect; propagated out of the transaction.
    Error(TransactionError),
}

impl<E> Interrupt<E> {
    /// Abort the block with an arbitrary error of the caller's own.
    ///
    /// Unlike a step failure this is not converted into an outcome.
    pub fn raise<X>(error: X) -> Self
    where
        X: Into<BoxError>,
    {
        Self::Error(TransactionError::Body(error.into()))
    }

    #[must_use]
    pub const fn is_halt(&self) -> bool {
        matches!(self, Self::Halt(_))
    }
}

impl<E> From<TransactionError> for Interrupt<E> {
    fn from(error: TransactionError) -> Self {
        Self::Error(error)
    }
}

impl<E> From<WrongVariantError> for Interrupt<E> {
    fn from(error: WrongVariantError) -> Self {
        Self::Error(TransactionError::WrongVariant(error))
    }
}

impl<E: Debug> std::fmt::Display for Interrupt<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Halt(error) => write!(f, "halted by step failure: {error:?}"),
            Self::Error(error) => write!(f, "{error}"),
        }
    }
}
