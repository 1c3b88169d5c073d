use crate::error::{Interrupt, WrongVariantError};

/// Which side of an [`Outcome`] is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Success,
    Failure,
}

impl Variant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a step or of a whole transaction.
///
/// Exactly one variant is active. Steps return outcomes; the executor unwraps
/// successes for the calling block and turns failures into a halt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Outcome<T, E> {
    Success(T),
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    /// Wrap a value as a success.
    pub const fn pure(value: T) -> Self {
        Self::Success(value)
    }

    /// Wrap an error as a failure.
    pub const fn failure(error: E) -> Self {
        Self::Failure(error)
    }

    #[must_use]
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Success(_) => Variant::Success,
            Self::Failure(_) => Variant::Failure,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Extract the success payload.
    ///
    /// # Errors
    ///
    /// Returns [`WrongVariantError`] when called on a failure.
    pub fn value(self) -> Result<T, WrongVariantError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(_) => Err(WrongVariantError::new(Variant::Success, Variant::Failure)),
        }
    }

    /// Extract the failure payload.
    ///
    /// # Errors
    ///
    /// Returns [`WrongVariantError`] when called on a success.
    pub fn error(self) -> Result<E, WrongVariantError> {
        match self {
            Self::Failure(error) => Ok(error),
            Self::Success(_) => Err(WrongVariantError::new(Variant::Failure, Variant::Success)),
        }
    }

    pub const fn as_ref(&self) -> Outcome<&T, &E> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    pub fn map_failure<G, F>(self, f: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(error) => Outcome::Failure(f(error)),
        }
    }

    /// Chain another fallible computation onto a success.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> Outcome<U, E>,
    {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(error) => Outcome::Failure(error),
        }
    }

    /// Convert into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure payload as `Err`.
    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }

    /// Hand this outcome back to an orchestrated block.
    ///
    /// A success becomes the plain value; a failure halts the block exactly
    /// as a failing step would, so a block can end with an outcome it already
    /// holds and the variant reaches the caller unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupt::Halt`] carrying the failure payload.
    pub fn settle(self) -> Result<T, Interrupt<E>> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(Interrupt::Halt(error)),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }
}
