//! Normalizes what an orchestrated block returned into an [`Outcome`].
//!
//! A plain value always becomes a success. What happens to an [`Interrupt`]
//! that escaped the block is up to the transaction's [`ResultAdapter`];
//! [`DefaultAdapter`] turns a halt into the failure it carries and returns
//! any other interrupt as the error it is.

use crate::error::{Interrupt, TransactionError};
use crate::hook::Completion;
use crate::outcome::Outcome;

/// Decides how an interrupt that ended a block settles.
///
/// Returning `Ok(error)` makes the transaction a [`Outcome::Failure`];
/// returning `Err` propagates a defect to the caller. Closures of the form
/// `Fn(Interrupt<E>) -> Result<E, TransactionError>` implement this trait.
pub trait ResultAdapter<E>: Send + Sync {
    /// Settle an interrupt that escaped the block.
    ///
    /// # Errors
    ///
    /// Returns the [`TransactionError`] the transaction should report.
    fn interrupted(&self, interrupt: Interrupt<E>) -> Result<E, TransactionError>;
}

impl<E, F> ResultAdapter<E> for F
where
    F: Fn(Interrupt<E>) -> Result<E, TransactionError> + Send + Sync,
{
    fn interrupted(&self, interrupt: Interrupt<E>) -> Result<E, TransactionError> {
        self(interrupt)
    }
}

/// Halts become failures, everything else stays a defect.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAdapter;

impl<E> ResultAdapter<E> for DefaultAdapter {
    fn interrupted(&self, interrupt: Interrupt<E>) -> Result<E, TransactionError> {
        match interrupt {
            Interrupt::Halt(error) => Ok(error),
            Interrupt::Error(error) => Err(error),
        }
    }
}

/// Turn a block's return value into the transaction's outcome using
/// [`DefaultAdapter`].
///
/// A block that already holds an outcome returns it through
/// [`Outcome::settle`], so its variant passes through unchanged.
///
/// # Errors
///
/// Returns the [`TransactionError`] carried by [`Interrupt::Error`].
pub fn wrap<T, E>(returned: Result<T, Interrupt<E>>) -> Result<Outcome<T, E>, TransactionError> {
    wrap_with(&DefaultAdapter, returned)
}

/// Like [`wrap`], with `adapter` settling interrupts.
///
/// # Errors
///
/// Returns whatever error `adapter` reports for an interrupt.
pub fn wrap_with<T, E, A>(
    adapter: &A,
    returned: Result<T, Interrupt<E>>,
) -> Result<Outcome<T, E>, TransactionError>
where
    A: ResultAdapter<E> + ?Sized,
{
    match returned {
        Ok(value) => Ok(Outcome::Success(value)),
        Err(interrupt) => adapter.interrupted(interrupt).map(Outcome::Failure),
    }
}

pub(crate) fn completion<T, E>(settled: &Result<Outcome<T, E>, TransactionError>) -> Completion {
    match settled {
        Ok(Outcome::Success(_)) => Completion::Succeeded,
        Ok(Outcome::Failure(_)) => Completion::Failed,
        Err(_) => Completion::Errored,
    }
}
