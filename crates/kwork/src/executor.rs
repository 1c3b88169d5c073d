use std::any::type_name;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{Interrupt, TransactionError};
use crate::outcome::Outcome;
use crate::table::OperationTable;

/// Invokes named steps on behalf of an orchestrated block.
///
/// A successful step hands its plain value back to the block. A failing step
/// returns [`Interrupt::Halt`], which the block propagates with `?` so nothing
/// after the failing call runs.
pub struct Executor<E> {
    operations: Arc<OperationTable<E>>,
}

impl<E: 'static> Executor<E> {
    #[must_use]
    pub fn new(operations: Arc<OperationTable<E>>) -> Self {
        Self { operations }
    }

    /// Invoke the step registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupt::Halt`] when the step fails, and
    /// [`Interrupt::Error`] when `name` is unknown or the step does not take
    /// `I` or does not produce `O`.
    pub fn call<I, O>(&self, name: &str, input: I) -> Result<O, Interrupt<E>>
    where
        I: 'static,
        O: 'static,
    {
        let step = self
            .operations
            .get(name)
            .ok_or_else(|| TransactionError::UnknownStep {
                name: name.to_string(),
            })?;

        trace!(step = name, "invoking step");
        let outcome = step
            .call_erased(Box::new(input))
            .ok_or_else(|| TransactionError::InputMismatch {
                step: name.to_string(),
                expected: step.input_type(),
                found: type_name::<I>(),
            })?;

        match outcome {
            Outcome::Success(output) => match output.downcast::<O>() {
                Ok(output) => Ok(*output),
                Err(_) => Err(TransactionError::OutputMismatch {
                    step: name.to_string(),
                    produced: step.output_type(),
                    expected: type_name::<O>(),
                }
                .into()),
            },
            Outcome::Failure(error) => {
                debug!(step = name, "step failed, halting transaction");
                Err(Interrupt::Halt(error))
            }
        }
    }
}

impl<E> Executor<E> {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.names()
    }

    #[must_use]
    pub fn operations(&self) -> &OperationTable<E> {
        &self.operations
    }
}

impl<E> Clone for Executor<E> {
    fn clone(&self) -> Self {
        Self {
            operations: Arc::clone(&self.operations),
        }
    }
}

impl<E> std::fmt::Debug for Executor<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("operations", &self.operations)
            .finish()
    }
}
