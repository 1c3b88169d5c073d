use std::marker::PhantomData;

use crate::outcome::Outcome;

/// A single fallible unit of business logic.
///
/// Steps are registered by name in an [`OperationTable`](crate::OperationTable)
/// and invoked through the [`Executor`](crate::Executor). Closures become steps
/// through [`FnStep`]; types with their own state can implement the trait
/// directly.
///
/// # Type Parameters
///
/// - `Input`: the argument the step takes (use a tuple for several)
/// - `Output`: the value handed back to the calling block on success
/// - `E`: the failure payload shared by every step in a table
pub trait Step<E>: Send + Sync {
    /// Argument received from the calling block.
    type Input: 'static;

    /// Value produced on success.
    type Output: 'static;

    /// Run the step.
    fn call(&self, input: Self::Input) -> Outcome<Self::Output, E>;
}

/// Adapts a closure `Fn(I) -> Outcome<O, E>` into a [`Step`].
pub struct FnStep<F, I, O> {
    f: F,
    _marker: PhantomData<fn(I) -> O>,
}

impl<F, I, O> FnStep<F, I, O> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<F, I, O, E> Step<E> for FnStep<F, I, O>
where
    F: Fn(I) -> Outcome<O, E> + Send + Sync,
    I: 'static,
    O: 'static,
{
    type Input = I;
    type Output = O;

    fn call(&self, input: I) -> Outcome<O, E> {
        (self.f)(input)
    }
}
