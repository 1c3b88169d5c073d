use std::any::{Any, type_name};

use crate::outcome::Outcome;
use crate::step::Step;

pub(crate) type AnyValue = Box<dyn Any>;

/// Object-safe view of a [`Step`] so steps with different input and output
/// types can share one table.
pub(crate) trait ErasedStep<E>: Send + Sync {
    fn input_type(&self) -> &'static str;

    fn output_type(&self) -> &'static str;

    /// Returns `None` when `input` is not the step's input type.
    fn call_erased(&self, input: AnyValue) -> Option<Outcome<AnyValue, E>>;
}

pub(crate) struct StepWrapper<S> {
    step: S,
}

impl<S> StepWrapper<S> {
    pub(crate) fn new(step: S) -> Self {
        Self { step }
    }
}

impl<S, E> ErasedStep<E> for StepWrapper<S>
where
    S: Step<E>,
{
    fn input_type(&self) -> &'static str {
        type_name::<S::Input>()
    }

    fn output_type(&self) -> &'static str {
        type_name::<S::Output>()
    }

    fn call_erased(&self, input: AnyValue) -> Option<Outcome<AnyValue, E>> {
        let typed_input = input.downcast::<S::Input>().ok()?;
        let outcome = self.step.call(*typed_input);
        Some(outcome.map(|output| Box::new(output) as AnyValue))
    }
}
