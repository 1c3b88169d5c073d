use std::sync::Arc;

use indexmap::IndexMap;

use crate::erased::{ErasedStep, StepWrapper};
use crate::outcome::Outcome;
use crate::step::{FnStep, Step};

/// Named steps available to one orchestrator.
///
/// Names are unique: registering a name twice keeps the later step. Entries
/// are shared, so cloning or merging a table never copies step state.
pub struct OperationTable<E> {
    steps: IndexMap<String, Arc<dyn ErasedStep<E>>>,
}

impl<E: 'static> OperationTable<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: IndexMap::new(),
        }
    }

    /// Register a closure under `name`.
    #[must_use]
    pub fn step<F, I, O>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(I) -> Outcome<O, E> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
    {
        self.insert(name, FnStep::new(f))
    }

    /// Register a [`Step`] implementation under `name`.
    #[must_use]
    pub fn insert<S>(mut self, name: impl Into<String>, step: S) -> Self
    where
        S: Step<E> + 'static,
    {
        self.steps.insert(name.into(), Arc::new(StepWrapper::new(step)));
        self
    }

    /// Union of both tables; entries of `other` win on a name collision.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut steps = self.steps.clone();
        for (name, step) in &other.steps {
            steps.insert(name.clone(), Arc::clone(step));
        }
        Self { steps }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&dyn ErasedStep<E>> {
        self.steps.get(name).map(|step| &**step)
    }
}

impl<E> OperationTable<E> {
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.steps.contains_key(name)
    }

    /// Step names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<E: 'static> Default for OperationTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for OperationTable<E> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
        }
    }
}

impl<E> std::fmt::Debug for OperationTable<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
