use crate::error::{Interrupt, TransactionError};
use crate::executor::Executor;
use crate::outcome::Outcome;
use crate::transaction::Transaction;

/// Lets a type that owns a [`Transaction`] call its steps by name directly.
///
/// Implementing this trait is the opt-in: methods on the host can then run
/// [`transaction`](Self::transaction) and call [`invoke`](Self::invoke)
/// without threading the executor through.
///
/// ```
/// use kwork::{Delegate, OperationTable, Outcome, Transaction, TransactionError};
///
/// struct Checkout {
///     steps: Transaction<String>,
/// }
///
/// impl Delegate<String> for Checkout {
///     fn orchestrator(&self) -> &Transaction<String> {
///         &self.steps
///     }
/// }
///
/// impl Checkout {
///     fn call(&self) -> Result<Outcome<i32, String>, TransactionError> {
///         self.transaction(|_| {
///             let two: i32 = self.invoke("add_one", 1)?;
///             self.invoke("add_two", two)
///         })
///     }
/// }
///
/// let checkout = Checkout {
///     steps: Transaction::new(
///         OperationTable::new()
///             .step("add_one", |x: i32| Outcome::pure(x + 1))
///             .step("add_two", |x: i32| Outcome::pure(x + 2)),
///     ),
/// };
///
/// assert_eq!(checkout.call().expect("no defect"), Outcome::pure(4));
/// ```
pub trait Delegate<E: 'static> {
    fn orchestrator(&self) -> &Transaction<E>;

    /// Whether `name` is a registered step.
    fn responds_to(&self, name: &str) -> bool {
        self.orchestrator().operations().contains(name)
    }

    /// Call `name` if it is a registered step, `None` otherwise.
    fn try_invoke<I, O>(&self, name: &str, input: I) -> Option<Result<O, Interrupt<E>>>
    where
        I: 'static,
        O: 'static,
    {
        let executor = self.orchestrator().executor();
        executor.contains(name).then(|| executor.call(name, input))
    }

    /// Call `name` as a step, halting on failure like [`Executor::call`].
    ///
    /// # Errors
    ///
    /// Returns [`Interrupt::Halt`] when the step fails, and
    /// [`TransactionError::UnknownStep`] when the host has no such step.
    fn invoke<I, O>(&self, name: &str, input: I) -> Result<O, Interrupt<E>>
    where
        I: 'static,
        O: 'static,
    {
        self.try_invoke(name, input).unwrap_or_else(|| {
            Err(TransactionError::UnknownStep {
                name: name.to_string(),
            }
            .into())
        })
    }

    /// Run `block` through the owned transaction.
    ///
    /// # Errors
    ///
    /// See [`Transaction::transaction`].
    fn transaction<T, F>(&self, block: F) -> Result<Outcome<T, E>, TransactionError>
    where
        F: FnOnce(&Executor<E>) -> Result<T, Interrupt<E>>,
    {
        self.orchestrator().transaction(block)
    }
}
