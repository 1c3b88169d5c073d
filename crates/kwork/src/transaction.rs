use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, debug_span};

use crate::adapter::{self, DefaultAdapter, ResultAdapter};
use crate::error::{Interrupt, TransactionError};
use crate::executor::Executor;
use crate::hook::{Continuation, Hook, Passthrough};
use crate::outcome::Outcome;
use crate::table::OperationTable;

const DEFAULT_LABEL: &str = "transaction";

/// A business transaction built from named steps.
///
/// [`transaction`](Self::transaction) runs a block against the
/// [`Executor`]. Each step's success arrives in the block as a plain value;
/// the first failing step ends the block and becomes the transaction's
/// [`Outcome::Failure`].
pub struct Transaction<E> {
    operations: Arc<OperationTable<E>>,
    executor: Executor<E>,
    adapter: Arc<dyn ResultAdapter<E>>,
    hook: Arc<dyn Hook>,
    label: Cow<'static, str>,
}

impl<E: 'static> Transaction<E> {
    #[must_use]
    pub fn new(operations: OperationTable<E>) -> Self {
        let operations = Arc::new(operations);
        Self {
            executor: Executor::new(Arc::clone(&operations)),
            operations,
            adapter: Arc::new(DefaultAdapter),
            hook: Arc::new(Passthrough),
            label: Cow::Borrowed(DEFAULT_LABEL),
        }
    }

    /// Bracket every run with `hook`.
    #[must_use]
    pub fn with_hook<H>(mut self, hook: H) -> Self
    where
        H: Hook + 'static,
    {
        self.hook = Arc::new(hook);
        self
    }

    /// Settle interrupts that end the block with `adapter` instead of
    /// [`DefaultAdapter`].
    #[must_use]
    pub fn with_adapter<A>(mut self, adapter: A) -> Self
    where
        A: ResultAdapter<E> + 'static,
    {
        self.adapter = Arc::new(adapter);
        self
    }

    /// Name used for this transaction in log output.
    #[must_use]
    pub fn named(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// A new transaction whose table also holds `operations`.
    ///
    /// Entries in `operations` replace same-named steps. The receiver is left
    /// untouched. The adapter and label carry over; the hook does not, so the
    /// new transaction runs with [`Passthrough`] until one is set again.
    #[must_use]
    pub fn with(&self, operations: OperationTable<E>) -> Self {
        let mut extended =
            Self::new(self.operations.merged(&operations)).named(self.label.clone());
        extended.adapter = Arc::clone(&self.adapter);
        extended
    }

    /// Run `block` as one unit of work.
    ///
    /// The hook wraps the run. Inside the block, call steps through the
    /// executor and propagate with `?`: a step failure ends the block. The
    /// transaction's [`ResultAdapter`] settles the interrupt; with
    /// [`DefaultAdapter`] a step failure is returned as [`Outcome::Failure`].
    ///
    /// A plain return value becomes [`Outcome::Success`]. A block that already
    /// holds an [`Outcome`] should end with [`Outcome::settle`] so its variant
    /// passes through; returning `Ok(outcome)` instead yields a success that
    /// wraps the outcome, such as `Success(Failure(e))`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransactionError`] for anything that is not a step
    /// failure: unknown steps, mismatched step types, wrong-variant access,
    /// errors raised by the block, or a hook that never ran the body.
    pub fn transaction<T, F>(&self, block: F) -> Result<Outcome<T, E>, TransactionError>
    where
        F: FnOnce(&Executor<E>) -> Result<T, Interrupt<E>>,
    {
        let span = debug_span!("transaction", name = %self.label);
        let _entered = span.enter();

        let mut settled = None;
        self.hook.around(Continuation::new(|| {
            let result = adapter::wrap_with(&*self.adapter, block(&self.executor));
            let completion = adapter::completion(&result);
            debug!(%completion, "transaction body settled");
            settled = Some(result);
            completion
        }));

        settled.unwrap_or(Err(TransactionError::BodyNotRun))
    }
}

impl<E> Transaction<E> {
    #[must_use]
    pub fn operations(&self) -> &OperationTable<E> {
        &self.operations
    }

    #[must_use]
    pub fn executor(&self) -> &Executor<E> {
        &self.executor
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<E> Clone for Transaction<E> {
    fn clone(&self) -> Self {
        Self {
            operations: Arc::clone(&self.operations),
            executor: self.executor.clone(),
            adapter: Arc::clone(&self.adapter),
            hook: Arc::clone(&self.hook),
            label: self.label.clone(),
        }
    }
}

impl<E> std::fmt::Debug for Transaction<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("label", &self.label)
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::hook::Completion;

    fn add(n: i32) -> impl Fn(i32) -> Outcome<i32, String> + Send + Sync + 'static {
        move |x| Outcome::pure(x + n)
    }

    struct RecordingHook {
        completions: Arc<Mutex<Vec<Completion>>>,
    }

    impl Hook for RecordingHook {
        fn around(&self, body: Continuation<'_>) {
            let completion = body.run();
            self.completions
                .lock()
                .expect("lock completions")
                .push(completion);
        }
    }

    struct SkippingHook;

    impl Hook for SkippingHook {
        fn around(&self, _body: Continuation<'_>) {}
    }

    #[test]
    fn block_value_becomes_success() {
        let txn = Transaction::new(OperationTable::new().step("add_one", add(1)));

        let outcome = txn
            .transaction(|e| {
                let x: i32 = e.call("add_one", 1)?;
                Ok(x * 10)
            })
            .expect("no defect");

        assert_eq!(outcome, Outcome::pure(20));
    }

    #[test]
    fn hook_sees_each_completion() {
        let completions = Arc::new(Mutex::new(Vec::new()));
        let txn = Transaction::new(
            OperationTable::new()
                .step("add_one", add(1))
                .step("reject", |_: i32| Outcome::<i32, String>::failure("no".to_string())),
        )
        .with_hook(RecordingHook {
            completions: Arc::clone(&completions),
        });

        let _ = txn.transaction(|e| e.call::<i32, i32>("add_one", 1));
        let _ = txn.transaction(|e| e.call::<i32, i32>("reject", 1));
        let _ = txn.transaction(|e| e.call::<i32, i32>("missing", 1));

        assert_eq!(
            *completions.lock().expect("lock completions"),
            [Completion::Succeeded, Completion::Failed, Completion::Errored]
        );
    }

    #[test]
    fn hook_that_skips_the_body_is_reported() {
        let txn = Transaction::new(OperationTable::new().step("add_one", add(1)))
            .with_hook(SkippingHook);

        let result = txn.transaction(|e| e.call::<i32, i32>("add_one", 1));

        assert!(matches!(result, Err(TransactionError::BodyNotRun)));
    }

    #[test]
    fn with_resets_the_hook_and_keeps_the_label() {
        let completions = Arc::new(Mutex::new(Vec::new()));
        let txn = Transaction::new(OperationTable::new().step("add_one", add(1)))
            .named("checkout")
            .with_hook(RecordingHook {
                completions: Arc::clone(&completions),
            });

        let extended = txn.with(OperationTable::new().step("add_two", add(2)));
        let outcome = extended
            .transaction(|e| e.call::<i32, i32>("add_two", 1))
            .expect("no defect");

        assert_eq!(outcome, Outcome::pure(3));
        assert_eq!(extended.label(), "checkout");
        assert!(completions.lock().expect("lock completions").is_empty());
    }

    #[test]
    fn with_keeps_a_custom_adapter_while_the_hook_resets() {
        let completions = Arc::new(Mutex::new(Vec::new()));
        let rescue = |interrupt: Interrupt<String>| -> Result<String, TransactionError> {
            match interrupt {
                Interrupt::Halt(error) => Ok(error),
                Interrupt::Error(error) => Ok(format!("rescued: {error}")),
            }
        };
        let txn = Transaction::new(OperationTable::new().step("add_one", add(1)))
            .with_adapter(rescue)
            .with_hook(RecordingHook {
                completions: Arc::clone(&completions),
            });

        let extended = txn.with(OperationTable::new().step("add_two", add(2)));
        let outcome = extended
            .transaction(|e| e.call::<i32, i32>("refund", 1))
            .expect("adapter rescues the defect");

        assert_eq!(
            outcome,
            Outcome::failure("rescued: unknown step 'refund'".to_string())
        );
        assert!(completions.lock().expect("lock completions").is_empty());
    }

    #[test]
    fn block_returning_an_outcome_should_settle_it() {
        let txn = Transaction::new(OperationTable::new().step("add_one", add(1)));

        let settled = txn
            .transaction(|_| Outcome::<i32, String>::failure("bad".to_string()).settle())
            .expect("no defect");
        let nested = txn
            .transaction(|_| Ok(Outcome::<i32, String>::failure("bad".to_string())))
            .expect("no defect");

        assert_eq!(settled, Outcome::failure("bad".to_string()));
        assert_eq!(nested, Outcome::pure(Outcome::failure("bad".to_string())));
    }

    #[test]
    fn default_label_is_transaction() {
        let txn = Transaction::<String>::new(OperationTable::new());

        assert_eq!(txn.label(), "transaction");
        assert!(txn.operations().is_empty());
    }
}
