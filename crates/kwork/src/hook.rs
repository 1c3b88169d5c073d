/// How a transaction body settled, as reported to its hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Completion {
    /// The body produced a success.
    Succeeded,
    /// A step failed and the transaction resolves to a failure.
    Failed,
    /// A defect escaped the body.
    Errored,
}

impl Completion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Errored => "errored",
        }
    }

    /// Whether a hook guarding an external resource should keep its effects.
    #[must_use]
    pub const fn should_commit(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

impl std::fmt::Display for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The transaction body, handed to a [`Hook`].
///
/// Consumed by [`Continuation::run`], so it runs at most once.
pub struct Continuation<'a> {
    body: Box<dyn FnOnce() -> Completion + 'a>,
}

impl<'a> Continuation<'a> {
    pub(crate) fn new(body: impl FnOnce() -> Completion + 'a) -> Self {
        Self {
            body: Box::new(body),
        }
    }

    /// Run the transaction body.
    pub fn run(self) -> Completion {
        (self.body)()
    }
}

impl std::fmt::Debug for Continuation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Continuation").finish_non_exhaustive()
    }
}

/// Brackets every run of a transaction body.
///
/// Implementations must call [`Continuation::run`] exactly once, typically
/// to open an external resource before the body and commit or roll it back
/// afterwards. A hook that drops the continuation without running it makes
/// the transaction fail with
/// [`TransactionError::BodyNotRun`](crate::TransactionError::BodyNotRun).
pub trait Hook: Send + Sync {
    fn around(&self, body: Continuation<'_>);
}

impl<F> Hook for F
where
    F: Fn(Continuation<'_>) + Send + Sync,
{
    fn around(&self, body: Continuation<'_>) {
        self(body);
    }
}

/// Default hook: runs the body and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Hook for Passthrough {
    fn around(&self, body: Continuation<'_>) {
        body.run();
    }
}
