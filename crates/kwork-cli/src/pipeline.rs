use kwork::{Continuation, Delegate, Hook, Outcome, Transaction, TransactionError};
use tracing::info;

use crate::audit::AuditLog;
use crate::error::{CliError, Result};
use crate::manifest::Manifest;
use crate::ops::{StepFailure, builtin_steps, manifest_steps};

const DEFAULT_NAME: &str = "pipeline";

pub(crate) type RunResult = std::result::Result<Outcome<i64, StepFailure>, TransactionError>;

/// Logs the start and end of every pipeline run.
struct LoggingHook;

impl Hook for LoggingHook {
    fn around(&self, body: Continuation<'_>) {
        info!("pipeline started");
        let completion = body.run();
        info!(%completion, "pipeline finished");
    }
}

/// A manifest's step sequence, run as one transaction.
pub(crate) struct Pipeline {
    txn: Transaction<StepFailure>,
    sequence: Vec<String>,
}

impl Delegate<StepFailure> for Pipeline {
    fn orchestrator(&self) -> &Transaction<StepFailure> {
        &self.txn
    }
}

impl Pipeline {
    /// Built-in steps overlaid with the manifest's own; manifest names win.
    pub(crate) fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let name = manifest
            .pipeline
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let txn = Transaction::new(builtin_steps())
            .with(manifest_steps(&manifest.steps))
            .named(name)
            .with_hook(LoggingHook);

        let pipeline = Self {
            txn,
            sequence: manifest.pipeline.sequence.clone(),
        };
        if let Some(unknown) = pipeline
            .sequence
            .iter()
            .find(|step| !pipeline.responds_to(step))
        {
            return Err(CliError::UnknownStep(unknown.clone()));
        }
        Ok(pipeline)
    }

    pub(crate) fn name(&self) -> &str {
        self.txn.label()
    }

    pub(crate) fn step_names(&self) -> impl Iterator<Item = &str> {
        self.txn.operations().names()
    }

    /// Thread `input` through every step in sequence.
    pub(crate) fn run(&self, input: i64) -> (RunResult, AuditLog) {
        let mut audit = AuditLog::new();
        let result = self.transaction(|_| {
            let mut value = input;
            for (index, name) in self.sequence.iter().enumerate() {
                audit.record_start(name);
                match self.invoke(name, value) {
                    Ok(next) => {
                        audit.record_success();
                        value = next;
                    }
                    Err(interrupt) => {
                        audit.record_failure();
                        for skipped in &self.sequence[index + 1..] {
                            audit.record_skipped(skipped);
                        }
                        return Err(interrupt);
                    }
                }
            }
            Ok(value)
        });
        (result, audit)
    }
}
