/// Status of a pipeline step in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepStatus {
    /// Step was invoked and has not returned yet.
    Running,
    /// Step returned a success.
    Succeeded,
    /// Step halted the pipeline.
    Failed,
    /// Step never ran because an earlier step halted the pipeline.
    Skipped,
}

#[derive(Debug)]
pub(crate) struct StepRecord {
    pub(crate) name: String,
    pub(crate) status: StepStatus,
}

/// Audit trail of a single pipeline run.
#[derive(Debug, Default)]
pub(crate) struct AuditLog {
    records: Vec<StepRecord>,
}

impl AuditLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_start(&mut self, name: &str) {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Running,
        });
    }

    /// Mark the last started step as succeeded.
    pub(crate) fn record_success(&mut self) {
        self.settle_last(StepStatus::Succeeded);
    }

    /// Mark the last started step as failed.
    pub(crate) fn record_failure(&mut self) {
        self.settle_last(StepStatus::Failed);
    }

    fn settle_last(&mut self, status: StepStatus) {
        if let Some(record) = self.records.last_mut() {
            record.status = status;
        }
    }

    pub(crate) fn record_skipped(&mut self, name: &str) {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Skipped,
        });
    }

    pub(crate) fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// One line per step, marked with its status.
    pub(crate) fn summary(&self) -> String {
        let mut lines = Vec::new();
        for record in self.records() {
            let status = match record.status {
                StepStatus::Running => "…",
                StepStatus::Succeeded => "✓",
                StepStatus::Failed => "✗",
                StepStatus::Skipped => "-",
            };
            lines.push(format!("{status} {}", record.name));
        }
        lines.join("\n")
    }
}
