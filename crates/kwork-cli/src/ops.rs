use indexmap::IndexMap;
use kwork::{OperationTable, Outcome};
use thiserror::Error;

use crate::manifest::StepSpec;

/// Business failure of a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub(crate) enum StepFailure {
    #[error("{op} of {value} and {operand} overflows")]
    Overflow {
        op: &'static str,
        value: i64,
        operand: i64,
    },

    #[error("division of {value} by zero")]
    DivisionByZero { value: i64 },

    #[error("{value} is not positive")]
    NotPositive { value: i64 },

    #[error("{0}")]
    Rejected(String),
}

impl StepSpec {
    pub(crate) fn apply(&self, value: i64) -> Outcome<i64, StepFailure> {
        match self {
            Self::Add { operand } => checked("add", value, *operand, i64::checked_add),
            Self::Subtract { operand } => checked("subtract", value, *operand, i64::checked_sub),
            Self::Multiply { operand } => checked("multiply", value, *operand, i64::checked_mul),
            Self::Divide { operand: 0 } => Outcome::failure(StepFailure::DivisionByZero { value }),
            Self::Divide { operand } => checked("divide", value, *operand, i64::checked_div),
            Self::RequirePositive if value > 0 => Outcome::pure(value),
            Self::RequirePositive => Outcome::failure(StepFailure::NotPositive { value }),
            Self::Fail { message } => Outcome::failure(StepFailure::Rejected(message.clone())),
        }
    }
}

fn checked(
    op: &'static str,
    value: i64,
    operand: i64,
    f: fn(i64, i64) -> Option<i64>,
) -> Outcome<i64, StepFailure> {
    f(value, operand).map_or_else(
        || {
            Outcome::failure(StepFailure::Overflow {
                op,
                value,
                operand,
            })
        },
        Outcome::pure,
    )
}

/// Steps every pipeline can use without declaring them.
pub(crate) fn builtin_steps() -> OperationTable<StepFailure> {
    OperationTable::new()
        .step("identity", |value: i64| Outcome::pure(value))
        .step("double", |value: i64| checked("multiply", value, 2, i64::checked_mul))
        .step("negate", |value: i64| {
            value.checked_neg().map_or_else(
                || {
                    Outcome::failure(StepFailure::Overflow {
                        op: "negate",
                        value,
                        operand: -1,
                    })
                },
                Outcome::pure,
            )
        })
}

pub(crate) fn manifest_steps(specs: &IndexMap<String, StepSpec>) -> OperationTable<StepFailure> {
    specs
        .iter()
        .fold(OperationTable::new(), |table, (name, spec)| {
            let spec = spec.clone();
            table.step(name.as_str(), move |value: i64| spec.apply(value))
        })
}
