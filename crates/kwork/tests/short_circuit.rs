//! Integration tests for chaining steps and stopping at the first failure.

use std::sync::{Arc, Mutex};

use kwork::{Interrupt, OperationTable, Outcome, Transaction, TransactionError, Variant};

#[derive(Debug, Clone, PartialEq)]
enum TestError {
    Error,
    Invalid(String),
}

fn success(value: i32) -> Outcome<i32, TestError> {
    Outcome::pure(value)
}

fn failure(error: TestError) -> Outcome<i32, TestError> {
    Outcome::failure(error)
}

fn adders() -> OperationTable<TestError> {
    OperationTable::new()
        .step("add_one", |x: i32| success(x + 1))
        .step("add_two", |x: i32| success(x + 2))
}

#[test]
fn chains_operations() -> anyhow::Result<()> {
    let instance = Transaction::new(adders());

    let result = instance.transaction(|e| {
        let x: i32 = e.call("add_one", 1)?;
        e.call::<i32, i32>("add_two", x)
    })?;

    assert_eq!(result.value()?, 4);
    Ok(())
}

#[test]
fn stops_chaining_on_failure() -> anyhow::Result<()> {
    let instance = Transaction::new(
        OperationTable::new()
            .step("add_one", |_: i32| failure(TestError::Error))
            .step("add_two", |x: i32| success(x + 2)),
    );

    let result = instance.transaction(|e| {
        e.call::<i32, i32>("add_one", 1)?;
        Err::<i32, _>(Interrupt::raise("never reached"))
    })?;

    assert_eq!(result.error()?, TestError::Error);
    Ok(())
}

#[test]
fn intersperses_plain_code_between_steps() -> anyhow::Result<()> {
    let instance = Transaction::new(adders());

    let result = instance.transaction(|e| {
        let x: i32 = e.call("add_one", 1)?;
        let y = x + 1;
        e.call::<i32, i32>("add_two", y)
    })?;

    assert_eq!(result, Outcome::pure(5));
    Ok(())
}

#[test]
fn steps_after_a_failure_are_never_invoked() -> anyhow::Result<()> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let recorder = |name: &'static str, fail: bool| {
        let log = Arc::clone(&log);
        move |x: i32| {
            log.lock().expect("lock log").push(name);
            if fail {
                failure(TestError::Invalid(name.to_string()))
            } else {
                success(x)
            }
        }
    };
    let instance = Transaction::new(
        OperationTable::new()
            .step("validate", recorder("validate", false))
            .step("persist", recorder("persist", true))
            .step("notify", recorder("notify", false)),
    );

    let result = instance.transaction(|e| {
        let valid: i32 = e.call("validate", 1)?;
        let stored: i32 = e.call("persist", valid)?;
        e.call::<i32, i32>("notify", stored)
    })?;

    assert_eq!(result, Outcome::failure(TestError::Invalid("persist".to_string())));
    assert_eq!(*log.lock().expect("lock log"), ["validate", "persist"]);
    Ok(())
}

#[test]
fn unknown_step_escapes_even_after_successful_steps() {
    let instance = Transaction::new(adders());

    let result = instance.transaction(|e| {
        let x: i32 = e.call("add_one", 1)?;
        e.call::<i32, i32>("add_three", x)
    });

    assert!(matches!(
        result,
        Err(TransactionError::UnknownStep { ref name }) if name == "add_three"
    ));
}

#[test]
fn unknown_step_is_not_reached_after_a_failure() -> anyhow::Result<()> {
    let instance = Transaction::new(
        OperationTable::new().step("reject", |_: i32| failure(TestError::Error)),
    );

    let result = instance.transaction(|e| {
        e.call::<i32, i32>("reject", 1)?;
        e.call::<i32, i32>("missing", 1)
    })?;

    assert_eq!(result, Outcome::failure(TestError::Error));
    Ok(())
}

#[test]
fn errors_raised_by_the_block_propagate() {
    let instance = Transaction::new(adders());

    let result = instance.transaction(|e| {
        let x: i32 = e.call("add_one", 1)?;
        if x > 1 {
            return Err(Interrupt::raise(std::io::Error::other("disk full")));
        }
        Ok(x)
    });

    let err = result.expect_err("block error must escape");
    assert!(matches!(err, TransactionError::Body(_)));
    let source = std::error::Error::source(&err).expect("body error has a source");
    assert_eq!(source.to_string(), "disk full");
}

#[test]
fn wrong_variant_access_inside_the_block_propagates() {
    let instance = Transaction::new(adders());

    let result = instance.transaction(|_| {
        let value = failure(TestError::Error).value()?;
        Ok(value)
    });

    assert!(matches!(
        result,
        Err(TransactionError::WrongVariant(err)) if err.found == Variant::Failure
    ));
}

#[test]
fn block_can_end_with_an_outcome_it_already_holds() -> anyhow::Result<()> {
    let instance = Transaction::new(adders());

    let kept = instance.transaction(|e| {
        let x: i32 = e.call("add_one", 1)?;
        failure(TestError::Invalid(format!("got {x}"))).settle()
    })?;

    assert_eq!(kept, Outcome::failure(TestError::Invalid("got 2".to_string())));
    Ok(())
}

#[test]
fn one_transaction_serves_concurrent_runs() -> anyhow::Result<()> {
    let instance = Arc::new(Transaction::new(adders()));

    let handles: Vec<_> = (0..4)
        .map(|start| {
            let instance = Arc::clone(&instance);
            std::thread::spawn(move || {
                instance.transaction(|e| {
                    let x: i32 = e.call("add_one", start)?;
                    e.call::<i32, i32>("add_two", x)
                })
            })
        })
        .collect();

    let mut values = Vec::new();
    for handle in handles {
        let outcome = handle
            .join()
            .map_err(|_| anyhow::anyhow!("worker panicked"))??;
        values.push(outcome.value()?);
    }

    assert_eq!(values, [3, 4, 5, 6]);
    Ok(())
}
