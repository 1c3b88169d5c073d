//! Railway-style business transactions.
//!
//! A [`Transaction`] owns an [`OperationTable`] of named, fallible steps. Its
//! [`transaction`](Transaction::transaction) method runs a block that calls
//! those steps through an [`Executor`]: every success arrives as a plain
//! value, and the first failure ends the block and becomes the transaction's
//! [`Outcome::Failure`]. Defects (unknown steps, mismatched step types,
//! errors raised by the block itself) are never turned into failures; they
//! come back as [`TransactionError`].
//!
//! ```
//! use kwork::{OperationTable, Outcome, Transaction};
//!
//! let txn = Transaction::<String>::new(
//!     OperationTable::new()
//!         .step("add_one", |x: i32| Outcome::pure(x + 1))
//!         .step("add_two", |x: i32| Outcome::pure(x + 2)),
//! );
//!
//! let outcome = txn.transaction(|e| {
//!     let x: i32 = e.call("add_one", 1)?;
//!     e.call("add_two", x)
//! });
//!
//! assert_eq!(outcome.expect("no defect"), Outcome::pure(4));
//! ```

pub mod adapter;
mod delegate;
mod erased;
mod error;
mod executor;
mod hook;
mod outcome;
mod step;
mod table;
mod transaction;

pub use adapter::{DefaultAdapter, ResultAdapter};
pub use delegate::Delegate;
pub use error::{Interrupt, TransactionError, WrongVariantError};
pub use executor::Executor;
pub use hook::{Completion, Continuation, Hook, Passthrough};
pub use outcome::{Outcome, Variant};
pub use step::{FnStep, Step};
pub use table::OperationTable;
pub use transaction::Transaction;
