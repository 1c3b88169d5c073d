use std::process::ExitCode;

use clap::Args;
use kwork::Outcome;

use crate::error::Result;
use crate::pipeline::Pipeline;

#[derive(Args)]
pub(crate) struct RunArgs {
    /// Value fed to the first step
    #[arg(long, short = 'i', allow_negative_numbers = true)]
    input: i64,

    /// Print the per-step audit trail after the result
    #[arg(long)]
    audit: bool,
}

pub(super) fn run(pipeline: &Pipeline, args: &RunArgs) -> Result<ExitCode> {
    let (result, audit) = pipeline.run(args.input);
    let outcome = result?;

    let code = match outcome {
        Outcome::Success(value) => {
            println!("success: {value}");
            ExitCode::SUCCESS
        }
        Outcome::Failure(failure) => {
            println!("failure: {failure}");
            ExitCode::FAILURE
        }
    };

    if args.audit {
        println!("{}", audit.summary());
    }
    Ok(code)
}
