use std::process::ExitCode;

use crate::pipeline::Pipeline;

pub(super) fn run(pipeline: &Pipeline) -> ExitCode {
    for name in pipeline.step_names() {
        println!("{name}");
    }
    ExitCode::SUCCESS
}
