mod run;
mod steps;

use std::path::Path;
use std::process::ExitCode;

use clap::Subcommand;

use crate::error::Result;
use crate::manifest::Manifest;
use crate::pipeline::Pipeline;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the pipeline on an input value
    Run(run::RunArgs),
    /// List the steps the pipeline can call
    Steps,
}

impl Commands {
    pub(crate) fn execute(self, manifest_path: &Path) -> Result<ExitCode> {
        let manifest = Manifest::load(manifest_path)?;
        let pipeline = Pipeline::from_manifest(&manifest)?;
        tracing::debug!(
            manifest = %manifest_path.display(),
            pipeline = pipeline.name(),
            "loaded pipeline"
        );

        match self {
            Self::Run(args) => run::run(&pipeline, &args),
            Self::Steps => Ok(steps::run(&pipeline)),
        }
    }
}
