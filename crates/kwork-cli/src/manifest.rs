use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{CliError, Result};

pub(crate) const DEFAULT_MANIFEST: &str = "kwork.toml";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Manifest {
    pub(crate) pipeline: PipelineSection,
    #[serde(default)]
    pub(crate) steps: IndexMap<String, StepSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PipelineSection {
    pub(crate) name: Option<String>,
    pub(crate) sequence: Vec<String>,
}

/// One arithmetic step declared under `[steps.<name>]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub(crate) enum StepSpec {
    Add { operand: i64 },
    Subtract { operand: i64 },
    Multiply { operand: i64 },
    Divide { operand: i64 },
    RequirePositive,
    Fail { message: String },
}

impl Manifest {
    pub(crate) fn parse(content: &str, path: &Path) -> Result<Self> {
        let manifest: Self = toml::from_str(content).map_err(|source| CliError::ParseManifest {
            path: path.to_path_buf(),
            source,
        })?;
        if manifest.pipeline.sequence.is_empty() {
            return Err(CliError::EmptySequence(path.to_path_buf()));
        }
        Ok(manifest)
    }

    pub(crate) fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadManifest {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }
}

/// `--manifest` wins; otherwise `kwork.toml` in the start directory.
pub(crate) fn resolve_path(start: &Path, manifest: Option<PathBuf>) -> PathBuf {
    match manifest {
        Some(path) if path.is_absolute() => path,
        Some(path) => start.join(path),
        None => start.join(DEFAULT_MANIFEST),
    }
}
