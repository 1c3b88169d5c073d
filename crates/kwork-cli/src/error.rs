use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read manifest '{path}'")]
    ReadManifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest '{path}'")]
    ParseManifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("pipeline in '{0}' has an empty sequence")]
    EmptySequence(PathBuf),

    #[error("pipeline sequence references unknown step '{0}'")]
    UnknownStep(String),

    #[error("transaction error")]
    Transaction(#[from] kwork::TransactionError),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::CliError;

    #[test]
    fn empty_sequence_error_includes_path() {
        let err = CliError::EmptySequence(PathBuf::from("/work/kwork.toml"));

        assert!(err.to_string().contains("/work/kwork.toml"));
    }

    #[test]
    fn io_error_converts_via_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");

        let cli_err: CliError = io_err.into();

        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn transaction_error_has_source_chain() {
        let txn_err = kwork::TransactionError::UnknownStep {
            name: "triple".to_string(),
        };
        let cli_err: CliError = txn_err.into();

        let source = std::error::Error::source(&cli_err).expect("transaction error is the source");

        assert_eq!(source.to_string(), "unknown step 'triple'");
    }

    #[test]
    fn read_manifest_error_keeps_io_source() {
        let err = CliError::ReadManifest {
            path: PathBuf::from("kwork.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };

        assert!(err.to_string().contains("kwork.toml"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
