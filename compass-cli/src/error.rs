//! Error types emitted by the Compass CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use compass_scorer::WeightsError;
use thiserror::Error;

/// Errors emitted by the Compass CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option was present but could not be interpreted.
    #[error("invalid {field}: {reason}")]
    InvalidOption {
        field: &'static str,
        reason: String,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening or reading a provider payload failed.
    #[error("failed to read payload at {path:?}: {source}")]
    ReadPayload {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A provider payload was not a record array or `results` envelope.
    #[error("failed to parse payload JSON at {path:?}: {source}")]
    ParsePayload {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Loading the scoring weights failed.
    #[error(transparent)]
    Weights(#[from] WeightsError),
    /// Serialising the ranked response failed.
    #[error("failed to serialise response: {0}")]
    SerialiseResponse(#[source] serde_json::Error),
    /// Creating the output file or its parent directory failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the ranked response failed.
    #[error("failed to write response: {0}")]
    WriteOutput(#[source] std::io::Error),
}
