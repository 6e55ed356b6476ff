//! Error types raised while loading or validating scoring weights.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating [`AuthenticityWeights`](crate::AuthenticityWeights).
#[derive(Debug, Error)]
pub enum WeightsError {
    /// Opening or reading the weights file failed.
    #[error("failed to read weights file at {path}")]
    Read {
        /// Requested weights path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The weights file was not valid JSON for the weights shape.
    #[error("failed to parse weights file at {path}")]
    Parse {
        /// Requested weights path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// An in-memory weights document was not valid JSON for the weights
    /// shape.
    #[error("failed to parse weights JSON")]
    Decode {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A distance bracket bound was not a positive, finite number of meters.
    #[error("distance bracket bound {below_meters} must be positive and finite")]
    InvalidDistanceBound {
        /// Offending upper bound.
        below_meters: f64,
    },
    /// Distance brackets were not listed nearest first.
    #[error("distance brackets must be listed in strictly ascending order")]
    UnsortedDistanceBrackets,
    /// Age brackets were not listed oldest first.
    #[error("age brackets must be listed in strictly descending order")]
    UnsortedAgeBrackets,
    /// The "many accounts" social threshold would leave no room for the
    /// "few accounts" bracket.
    #[error("social many_from threshold must be at least 2, found {many_from}")]
    InvalidSocialThreshold {
        /// Configured threshold.
        many_from: u8,
    },
}
