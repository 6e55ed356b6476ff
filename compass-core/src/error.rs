//! Errors raised while normalising raw place records.

use thiserror::Error;

use crate::ProviderKind;

/// Errors returned by [`Normalizer::normalize`](crate::Normalizer::normalize).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The record carries neither a usable identifier nor a name.
    #[error("{provider} record has no usable identifier or name")]
    InvalidRecord {
        /// Provider shape of the rejected record.
        provider: ProviderKind,
    },
}
