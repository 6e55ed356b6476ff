//! The places-search collaborator.
//!
//! The `PlaceSearch` trait abstracts whatever fetches raw records for a
//! query (an HTTP client, a cache, a fixture). The engine never classifies
//! transport failures; it only sees "records" or a [`SearchError`].

use geo::Coord;
use thiserror::Error;

use crate::RawPlace;

/// Records requested per provider query unless overridden.
pub const DEFAULT_QUERY_LIMIT: usize = 5;

/// Origin used when the caller has no location fix (`x = longitude`).
pub const DEFAULT_ORIGIN: Coord<f64> = Coord { x: -74.0, y: 40.7 };

/// A single provider query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Free-text query, e.g. an interest name.
    pub text: String,
    /// Query origin; distances are measured from here.
    pub origin: Coord<f64>,
    /// Maximum number of records to request.
    pub limit: usize,
}

impl SearchQuery {
    /// Build a query around [`DEFAULT_ORIGIN`] with [`DEFAULT_QUERY_LIMIT`].
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: DEFAULT_ORIGIN,
            limit: DEFAULT_QUERY_LIMIT,
        }
    }

    /// Replace the origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: Coord<f64>) -> Self {
        self.origin = origin;
        self
    }

    /// Replace the record limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Errors surfaced by a [`PlaceSearch`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The query text was empty.
    #[error("search query must not be empty")]
    EmptyQuery,
    /// The upstream provider failed.
    #[error("places provider failed: {message}")]
    Upstream {
        /// Provider error description.
        message: String,
    },
}

/// Fetch raw place records for a query.
///
/// Implementations must be `Send + Sync`; discovery issues one query per
/// interest concurrently against a shared provider.
///
/// # Examples
///
/// ```rust
/// use compass_core::{LegacyPlace, PlaceSearch, RawPlace, SearchError, SearchQuery};
///
/// struct OnePlace;
///
/// impl PlaceSearch for OnePlace {
///     fn search(&self, query: &SearchQuery) -> Result<Vec<RawPlace>, SearchError> {
///         Ok(vec![RawPlace::Legacy(LegacyPlace {
///             fsq_id: Some("1".into()),
///             name: Some(query.text.clone()),
///             ..LegacyPlace::default()
///         })])
///     }
/// }
///
/// let records = OnePlace.search(&SearchQuery::new("bookstore"))?;
/// assert_eq!(records.len(), 1);
/// # Ok::<(), SearchError>(())
/// ```
pub trait PlaceSearch: Send + Sync {
    /// Return up to `query.limit` records for `query`.
    ///
    /// # Errors
    /// Returns [`SearchError`] when the provider cannot answer.
    fn search(&self, query: &SearchQuery) -> Result<Vec<RawPlace>, SearchError>;
}
