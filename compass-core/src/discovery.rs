//! Discovery and search flows over a [`PlaceSearch`] provider.
//!
//! Discovery fans out one query per selected interest, runs them
//! concurrently, and merges whatever comes back. A failing query is logged,
//! recorded as a [`RankWarning::QueryFailed`], and treated as an empty
//! result list so the rest of the discovery still succeeds. Search runs a
//! single query and surfaces provider failures to the caller.

use std::collections::HashSet;
use std::thread;

use geo::Coord;
use log::warn;

use crate::search::{DEFAULT_ORIGIN, DEFAULT_QUERY_LIMIT};
use crate::{
    PlaceSearch, RankOutcome, RankWarning, RankingPipeline, RawPlace, Scorer, SearchError,
    SearchQuery,
};

/// Interests queried per discovery unless overridden.
pub const DEFAULT_INTEREST_LIMIT: usize = 3;

/// Interests offered to users who have not picked any.
pub const DEFAULT_INTERESTS: [&str; 5] = [
    "coffee shop",
    "restaurant",
    "bookstore",
    "art gallery",
    "music venue",
];

/// Request-scoped discovery parameters.
///
/// Each request builds its own context; nothing here is shared between
/// requests.
///
/// # Examples
/// ```
/// use compass_core::DiscoveryContext;
///
/// let context = DiscoveryContext::new(["Bookstore", "bookstore", " ", "bar", "cafe", "park"]);
/// let texts: Vec<String> = context.queries().into_iter().map(|q| q.text).collect();
/// assert_eq!(texts, ["Bookstore", "bar", "cafe"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryContext {
    interests: Vec<String>,
    origin: Coord<f64>,
    max_interests: usize,
    per_query_limit: usize,
}

impl Default for DiscoveryContext {
    fn default() -> Self {
        Self::new(DEFAULT_INTERESTS)
    }
}

impl DiscoveryContext {
    /// Build a context for `interests` around [`DEFAULT_ORIGIN`].
    #[must_use]
    pub fn new<I, T>(interests: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            interests: interests.into_iter().map(Into::into).collect(),
            origin: DEFAULT_ORIGIN,
            max_interests: DEFAULT_INTEREST_LIMIT,
            per_query_limit: DEFAULT_QUERY_LIMIT,
        }
    }

    /// Replace the query origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: Coord<f64>) -> Self {
        self.origin = origin;
        self
    }

    /// Replace the number of interests queried.
    #[must_use]
    pub const fn with_max_interests(mut self, max_interests: usize) -> Self {
        self.max_interests = max_interests;
        self
    }

    /// Replace the per-query record limit.
    #[must_use]
    pub const fn with_per_query_limit(mut self, limit: usize) -> Self {
        self.per_query_limit = limit;
        self
    }

    /// Interests as supplied by the caller.
    #[must_use]
    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    /// Query origin.
    #[must_use]
    pub const fn origin(&self) -> Coord<f64> {
        self.origin
    }

    /// Queries to issue: the first `max_interests` distinct, non-blank
    /// interests in the order given. Duplicates compare case-insensitively.
    #[must_use]
    pub fn queries(&self) -> Vec<SearchQuery> {
        let mut seen = HashSet::new();
        self.interests
            .iter()
            .map(|interest| interest.trim())
            .filter(|interest| !interest.is_empty())
            .filter(|interest| seen.insert(interest.to_lowercase()))
            .take(self.max_interests)
            .map(|interest| {
                SearchQuery::new(interest)
                    .with_origin(self.origin)
                    .with_limit(self.per_query_limit)
            })
            .collect()
    }
}

/// Run a multi-interest discovery.
///
/// Queries run concurrently on scoped threads; results are merged in
/// interest order so ranking stays deterministic.
pub fn discover<P, S>(
    context: &DiscoveryContext,
    provider: &P,
    pipeline: &RankingPipeline<S>,
) -> RankOutcome
where
    P: PlaceSearch + ?Sized,
    S: Scorer,
{
    let queries = context.queries();
    let results = fetch_all(provider, &queries);

    let mut warnings = Vec::new();
    let batches: Vec<Vec<RawPlace>> = queries
        .iter()
        .zip(results)
        .map(|(query, result)| {
            result.unwrap_or_else(|error| {
                warn!("discovery query {:?} failed: {error}", query.text);
                warnings.push(RankWarning::QueryFailed {
                    query: query.text.clone(),
                    message: error.to_string(),
                });
                Vec::new()
            })
        })
        .collect();
    pipeline.rank_with_warnings(batches, warnings)
}

/// Run a single-query search.
///
/// # Errors
/// Returns [`SearchError::EmptyQuery`] for a blank query and propagates the
/// provider's error otherwise.
pub fn search_places<P, S>(
    query: &SearchQuery,
    provider: &P,
    pipeline: &RankingPipeline<S>,
) -> Result<RankOutcome, SearchError>
where
    P: PlaceSearch + ?Sized,
    S: Scorer,
{
    if query.text.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    let records = provider.search(query)?;
    Ok(pipeline.rank([records]))
}

fn fetch_all<P>(provider: &P, queries: &[SearchQuery]) -> Vec<Result<Vec<RawPlace>, SearchError>>
where
    P: PlaceSearch + ?Sized,
{
    thread::scope(|scope| {
        let handles: Vec<_> = queries
            .iter()
            .map(|query| scope.spawn(move || provider.search(query)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    Err(SearchError::Upstream {
                        message: "search worker panicked".to_owned(),
                    })
                })
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemorySearch, TableScorer};
    use crate::{LegacyPlace, Normalizer, ReferenceYear, ScoredPlace};
    use rstest::{fixture, rstest};

    fn record(id: &str) -> RawPlace {
        RawPlace::Legacy(LegacyPlace {
            fsq_id: Some(id.to_owned()),
            name: Some(id.to_uppercase()),
            ..LegacyPlace::default()
        })
    }

    #[fixture]
    fn pipeline() -> RankingPipeline<TableScorer> {
        let scorer = TableScorer::default()
            .with_score("cafe-1", 75)
            .with_score("books-1", 90)
            .with_score("bar-1", 40);
        RankingPipeline::for_discovery(Normalizer::new(ReferenceYear::new(2025)), scorer)
    }

    #[rstest]
    fn failed_query_contributes_nothing(pipeline: RankingPipeline<TableScorer>) {
        let provider = MemorySearch::default()
            .with_results("coffee shop", vec![record("cafe-1")])
            .with_failure("bookstore", "rate limited")
            .with_results("bar", vec![record("bar-1")]);
        let context = DiscoveryContext::new(["coffee shop", "bookstore", "bar"]);

        let outcome = discover(&context, &provider, &pipeline);

        let ids: Vec<&str> = outcome.places.iter().map(ScoredPlace::id).collect();
        assert_eq!(ids, ["cafe-1", "bar-1"]);
        assert_eq!(
            outcome.warnings,
            [RankWarning::QueryFailed {
                query: "bookstore".into(),
                message: "places provider failed: rate limited".into(),
            }]
        );
    }

    #[rstest]
    fn only_top_interests_are_queried(pipeline: RankingPipeline<TableScorer>) {
        let provider = MemorySearch::default()
            .with_results("a", vec![record("cafe-1")])
            .with_results("b", vec![record("bar-1")])
            .with_results("c", vec![])
            .with_results("d", vec![record("books-1")]);
        let context = DiscoveryContext::new(["a", "b", "c", "d"]);

        let outcome = discover(&context, &provider, &pipeline);

        assert!(outcome.places.iter().all(|place| place.id() != "books-1"));
        assert_eq!(outcome.places.len(), 2);
    }

    #[rstest]
    fn queries_carry_context_origin_and_limit() {
        let origin = Coord { x: -73.95, y: 40.65 };
        let context = DiscoveryContext::new(["bar"])
            .with_origin(origin)
            .with_per_query_limit(2);
        let queries = context.queries();
        assert_eq!(queries, [SearchQuery::new("bar").with_origin(origin).with_limit(2)]);
    }

    #[rstest]
    fn default_context_uses_default_interests() {
        let texts: Vec<String> = DiscoveryContext::default()
            .queries()
            .into_iter()
            .map(|query| query.text)
            .collect();
        assert_eq!(texts, ["coffee shop", "restaurant", "bookstore"]);
    }

    #[rstest]
    fn search_rejects_blank_query(pipeline: RankingPipeline<TableScorer>) {
        let provider = MemorySearch::default();
        let err = search_places(&SearchQuery::new("  "), &provider, &pipeline)
            .expect_err("blank query should fail");
        assert_eq!(err, SearchError::EmptyQuery);
    }

    #[rstest]
    fn search_propagates_provider_failure(pipeline: RankingPipeline<TableScorer>) {
        let provider = MemorySearch::default().with_failure("bar", "offline");
        let err = search_places(&SearchQuery::new("bar"), &provider, &pipeline)
            .expect_err("provider failure should surface");
        assert_eq!(
            err,
            SearchError::Upstream {
                message: "offline".into()
            }
        );
    }

    #[rstest]
    fn search_ranks_single_batch(pipeline: RankingPipeline<TableScorer>) {
        let provider =
            MemorySearch::default().with_results("books", vec![record("bar-1"), record("books-1")]);
        let outcome = search_places(&SearchQuery::new("books"), &provider, &pipeline)
            .expect("search succeeds");
        let ids: Vec<&str> = outcome.places.iter().map(ScoredPlace::id).collect();
        assert_eq!(ids, ["books-1", "bar-1"]);
    }
}
