//! Normalise, score and aggregate raw query results in one pass.
//!
//! The pipeline owns no state beyond its configuration, so one value can
//! serve any number of requests. Invalid records are skipped and reported
//! as [`RankWarning`]s rather than failing the whole batch.

use std::fmt;

use log::warn;

use crate::{
    NormalizeError, Normalizer, RankingMode, RawPlace, ScoredPlace, Scorer, aggregate,
};

/// Result cap used for multi-interest discovery.
pub const DEFAULT_DISCOVERY_CAP: usize = 6;
/// Result cap used for single-query search.
pub const DEFAULT_SEARCH_CAP: usize = 5;

/// A non-fatal problem encountered while ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankWarning {
    /// A raw record was rejected by the normaliser and skipped.
    SkippedRecord {
        /// Index of the query batch holding the record.
        batch: usize,
        /// Position of the record within its batch.
        position: usize,
        /// Why the record was rejected.
        error: NormalizeError,
    },
    /// A discovery query failed and contributed no results.
    QueryFailed {
        /// Query text sent to the provider.
        query: String,
        /// Provider error description.
        message: String,
    },
}

impl fmt::Display for RankWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedRecord {
                batch,
                position,
                error,
            } => write!(f, "skipped record {position} of query {batch}: {error}"),
            Self::QueryFailed { query, message } => {
                write!(f, "query {query:?} returned no results: {message}")
            }
        }
    }
}

/// Ranked places plus any warnings raised while producing them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankOutcome {
    /// Ranked, deduplicated and capped places.
    pub places: Vec<ScoredPlace>,
    /// Non-fatal problems, in the order they were met.
    pub warnings: Vec<RankWarning>,
}

impl RankOutcome {
    /// Report whether no places were produced.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Normaliser, scorer and ranking policy applied to raw query batches.
///
/// # Examples
/// ```
/// use compass_core::{
///     Assessment, AuthenticityLabel, CanonicalPlace, LegacyPlace, Normalizer, RankingMode,
///     RankingPipeline, RawPlace, ReferenceYear, Scorer,
/// };
///
/// struct Flat;
///
/// impl Scorer for Flat {
///     fn score(&self, _place: &CanonicalPlace) -> Assessment {
///         Assessment { score: 70, label: AuthenticityLabel::VeryAuthentic }
///     }
/// }
///
/// let pipeline = RankingPipeline::new(
///     Normalizer::new(ReferenceYear::new(2025)),
///     Flat,
///     RankingMode::Authenticity,
///     5,
/// );
/// let batch = vec![
///     RawPlace::Legacy(LegacyPlace { fsq_id: Some("a".into()), ..LegacyPlace::default() }),
///     RawPlace::Legacy(LegacyPlace::default()),
/// ];
/// let outcome = pipeline.rank(vec![batch]);
/// assert_eq!(outcome.places.len(), 1);
/// assert_eq!(outcome.warnings.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RankingPipeline<S> {
    normalizer: Normalizer,
    scorer: S,
    mode: RankingMode,
    result_cap: usize,
}

impl<S: Scorer> RankingPipeline<S> {
    /// Assemble a pipeline.
    #[must_use]
    pub const fn new(
        normalizer: Normalizer,
        scorer: S,
        mode: RankingMode,
        result_cap: usize,
    ) -> Self {
        Self {
            normalizer,
            scorer,
            mode,
            result_cap,
        }
    }

    /// Authenticity-ranked pipeline capped at [`DEFAULT_DISCOVERY_CAP`].
    #[must_use]
    pub const fn for_discovery(normalizer: Normalizer, scorer: S) -> Self {
        Self::new(
            normalizer,
            scorer,
            RankingMode::Authenticity,
            DEFAULT_DISCOVERY_CAP,
        )
    }

    /// Authenticity-ranked pipeline capped at [`DEFAULT_SEARCH_CAP`].
    #[must_use]
    pub const fn for_search(normalizer: Normalizer, scorer: S) -> Self {
        Self::new(
            normalizer,
            scorer,
            RankingMode::Authenticity,
            DEFAULT_SEARCH_CAP,
        )
    }

    /// Replace the ranking mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: RankingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the result cap.
    #[must_use]
    pub const fn with_result_cap(mut self, result_cap: usize) -> Self {
        self.result_cap = result_cap;
        self
    }

    /// Ranking mode in use.
    #[must_use]
    pub const fn mode(&self) -> RankingMode {
        self.mode
    }

    /// Maximum number of places returned.
    #[must_use]
    pub const fn result_cap(&self) -> usize {
        self.result_cap
    }

    /// Scorer in use.
    #[must_use]
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Normalise and score every record, then merge the batches.
    pub fn rank<I>(&self, batches: I) -> RankOutcome
    where
        I: IntoIterator<Item = Vec<RawPlace>>,
    {
        let mut warnings = Vec::new();
        let scored: Vec<Vec<ScoredPlace>> = batches
            .into_iter()
            .enumerate()
            .map(|(batch, records)| self.score_batch(batch, &records, &mut warnings))
            .collect();
        RankOutcome {
            places: aggregate(scored, self.result_cap, self.mode),
            warnings,
        }
    }

    /// Rank batches while carrying forward warnings raised upstream.
    pub(crate) fn rank_with_warnings<I>(
        &self,
        batches: I,
        upstream: Vec<RankWarning>,
    ) -> RankOutcome
    where
        I: IntoIterator<Item = Vec<RawPlace>>,
    {
        let mut outcome = self.rank(batches);
        let mut warnings = upstream;
        warnings.append(&mut outcome.warnings);
        outcome.warnings = warnings;
        outcome
    }

    fn score_batch(
        &self,
        batch: usize,
        records: &[RawPlace],
        warnings: &mut Vec<RankWarning>,
    ) -> Vec<ScoredPlace> {
        records
            .iter()
            .enumerate()
            .filter_map(|(position, raw)| match self.normalizer.normalize(raw) {
                Ok(place) => Some(self.scorer.score_place(place)),
                Err(error) => {
                    warn!("skipping record {position} of query {batch}: {error}");
                    warnings.push(RankWarning::SkippedRecord {
                        batch,
                        position,
                        error,
                    });
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TableScorer;
    use crate::{LegacyPlace, ProviderKind, ReferenceYear};
    use rstest::{fixture, rstest};

    fn record(id: Option<&str>, name: Option<&str>) -> RawPlace {
        RawPlace::Legacy(LegacyPlace {
            fsq_id: id.map(str::to_owned),
            name: name.map(str::to_owned),
            ..LegacyPlace::default()
        })
    }

    #[fixture]
    fn pipeline() -> RankingPipeline<TableScorer> {
        let scorer = TableScorer::default()
            .with_score("a", 60)
            .with_score("b", 80)
            .with_score("c", 70);
        RankingPipeline::for_search(Normalizer::new(ReferenceYear::new(2025)), scorer)
    }

    #[rstest]
    fn skips_invalid_records_without_aborting(pipeline: RankingPipeline<TableScorer>) {
        let outcome = pipeline.rank(vec![
            vec![record(Some("a"), Some("A")), record(None, None)],
            vec![record(Some("b"), Some("B"))],
        ]);
        let ids: Vec<&str> = outcome.places.iter().map(ScoredPlace::id).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(
            outcome.warnings,
            [RankWarning::SkippedRecord {
                batch: 0,
                position: 1,
                error: NormalizeError::InvalidRecord {
                    provider: ProviderKind::Legacy
                },
            }]
        );
    }

    #[rstest]
    fn respects_configured_cap(pipeline: RankingPipeline<TableScorer>) {
        let outcome = pipeline.with_result_cap(2).rank(vec![vec![
            record(Some("a"), None),
            record(Some("b"), None),
            record(Some("c"), None),
        ]]);
        let ids: Vec<&str> = outcome.places.iter().map(ScoredPlace::id).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[rstest]
    fn upstream_warnings_come_first(pipeline: RankingPipeline<TableScorer>) {
        let upstream = vec![RankWarning::QueryFailed {
            query: "bookstore".into(),
            message: "timeout".into(),
        }];
        let outcome = pipeline.rank_with_warnings(vec![vec![record(None, None)]], upstream);
        assert_eq!(outcome.warnings.len(), 2);
        assert!(matches!(
            outcome.warnings.first(),
            Some(RankWarning::QueryFailed { .. })
        ));
        assert!(outcome.is_empty());
    }

    #[rstest]
    fn warnings_render_for_callers() {
        let warning = RankWarning::SkippedRecord {
            batch: 2,
            position: 0,
            error: NormalizeError::InvalidRecord {
                provider: ProviderKind::PlacesApi,
            },
        };
        assert_eq!(
            warning.to_string(),
            "skipped record 0 of query 2: places record has no usable identifier or name"
        );
    }
}
