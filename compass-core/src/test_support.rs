//! Test-only, in-memory collaborators used by unit and behaviour tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    Assessment, CanonicalPlace, LabelThresholds, PlaceSearch, RawPlace, Scorer, SearchError,
    SearchQuery,
};

/// In-memory `PlaceSearch` keyed by exact query text.
///
/// Unknown queries return an empty list. Every query received is recorded,
/// and clones share the record.
#[derive(Debug, Clone, Default)]
pub struct MemorySearch {
    responses: HashMap<String, Result<Vec<RawPlace>, SearchError>>,
    received: Arc<Mutex<Vec<SearchQuery>>>,
}

impl MemorySearch {
    /// Answer `query` with `records`.
    #[must_use]
    pub fn with_results(mut self, query: &str, records: Vec<RawPlace>) -> Self {
        self.responses.insert(query.to_owned(), Ok(records));
        self
    }

    /// Fail `query` with an upstream error carrying `message`.
    #[must_use]
    pub fn with_failure(mut self, query: &str, message: &str) -> Self {
        self.responses.insert(
            query.to_owned(),
            Err(SearchError::Upstream {
                message: message.to_owned(),
            }),
        );
        self
    }

    /// Queries received so far, in arrival order.
    #[must_use]
    pub fn received(&self) -> Vec<SearchQuery> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PlaceSearch for MemorySearch {
    fn search(&self, query: &SearchQuery) -> Result<Vec<RawPlace>, SearchError> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.clone());
        self.responses.get(&query.text).map_or_else(
            || Ok(Vec::new()),
            |response| {
                response
                    .clone()
                    .map(|records| records.into_iter().take(query.limit).collect())
            },
        )
    }
}

/// Test `Scorer` that looks scores up by place id.
///
/// Ids without an entry score `0`.
#[derive(Debug, Clone, Default)]
pub struct TableScorer {
    scores: HashMap<String, u8>,
}

impl TableScorer {
    /// Assign `score` to the place with `id`.
    #[must_use]
    pub fn with_score(mut self, id: &str, score: u8) -> Self {
        self.scores.insert(id.to_owned(), score);
        self
    }
}

impl Scorer for TableScorer {
    fn score(&self, place: &CanonicalPlace) -> Assessment {
        let raw = self.scores.get(place.id()).copied().unwrap_or(0);
        let score = Self::clamp(i32::from(raw));
        Assessment {
            score,
            label: LabelThresholds::default().classify(score),
        }
    }
}
