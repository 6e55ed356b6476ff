//! Facade crate for the Compass authenticity engine.
//!
//! This crate re-exports the core domain types together with the default
//! authenticity scorer and summary generator, so callers can depend on a
//! single crate.

#![forbid(unsafe_code)]

pub use compass_core::{
    Assessment, AuthenticityLabel, CanonicalPlace, DiscoveryContext, LabelThresholds,
    NormalizeError, Normalizer, PlaceEntry, PlaceSearch, PlacesResponse, ProviderKind,
    RankOutcome, RankWarning, RankingMode, RankingPipeline, RawPlace, ReferenceYear,
    ScoredPlace, Scorer, SearchError, SearchQuery, aggregate, discover, search_places,
};

pub use compass_scorer::{
    AuthenticityScorer, AuthenticityWeights, ScoreBreakdown, WeightsError, summarize,
};
