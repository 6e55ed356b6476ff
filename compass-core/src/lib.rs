//! Core domain types for the Compass authenticity engine.
//!
//! Raw provider payloads flow through four stages:
//! - the [`Normalizer`] turns a [`RawPlace`] into a provider-agnostic
//!   [`CanonicalPlace`];
//! - a [`Scorer`] attaches an authenticity [`Assessment`], producing a
//!   [`ScoredPlace`];
//! - [`aggregate`] merges the per-query lists, drops duplicate ids, ranks by
//!   [`RankingMode`] and caps the result;
//! - callers wrap the outcome in a [`PlacesResponse`].
//!
//! [`RankingPipeline`] bundles the first three stages, and [`discover`] /
//! [`search_places`] drive it from a [`PlaceSearch`] provider.
//!
//! Everything here is pure and synchronous apart from the fan-out in
//! [`discover`], which runs provider queries on scoped threads.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod discovery;
mod error;
mod label;
mod normalize;
mod pipeline;
mod place;
mod raw;
mod response;
mod scored;
mod scorer;
mod search;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use aggregate::{RankingMode, aggregate};
pub use discovery::{
    DEFAULT_INTEREST_LIMIT, DEFAULT_INTERESTS, DiscoveryContext, discover, search_places,
};
pub use error::NormalizeError;
pub use label::{AuthenticityLabel, LabelThresholds, LabelThresholdsError};
pub use normalize::{Normalizer, ReferenceYear};
pub use pipeline::{
    DEFAULT_DISCOVERY_CAP, DEFAULT_SEARCH_CAP, RankOutcome, RankWarning, RankingPipeline,
};
pub use place::{CanonicalPlace, FALLBACK_ADDRESS, FALLBACK_CATEGORY, FALLBACK_NAME};
pub use raw::{
    LegacyPlace, PlacesApiPlace, ProviderKind, RawCategory, RawChain, RawGeocodes, RawLatLng,
    RawLocation, RawPlace, RawSocialMedia,
};
pub use response::{NO_PLACES_MESSAGE, PlaceEntry, PlacesResponse};
pub use scored::ScoredPlace;
pub use scorer::{Assessment, MAX_SCORE, Scorer};
pub use search::{DEFAULT_ORIGIN, DEFAULT_QUERY_LIMIT, PlaceSearch, SearchError, SearchQuery};
